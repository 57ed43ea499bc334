use crate::error::{Error, Result};
use alloy::{
    primitives::{B256, U256},
    rpc::types::Log,
    sol_types::SolEvent,
};
use contracts::GovernorMock::{
    ProposalCanceled, ProposalCreated, ProposalExecuted, ProposalThresholdSet,
    QuorumNumeratorUpdated, VoteCast, VoteCastWithParams, VotingDelaySet, VotingPeriodSet,
};
use std::marker::PhantomData;
use tracing::debug;

/// A decoded event together with the log it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<E> {
    pub event: E,
    pub log: Log,
}

impl<E> Decoded<E> {
    pub fn block_number(&self) -> Option<u64> {
        self.log.block_number
    }
}

impl<E: SolEvent> Decoded<E> {
    pub fn decode(log: Log) -> Result<Self> {
        let event = E::decode_log_data(log.data())?;
        Ok(Self { event, log })
    }
}

/// Every event a governor with settings, quorum fraction and simple counting emits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GovernorEvent {
    ProposalCreated(ProposalCreated),
    ProposalCanceled(ProposalCanceled),
    ProposalExecuted(ProposalExecuted),
    VoteCast(VoteCast),
    VoteCastWithParams(VoteCastWithParams),
    VotingDelaySet(VotingDelaySet),
    VotingPeriodSet(VotingPeriodSet),
    ProposalThresholdSet(ProposalThresholdSet),
    QuorumNumeratorUpdated(QuorumNumeratorUpdated),
}

impl GovernorEvent {
    pub const SIGNATURE_HASHES: [B256; 9] = [
        ProposalCreated::SIGNATURE_HASH,
        ProposalCanceled::SIGNATURE_HASH,
        ProposalExecuted::SIGNATURE_HASH,
        VoteCast::SIGNATURE_HASH,
        VoteCastWithParams::SIGNATURE_HASH,
        VotingDelaySet::SIGNATURE_HASH,
        VotingPeriodSet::SIGNATURE_HASH,
        ProposalThresholdSet::SIGNATURE_HASH,
        QuorumNumeratorUpdated::SIGNATURE_HASH,
    ];

    pub fn decode_log(log: &Log) -> Result<Self> {
        let data = log.data();
        let topic0 = *data.topics().first().ok_or(Error::AnonymousLog)?;

        let event = if topic0 == ProposalCreated::SIGNATURE_HASH {
            Self::ProposalCreated(ProposalCreated::decode_log_data(data)?)
        } else if topic0 == ProposalCanceled::SIGNATURE_HASH {
            Self::ProposalCanceled(ProposalCanceled::decode_log_data(data)?)
        } else if topic0 == ProposalExecuted::SIGNATURE_HASH {
            Self::ProposalExecuted(ProposalExecuted::decode_log_data(data)?)
        } else if topic0 == VoteCast::SIGNATURE_HASH {
            Self::VoteCast(VoteCast::decode_log_data(data)?)
        } else if topic0 == VoteCastWithParams::SIGNATURE_HASH {
            Self::VoteCastWithParams(VoteCastWithParams::decode_log_data(data)?)
        } else if topic0 == VotingDelaySet::SIGNATURE_HASH {
            Self::VotingDelaySet(VotingDelaySet::decode_log_data(data)?)
        } else if topic0 == VotingPeriodSet::SIGNATURE_HASH {
            Self::VotingPeriodSet(VotingPeriodSet::decode_log_data(data)?)
        } else if topic0 == ProposalThresholdSet::SIGNATURE_HASH {
            Self::ProposalThresholdSet(ProposalThresholdSet::decode_log_data(data)?)
        } else if topic0 == QuorumNumeratorUpdated::SIGNATURE_HASH {
            Self::QuorumNumeratorUpdated(QuorumNumeratorUpdated::decode_log_data(data)?)
        } else {
            return Err(Error::UnknownEvent(topic0));
        };
        Ok(event)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::ProposalCreated(_) => "ProposalCreated",
            Self::ProposalCanceled(_) => "ProposalCanceled",
            Self::ProposalExecuted(_) => "ProposalExecuted",
            Self::VoteCast(_) => "VoteCast",
            Self::VoteCastWithParams(_) => "VoteCastWithParams",
            Self::VotingDelaySet(_) => "VotingDelaySet",
            Self::VotingPeriodSet(_) => "VotingPeriodSet",
            Self::ProposalThresholdSet(_) => "ProposalThresholdSet",
            Self::QuorumNumeratorUpdated(_) => "QuorumNumeratorUpdated",
        }
    }

    /// Proposal the event refers to, for the proposal-scoped events.
    pub fn proposal_id(&self) -> Option<U256> {
        match self {
            Self::ProposalCreated(e) => Some(e.proposalId),
            Self::ProposalCanceled(e) => Some(e.proposalId),
            Self::ProposalExecuted(e) => Some(e.proposalId),
            Self::VoteCast(e) => Some(e.proposalId),
            Self::VoteCastWithParams(e) => Some(e.proposalId),
            _ => None,
        }
    }
}

/// Iterates decoded events over a batch of fetched logs.
///
/// Iteration stops at the first log that fails to decode; the failure is then
/// available from [`EventIterator::error`].
#[derive(Debug)]
pub struct EventIterator<E> {
    logs: std::vec::IntoIter<Log>,
    error: Option<Error>,
    _event: PhantomData<E>,
}

impl<E> EventIterator<E> {
    pub fn new(logs: Vec<Log>) -> Self {
        Self {
            logs: logs.into_iter(),
            error: None,
            _event: PhantomData,
        }
    }

    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Remaining undecoded logs are dropped.
    pub fn close(self) -> Option<Error> {
        self.error
    }
}

impl<E: SolEvent> Iterator for EventIterator<E> {
    type Item = Decoded<E>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.error.is_some() {
            return None;
        }
        let log = self.logs.next()?;
        match Decoded::decode(log) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                debug!(error = %e, "Stopping event iteration on undecodable log");
                self.error = Some(e);
                None
            }
        }
    }
}
