use alloy::{
    primitives::{Address, B256, Bytes, U256, keccak256},
    sol_types::SolValue,
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProposalError {
    #[error("unknown proposal state {0}")]
    UnknownState(u8),
    #[error("unknown vote support {0}")]
    UnknownSupport(String),
    #[error("invalid proposal length: {targets} targets, {values} values, {calldatas} calldatas")]
    InvalidLength {
        targets: usize,
        values: usize,
        calldatas: usize,
    },
    #[error("empty proposal")]
    Empty,
}

/// Lifecycle state as returned by `IGovernor.state`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProposalState {
    Pending,
    Active,
    Canceled,
    Defeated,
    Succeeded,
    Queued,
    Expired,
    Executed,
}

impl ProposalState {
    /// No further transition is possible from this state.
    pub fn is_final(self) -> bool {
        matches!(
            self,
            ProposalState::Canceled
                | ProposalState::Defeated
                | ProposalState::Expired
                | ProposalState::Executed
        )
    }
}

impl TryFrom<u8> for ProposalState {
    type Error = ProposalError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ProposalState::Pending),
            1 => Ok(ProposalState::Active),
            2 => Ok(ProposalState::Canceled),
            3 => Ok(ProposalState::Defeated),
            4 => Ok(ProposalState::Succeeded),
            5 => Ok(ProposalState::Queued),
            6 => Ok(ProposalState::Expired),
            7 => Ok(ProposalState::Executed),
            other => Err(ProposalError::UnknownState(other)),
        }
    }
}

impl fmt::Display for ProposalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Vote direction under `GovernorCountingSimple` (`support=bravo`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum VoteSupport {
    Against = 0,
    For = 1,
    Abstain = 2,
}

impl VoteSupport {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for VoteSupport {
    type Error = ProposalError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(VoteSupport::Against),
            1 => Ok(VoteSupport::For),
            2 => Ok(VoteSupport::Abstain),
            other => Err(ProposalError::UnknownSupport(other.to_string())),
        }
    }
}

impl FromStr for VoteSupport {
    type Err = ProposalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "against" | "0" => Ok(VoteSupport::Against),
            "for" | "1" => Ok(VoteSupport::For),
            "abstain" | "2" => Ok(VoteSupport::Abstain),
            _ => Err(ProposalError::UnknownSupport(s.to_string())),
        }
    }
}

impl fmt::Display for VoteSupport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// The executable part of a proposal: parallel arrays of calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalActions {
    pub targets: Vec<Address>,
    pub values: Vec<U256>,
    pub calldatas: Vec<Bytes>,
}

impl ProposalActions {
    pub fn new(targets: Vec<Address>, values: Vec<U256>, calldatas: Vec<Bytes>) -> Self {
        Self {
            targets,
            values,
            calldatas,
        }
    }

    /// Rejects what `Governor.propose` would revert on.
    pub fn validate(&self) -> Result<(), ProposalError> {
        if self.targets.len() != self.values.len() || self.targets.len() != self.calldatas.len() {
            return Err(ProposalError::InvalidLength {
                targets: self.targets.len(),
                values: self.values.len(),
                calldatas: self.calldatas.len(),
            });
        }
        if self.targets.is_empty() {
            return Err(ProposalError::Empty);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

pub fn description_hash(description: &str) -> B256 {
    keccak256(description.as_bytes())
}

/// Same id `IGovernor.hashProposal` returns, computed locally.
pub fn hash_proposal(actions: &ProposalActions, description_hash: B256) -> U256 {
    let encoded = (
        actions.targets.clone(),
        actions.values.clone(),
        actions.calldatas.clone(),
        description_hash,
    )
        .abi_encode_params();
    U256::from_be_bytes(keccak256(encoded).0)
}

/// Display title for a proposal description.
pub fn proposal_title(description: &str) -> String {
    let first_line = description.lines().next().unwrap_or_default().trim();
    let first_line = first_line.strip_prefix("# ").unwrap_or(first_line);
    let title: String = first_line.chars().take(120).collect();

    if title.is_empty() {
        "Unknown".to_string()
    } else {
        title
    }
}
