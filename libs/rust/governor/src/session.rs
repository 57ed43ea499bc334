use crate::{
    caller::{GovernorCaller, ProposalOverview, ProposalVotes, VotesCaller},
    error::Result,
    events::{Decoded, GovernorEvent},
    filterer::GovernorFilterer,
    options::{CallOptions, TransactOptions},
    transactor::{GovernorTransactor, VotesTransactor},
};
use alloy::{
    primitives::{Address, B256, Bytes, FixedBytes, Signature, TxHash, U256},
    providers::Provider,
};
use contracts::{GovernorMock, IVotes, ProposalActions, ProposalState, VoteSupport};
use std::ops::RangeInclusive;

/// Caller, transactor and filterer bound to one governor deployment.
#[derive(Debug, Clone)]
pub struct Governor<P> {
    pub caller: GovernorCaller<P>,
    pub transactor: GovernorTransactor<P>,
    pub filterer: GovernorFilterer<P>,
}

impl<P: Provider + Clone> Governor<P> {
    pub fn new(address: Address, provider: P) -> Self {
        let instance = GovernorMock::new(address, provider);
        Self {
            caller: GovernorCaller::new(instance.clone()),
            transactor: GovernorTransactor::new(instance.clone()),
            filterer: GovernorFilterer::new(instance),
        }
    }

    pub fn address(&self) -> &Address {
        self.caller.address()
    }

    /// Binds preset options so individual calls need not repeat them.
    pub fn session(self, call_options: CallOptions, transact_options: TransactOptions) -> GovernorSession<P> {
        GovernorSession {
            governor: self,
            call_options,
            transact_options,
        }
    }
}

/// A [`Governor`] with fixed call and transact options.
#[derive(Debug, Clone)]
pub struct GovernorSession<P> {
    pub governor: Governor<P>,
    pub call_options: CallOptions,
    pub transact_options: TransactOptions,
}

/// Forwards every caller, transactor and filterer method with the preset options.
impl<P: Provider + Clone> GovernorSession<P> {
    pub async fn name(&self) -> Result<String> {
        self.governor.caller.name(&self.call_options).await
    }

    pub async fn version(&self) -> Result<String> {
        self.governor.caller.version(&self.call_options).await
    }

    pub async fn counting_mode(&self) -> Result<String> {
        self.governor.caller.counting_mode(&self.call_options).await
    }

    pub async fn token(&self) -> Result<Address> {
        self.governor.caller.token(&self.call_options).await
    }

    pub async fn state(&self, proposal_id: U256) -> Result<ProposalState> {
        self.governor.caller.state(proposal_id, &self.call_options).await
    }

    pub async fn proposal_snapshot(&self, proposal_id: U256) -> Result<U256> {
        self.governor
            .caller
            .proposal_snapshot(proposal_id, &self.call_options)
            .await
    }

    pub async fn proposal_deadline(&self, proposal_id: U256) -> Result<U256> {
        self.governor
            .caller
            .proposal_deadline(proposal_id, &self.call_options)
            .await
    }

    pub async fn proposal_threshold(&self) -> Result<U256> {
        self.governor.caller.proposal_threshold(&self.call_options).await
    }

    pub async fn proposal_votes(&self, proposal_id: U256) -> Result<ProposalVotes> {
        self.governor
            .caller
            .proposal_votes(proposal_id, &self.call_options)
            .await
    }

    pub async fn proposal(&self, proposal_id: U256) -> Result<ProposalOverview> {
        self.governor.caller.proposal(proposal_id, &self.call_options).await
    }

    pub async fn voting_delay(&self) -> Result<U256> {
        self.governor.caller.voting_delay(&self.call_options).await
    }

    pub async fn voting_period(&self) -> Result<U256> {
        self.governor.caller.voting_period(&self.call_options).await
    }

    pub async fn quorum(&self, block_number: U256) -> Result<U256> {
        self.governor.caller.quorum(block_number, &self.call_options).await
    }

    pub async fn quorum_numerator(&self) -> Result<U256> {
        self.governor.caller.quorum_numerator(&self.call_options).await
    }

    pub async fn quorum_numerator_at(&self, block_number: U256) -> Result<U256> {
        self.governor
            .caller
            .quorum_numerator_at(block_number, &self.call_options)
            .await
    }

    pub async fn quorum_denominator(&self) -> Result<U256> {
        self.governor.caller.quorum_denominator(&self.call_options).await
    }

    pub async fn get_votes(&self, account: Address, block_number: U256) -> Result<U256> {
        self.governor
            .caller
            .get_votes(account, block_number, &self.call_options)
            .await
    }

    pub async fn get_votes_with_params(&self, account: Address, block_number: U256, params: Bytes) -> Result<U256> {
        self.governor
            .caller
            .get_votes_with_params(account, block_number, params, &self.call_options)
            .await
    }

    pub async fn has_voted(&self, proposal_id: U256, account: Address) -> Result<bool> {
        self.governor
            .caller
            .has_voted(proposal_id, account, &self.call_options)
            .await
    }

    pub async fn hash_proposal(&self, actions: &ProposalActions, description_hash: B256) -> Result<U256> {
        self.governor
            .caller
            .hash_proposal(actions, description_hash, &self.call_options)
            .await
    }

    pub async fn supports_interface(&self, interface_id: FixedBytes<4>) -> Result<bool> {
        self.governor
            .caller
            .supports_interface(interface_id, &self.call_options)
            .await
    }

    pub async fn propose(&self, actions: &ProposalActions, description: &str) -> Result<TxHash> {
        self.governor
            .transactor
            .propose(actions, description, &self.transact_options)
            .await
    }

    pub async fn execute(&self, actions: &ProposalActions, description: &str) -> Result<TxHash> {
        self.governor
            .transactor
            .execute(actions, description, &self.transact_options)
            .await
    }

    pub async fn cancel(&self, actions: &ProposalActions, description: &str) -> Result<TxHash> {
        self.governor
            .transactor
            .cancel(actions, description, &self.transact_options)
            .await
    }

    pub async fn cast_vote(&self, proposal_id: U256, support: VoteSupport) -> Result<TxHash> {
        self.governor
            .transactor
            .cast_vote(proposal_id, support, &self.transact_options)
            .await
    }

    pub async fn cast_vote_with_reason(&self, proposal_id: U256, support: VoteSupport, reason: &str) -> Result<TxHash> {
        self.governor
            .transactor
            .cast_vote_with_reason(proposal_id, support, reason, &self.transact_options)
            .await
    }

    pub async fn cast_vote_with_reason_and_params(
        &self,
        proposal_id: U256,
        support: VoteSupport,
        reason: &str,
        params: Bytes,
    ) -> Result<TxHash> {
        self.governor
            .transactor
            .cast_vote_with_reason_and_params(proposal_id, support, reason, params, &self.transact_options)
            .await
    }

    pub async fn cast_vote_by_sig(&self, proposal_id: U256, support: VoteSupport, signature: &Signature) -> Result<TxHash> {
        self.governor
            .transactor
            .cast_vote_by_sig(proposal_id, support, signature, &self.transact_options)
            .await
    }

    pub async fn cast_vote_with_reason_and_params_by_sig(
        &self,
        proposal_id: U256,
        support: VoteSupport,
        reason: &str,
        params: Bytes,
        signature: &Signature,
    ) -> Result<TxHash> {
        self.governor
            .transactor
            .cast_vote_with_reason_and_params_by_sig(
                proposal_id,
                support,
                reason,
                params,
                signature,
                &self.transact_options,
            )
            .await
    }

    pub async fn relay(&self, target: Address, value: U256, data: Bytes) -> Result<TxHash> {
        self.governor
            .transactor
            .relay(target, value, data, &self.transact_options)
            .await
    }

    pub async fn set_voting_delay(&self, delay: U256) -> Result<TxHash> {
        self.governor
            .transactor
            .set_voting_delay(delay, &self.transact_options)
            .await
    }

    pub async fn set_voting_period(&self, period: U256) -> Result<TxHash> {
        self.governor
            .transactor
            .set_voting_period(period, &self.transact_options)
            .await
    }

    pub async fn set_proposal_threshold(&self, threshold: U256) -> Result<TxHash> {
        self.governor
            .transactor
            .set_proposal_threshold(threshold, &self.transact_options)
            .await
    }

    pub async fn update_quorum_numerator(&self, numerator: U256) -> Result<TxHash> {
        self.governor
            .transactor
            .update_quorum_numerator(numerator, &self.transact_options)
            .await
    }

    pub async fn events(&self, blocks: RangeInclusive<u64>) -> Result<Vec<Decoded<GovernorEvent>>> {
        self.governor.filterer.filter_events(blocks).await
    }
}

/// Caller and transactor bound to an `IVotes` token.
#[derive(Debug, Clone)]
pub struct Votes<P> {
    pub caller: VotesCaller<P>,
    pub transactor: VotesTransactor<P>,
}

impl<P: Provider + Clone> Votes<P> {
    pub fn new(address: Address, provider: P) -> Self {
        let instance = IVotes::new(address, provider);
        Self {
            caller: VotesCaller::new(instance.clone()),
            transactor: VotesTransactor::new(instance),
        }
    }
}
