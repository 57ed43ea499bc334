use crate::{error::Result, options::CallOptions};
use alloy::{
    primitives::{Address, B256, Bytes, FixedBytes, U256},
    providers::Provider,
};
use contracts::{
    GovernorMock::GovernorMockInstance, IVotes::IVotesInstance, ProposalActions, ProposalState,
};
use serde::Serialize;
use tracing::{instrument, warn};

/// Tally under simple counting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProposalVotes {
    pub against: U256,
    pub r#for: U256,
    pub abstain: U256,
}

impl ProposalVotes {
    pub fn total(&self) -> U256 {
        self.against + self.r#for + self.abstain
    }

    /// Votes counted towards quorum: for + abstain.
    pub fn quorum_votes(&self) -> U256 {
        self.r#for + self.abstain
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProposalOverview {
    pub id: U256,
    pub state: ProposalState,
    pub snapshot: U256,
    pub deadline: U256,
    pub votes: ProposalVotes,
    /// Not available while the snapshot block is in the future.
    pub quorum: Option<U256>,
}

impl ProposalOverview {
    pub fn quorum_reached(&self) -> Option<bool> {
        self.quorum.map(|quorum| self.votes.quorum_votes() >= quorum)
    }
}

/// Read-only view of a governor.
#[derive(Debug, Clone)]
pub struct GovernorCaller<P> {
    instance: GovernorMockInstance<P>,
}

impl<P: Provider> GovernorCaller<P> {
    pub fn new(instance: GovernorMockInstance<P>) -> Self {
        Self { instance }
    }

    pub fn address(&self) -> &Address {
        self.instance.address()
    }

    pub async fn name(&self, opts: &CallOptions) -> Result<String> {
        Ok(self.instance.name().block(opts.block).call().await?)
    }

    pub async fn version(&self, opts: &CallOptions) -> Result<String> {
        Ok(self.instance.version().block(opts.block).call().await?)
    }

    pub async fn counting_mode(&self, opts: &CallOptions) -> Result<String> {
        Ok(self.instance.COUNTING_MODE().block(opts.block).call().await?)
    }

    pub async fn ballot_typehash(&self, opts: &CallOptions) -> Result<B256> {
        Ok(self.instance.BALLOT_TYPEHASH().block(opts.block).call().await?)
    }

    pub async fn token(&self, opts: &CallOptions) -> Result<Address> {
        Ok(self.instance.token().block(opts.block).call().await?)
    }

    #[instrument(skip(self, opts), fields(governor = %self.address()))]
    pub async fn state(&self, proposal_id: U256, opts: &CallOptions) -> Result<ProposalState> {
        let raw = self.instance.state(proposal_id).block(opts.block).call().await?;
        Ok(ProposalState::try_from(raw)?)
    }

    pub async fn proposal_snapshot(&self, proposal_id: U256, opts: &CallOptions) -> Result<U256> {
        Ok(self
            .instance
            .proposalSnapshot(proposal_id)
            .block(opts.block)
            .call()
            .await?)
    }

    pub async fn proposal_deadline(&self, proposal_id: U256, opts: &CallOptions) -> Result<U256> {
        Ok(self
            .instance
            .proposalDeadline(proposal_id)
            .block(opts.block)
            .call()
            .await?)
    }

    pub async fn proposal_threshold(&self, opts: &CallOptions) -> Result<U256> {
        Ok(self.instance.proposalThreshold().block(opts.block).call().await?)
    }

    pub async fn proposal_votes(&self, proposal_id: U256, opts: &CallOptions) -> Result<ProposalVotes> {
        let votes = self
            .instance
            .proposalVotes(proposal_id)
            .block(opts.block)
            .call()
            .await?;
        Ok(ProposalVotes {
            against: votes.againstVotes,
            r#for: votes.forVotes,
            abstain: votes.abstainVotes,
        })
    }

    pub async fn voting_delay(&self, opts: &CallOptions) -> Result<U256> {
        Ok(self.instance.votingDelay().block(opts.block).call().await?)
    }

    pub async fn voting_period(&self, opts: &CallOptions) -> Result<U256> {
        Ok(self.instance.votingPeriod().block(opts.block).call().await?)
    }

    pub async fn quorum(&self, block_number: U256, opts: &CallOptions) -> Result<U256> {
        Ok(self.instance.quorum(block_number).block(opts.block).call().await?)
    }

    pub async fn quorum_numerator(&self, opts: &CallOptions) -> Result<U256> {
        Ok(self.instance.quorumNumerator_0().block(opts.block).call().await?)
    }

    pub async fn quorum_numerator_at(&self, block_number: U256, opts: &CallOptions) -> Result<U256> {
        Ok(self
            .instance
            .quorumNumerator_1(block_number)
            .block(opts.block)
            .call()
            .await?)
    }

    pub async fn quorum_denominator(&self, opts: &CallOptions) -> Result<U256> {
        Ok(self.instance.quorumDenominator().block(opts.block).call().await?)
    }

    pub async fn get_votes(&self, account: Address, block_number: U256, opts: &CallOptions) -> Result<U256> {
        Ok(self
            .instance
            .getVotes(account, block_number)
            .block(opts.block)
            .call()
            .await?)
    }

    pub async fn get_votes_with_params(
        &self,
        account: Address,
        block_number: U256,
        params: Bytes,
        opts: &CallOptions,
    ) -> Result<U256> {
        Ok(self
            .instance
            .getVotesWithParams(account, block_number, params)
            .block(opts.block)
            .call()
            .await?)
    }

    pub async fn has_voted(&self, proposal_id: U256, account: Address, opts: &CallOptions) -> Result<bool> {
        Ok(self
            .instance
            .hasVoted(proposal_id, account)
            .block(opts.block)
            .call()
            .await?)
    }

    /// On-chain `hashProposal`; `contracts::hash_proposal` gives the same id offline.
    pub async fn hash_proposal(
        &self,
        actions: &ProposalActions,
        description_hash: B256,
        opts: &CallOptions,
    ) -> Result<U256> {
        Ok(self
            .instance
            .hashProposal(
                actions.targets.clone(),
                actions.values.clone(),
                actions.calldatas.clone(),
                description_hash,
            )
            .block(opts.block)
            .call()
            .await?)
    }

    pub async fn supports_interface(&self, interface_id: FixedBytes<4>, opts: &CallOptions) -> Result<bool> {
        Ok(self
            .instance
            .supportsInterface(interface_id)
            .block(opts.block)
            .call()
            .await?)
    }

    /// State, timing, tally and quorum of one proposal.
    #[instrument(skip(self, opts), fields(governor = %self.address()))]
    pub async fn proposal(&self, proposal_id: U256, opts: &CallOptions) -> Result<ProposalOverview> {
        let state = self.state(proposal_id, opts).await?;
        let snapshot = self.proposal_snapshot(proposal_id, opts).await?;
        let deadline = self.proposal_deadline(proposal_id, opts).await?;
        let votes = self.proposal_votes(proposal_id, opts).await?;

        let quorum = match self.quorum(snapshot, opts).await {
            Ok(quorum) => Some(quorum),
            Err(e) => {
                warn!(error = %e, snapshot = %snapshot, "Quorum not available at snapshot block");
                None
            }
        };

        Ok(ProposalOverview {
            id: proposal_id,
            state,
            snapshot,
            deadline,
            votes,
            quorum,
        })
    }
}

/// Read-only view of an `IVotes` token.
#[derive(Debug, Clone)]
pub struct VotesCaller<P> {
    instance: IVotesInstance<P>,
}

impl<P: Provider> VotesCaller<P> {
    pub fn new(instance: IVotesInstance<P>) -> Self {
        Self { instance }
    }

    pub fn address(&self) -> &Address {
        self.instance.address()
    }

    pub async fn get_votes(&self, account: Address, opts: &CallOptions) -> Result<U256> {
        Ok(self.instance.getVotes(account).block(opts.block).call().await?)
    }

    pub async fn get_past_votes(&self, account: Address, block_number: U256, opts: &CallOptions) -> Result<U256> {
        Ok(self
            .instance
            .getPastVotes(account, block_number)
            .block(opts.block)
            .call()
            .await?)
    }

    pub async fn get_past_total_supply(&self, block_number: U256, opts: &CallOptions) -> Result<U256> {
        Ok(self
            .instance
            .getPastTotalSupply(block_number)
            .block(opts.block)
            .call()
            .await?)
    }

    pub async fn delegates(&self, account: Address, opts: &CallOptions) -> Result<Address> {
        Ok(self.instance.delegates(account).block(opts.block).call().await?)
    }
}
