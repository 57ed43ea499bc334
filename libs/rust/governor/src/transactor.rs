use crate::{error::Result, options::TransactOptions};
use alloy::{
    contract::{CallBuilder, CallDecoder},
    primitives::{Address, B256, Bytes, Signature, TxHash, U256},
    providers::Provider,
};
use contracts::{
    GovernorMock::GovernorMockInstance, IVotes::IVotesInstance, ProposalActions, VoteSupport,
    description_hash,
};
use tracing::{info, instrument};

async fn send<P, D>(call: CallBuilder<P, D>, opts: &TransactOptions) -> Result<TxHash>
where
    P: Provider,
    D: CallDecoder,
{
    let pending = opts.apply(call).send().await?;
    Ok(*pending.tx_hash())
}

/// `v` as the governor's `ecrecover` expects it.
fn signature_parts(signature: &Signature) -> (u8, B256, B256) {
    let v = 27 + u8::from(signature.v());
    (v, signature.r().into(), signature.s().into())
}

/// State-changing side of a governor. Every method returns the hash of the submitted transaction.
#[derive(Debug, Clone)]
pub struct GovernorTransactor<P> {
    instance: GovernorMockInstance<P>,
}

impl<P: Provider> GovernorTransactor<P> {
    pub fn new(instance: GovernorMockInstance<P>) -> Self {
        Self { instance }
    }

    #[instrument(skip_all, fields(governor = %self.instance.address(), actions = actions.len()))]
    pub async fn propose(
        &self,
        actions: &ProposalActions,
        description: &str,
        opts: &TransactOptions,
    ) -> Result<TxHash> {
        actions.validate()?;
        let call = self.instance.propose(
            actions.targets.clone(),
            actions.values.clone(),
            actions.calldatas.clone(),
            description.to_string(),
        );
        let tx_hash = send(call, opts).await?;
        info!(tx_hash = %tx_hash, "Proposal submitted");
        Ok(tx_hash)
    }

    #[instrument(skip_all, fields(governor = %self.instance.address()))]
    pub async fn execute(
        &self,
        actions: &ProposalActions,
        description: &str,
        opts: &TransactOptions,
    ) -> Result<TxHash> {
        actions.validate()?;
        let call = self.instance.execute(
            actions.targets.clone(),
            actions.values.clone(),
            actions.calldatas.clone(),
            description_hash(description),
        );
        send(call, opts).await
    }

    #[instrument(skip_all, fields(governor = %self.instance.address()))]
    pub async fn cancel(
        &self,
        actions: &ProposalActions,
        description: &str,
        opts: &TransactOptions,
    ) -> Result<TxHash> {
        actions.validate()?;
        let call = self.instance.cancel(
            actions.targets.clone(),
            actions.values.clone(),
            actions.calldatas.clone(),
            description_hash(description),
        );
        send(call, opts).await
    }

    #[instrument(skip(self, opts), fields(governor = %self.instance.address()))]
    pub async fn cast_vote(&self, proposal_id: U256, support: VoteSupport, opts: &TransactOptions) -> Result<TxHash> {
        send(self.instance.castVote(proposal_id, support.as_u8()), opts).await
    }

    #[instrument(skip(self, opts), fields(governor = %self.instance.address()))]
    pub async fn cast_vote_with_reason(
        &self,
        proposal_id: U256,
        support: VoteSupport,
        reason: &str,
        opts: &TransactOptions,
    ) -> Result<TxHash> {
        let call = self
            .instance
            .castVoteWithReason(proposal_id, support.as_u8(), reason.to_string());
        send(call, opts).await
    }

    pub async fn cast_vote_with_reason_and_params(
        &self,
        proposal_id: U256,
        support: VoteSupport,
        reason: &str,
        params: Bytes,
        opts: &TransactOptions,
    ) -> Result<TxHash> {
        let call = self.instance.castVoteWithReasonAndParams(
            proposal_id,
            support.as_u8(),
            reason.to_string(),
            params,
        );
        send(call, opts).await
    }

    /// Relays a vote signed over `contracts::ballot::ballot_signing_hash`.
    pub async fn cast_vote_by_sig(
        &self,
        proposal_id: U256,
        support: VoteSupport,
        signature: &Signature,
        opts: &TransactOptions,
    ) -> Result<TxHash> {
        let (v, r, s) = signature_parts(signature);
        send(
            self.instance.castVoteBySig(proposal_id, support.as_u8(), v, r, s),
            opts,
        )
        .await
    }

    pub async fn cast_vote_with_reason_and_params_by_sig(
        &self,
        proposal_id: U256,
        support: VoteSupport,
        reason: &str,
        params: Bytes,
        signature: &Signature,
        opts: &TransactOptions,
    ) -> Result<TxHash> {
        let (v, r, s) = signature_parts(signature);
        let call = self.instance.castVoteWithReasonAndParamsBySig(
            proposal_id,
            support.as_u8(),
            reason.to_string(),
            params,
            v,
            r,
            s,
        );
        send(call, opts).await
    }

    pub async fn relay(&self, target: Address, value: U256, data: Bytes, opts: &TransactOptions) -> Result<TxHash> {
        send(self.instance.relay(target, value, data), opts).await
    }

    pub async fn set_voting_delay(&self, delay: U256, opts: &TransactOptions) -> Result<TxHash> {
        send(self.instance.setVotingDelay(delay), opts).await
    }

    pub async fn set_voting_period(&self, period: U256, opts: &TransactOptions) -> Result<TxHash> {
        send(self.instance.setVotingPeriod(period), opts).await
    }

    pub async fn set_proposal_threshold(&self, threshold: U256, opts: &TransactOptions) -> Result<TxHash> {
        send(self.instance.setProposalThreshold(threshold), opts).await
    }

    pub async fn update_quorum_numerator(&self, numerator: U256, opts: &TransactOptions) -> Result<TxHash> {
        send(self.instance.updateQuorumNumerator(numerator), opts).await
    }
}

#[derive(Debug, Clone)]
pub struct VotesTransactor<P> {
    instance: IVotesInstance<P>,
}

impl<P: Provider> VotesTransactor<P> {
    pub fn new(instance: IVotesInstance<P>) -> Self {
        Self { instance }
    }

    #[instrument(skip(self, opts), fields(token = %self.instance.address()))]
    pub async fn delegate(&self, delegatee: Address, opts: &TransactOptions) -> Result<TxHash> {
        send(self.instance.delegate(delegatee), opts).await
    }

    pub async fn delegate_by_sig(
        &self,
        delegatee: Address,
        nonce: U256,
        expiry: U256,
        signature: &Signature,
        opts: &TransactOptions,
    ) -> Result<TxHash> {
        let (v, r, s) = signature_parts(signature);
        send(
            self.instance.delegateBySig(delegatee, nonce, expiry, v, r, s),
            opts,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_v_is_ecrecover_style() {
        let even = Signature::new(U256::from(1), U256::from(2), false);
        let odd = Signature::new(U256::from(1), U256::from(2), true);

        let (v, r, s) = signature_parts(&even);
        assert_eq!(v, 27);
        assert_eq!(r, B256::from(U256::from(1)));
        assert_eq!(s, B256::from(U256::from(2)));
        assert_eq!(signature_parts(&odd).0, 28);
    }
}
