use crate::{
    error::Result,
    events::{Decoded, EventIterator, GovernorEvent},
};
use alloy::{
    primitives::{Address, B256},
    providers::Provider,
    rpc::types::{Filter, Log},
    sol_types::SolEvent,
};
use contracts::GovernorMock::{
    GovernorMockInstance, ProposalCanceled, ProposalCreated, ProposalExecuted, VoteCast,
};
use futures::{Stream, StreamExt, future, stream};
use std::ops::RangeInclusive;
use tracing::{debug, instrument, warn};

/// Log queries against one governor.
#[derive(Debug, Clone)]
pub struct GovernorFilterer<P> {
    instance: GovernorMockInstance<P>,
}

impl<P: Provider> GovernorFilterer<P> {
    pub fn new(instance: GovernorMockInstance<P>) -> Self {
        Self { instance }
    }

    fn base_filter(&self, blocks: &RangeInclusive<u64>) -> Filter {
        Filter::new()
            .address(*self.instance.address())
            .from_block(*blocks.start())
            .to_block(*blocks.end())
    }

    async fn filter<E: SolEvent>(&self, filter: Filter) -> Result<EventIterator<E>> {
        let logs = self
            .instance
            .provider()
            .get_logs(&filter.event_signature(E::SIGNATURE_HASH))
            .await?;
        debug!(event = E::SIGNATURE, logs = logs.len(), "Fetched logs");
        Ok(EventIterator::new(logs))
    }

    /// `ProposalCreated` logs in `blocks`. The event has no indexed fields, so
    /// filtering by proposer happens after decoding.
    #[instrument(skip(self, proposers), fields(governor = %self.instance.address()))]
    pub async fn filter_proposal_created(
        &self,
        blocks: RangeInclusive<u64>,
        proposers: &[Address],
    ) -> Result<Vec<Decoded<ProposalCreated>>> {
        let mut iter = self.filter::<ProposalCreated>(self.base_filter(&blocks)).await?;
        let created = iter
            .by_ref()
            .filter(|d| proposers.is_empty() || proposers.contains(&d.event.proposer))
            .collect();
        match iter.close() {
            Some(e) => Err(e),
            None => Ok(created),
        }
    }

    /// `VoteCast` logs in `blocks`, optionally restricted to the indexed `voter`.
    #[instrument(skip(self, voters), fields(governor = %self.instance.address()))]
    pub async fn filter_vote_cast(
        &self,
        blocks: RangeInclusive<u64>,
        voters: &[Address],
    ) -> Result<EventIterator<VoteCast>> {
        let mut filter = self.base_filter(&blocks);
        if !voters.is_empty() {
            let topics: Vec<B256> = voters.iter().map(|voter| voter.into_word()).collect();
            filter = filter.topic1(topics);
        }
        self.filter::<VoteCast>(filter).await
    }

    pub async fn filter_proposal_executed(
        &self,
        blocks: RangeInclusive<u64>,
    ) -> Result<EventIterator<ProposalExecuted>> {
        self.filter::<ProposalExecuted>(self.base_filter(&blocks)).await
    }

    pub async fn filter_proposal_canceled(
        &self,
        blocks: RangeInclusive<u64>,
    ) -> Result<EventIterator<ProposalCanceled>> {
        self.filter::<ProposalCanceled>(self.base_filter(&blocks)).await
    }

    /// Every governor event in `blocks`, in log order.
    #[instrument(skip(self), fields(governor = %self.instance.address()))]
    pub async fn filter_events(&self, blocks: RangeInclusive<u64>) -> Result<Vec<Decoded<GovernorEvent>>> {
        let filter = self
            .base_filter(&blocks)
            .event_signature(GovernorEvent::SIGNATURE_HASHES.to_vec());
        let logs = self.instance.provider().get_logs(&filter).await?;
        logs.into_iter().map(decode_governor_log).collect()
    }

    /// New governor events as they are mined, polled through an `eth_newFilter` subscription.
    /// Logs that fail to decode are logged and skipped.
    pub async fn watch_events(&self) -> Result<impl Stream<Item = Decoded<GovernorEvent>> + use<P>> {
        let filter = Filter::new()
            .address(*self.instance.address())
            .event_signature(GovernorEvent::SIGNATURE_HASHES.to_vec());
        let poller = self.instance.provider().watch_logs(&filter).await?;

        Ok(poller
            .into_stream()
            .flat_map(stream::iter)
            .filter_map(|log| {
                future::ready(match decode_governor_log(log) {
                    Ok(decoded) => Some(decoded),
                    Err(e) => {
                        warn!(error = %e, "Dropping undecodable governor log");
                        None
                    }
                })
            }))
    }
}

/// Decodes one raw log, for callers holding logs from elsewhere (receipts, other indexers).
pub fn decode_governor_log(log: Log) -> Result<Decoded<GovernorEvent>> {
    let event = GovernorEvent::decode_log(&log)?;
    Ok(Decoded { event, log })
}
