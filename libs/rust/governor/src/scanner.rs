use crate::error::{Error, Result};
use serde::Deserialize;
use std::{future::Future, ops::RangeInclusive, time::Duration};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    pub initial_chunk: u64,
    pub min_chunk: u64,
    pub max_chunk: u64,
    pub max_retries: u32,
    #[serde(with = "millis")]
    pub retry_delay: Duration,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            initial_chunk: 2_000,
            min_chunk: 10,
            max_chunk: 100_000,
            max_retries: 5,
            retry_delay: Duration::from_secs(1),
        }
    }
}

mod millis {
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome<T> {
    pub items: Vec<T>,
    /// First block not yet covered; persist it to resume later.
    pub next_block: u64,
}

/// Walks a block range in chunks, widening the chunk while the node keeps up and
/// narrowing it when requests fail (range too large, timeouts, rate limits).
#[derive(Debug, Clone)]
pub struct LogScanner {
    config: ScannerConfig,
    chunk: u64,
}

impl LogScanner {
    pub fn new(mut config: ScannerConfig) -> Self {
        config.min_chunk = config.min_chunk.max(1);
        config.max_chunk = config.max_chunk.max(config.min_chunk);
        let chunk = config.initial_chunk.clamp(config.min_chunk, config.max_chunk);
        Self { config, chunk }
    }

    pub fn chunk(&self) -> u64 {
        self.chunk
    }

    fn adjust_chunk(&mut self, success: bool) {
        self.chunk = if success {
            // floor(5c/4) and floor(3c/4) without overflowing near u64::MAX
            std::cmp::min(self.chunk.saturating_add(self.chunk / 4), self.config.max_chunk)
        } else {
            std::cmp::max(self.chunk - self.chunk.div_ceil(4), self.config.min_chunk)
        };
    }

    pub async fn scan<T, F, Fut>(&mut self, blocks: RangeInclusive<u64>, mut fetch: F) -> Result<ScanOutcome<T>>
    where
        F: FnMut(RangeInclusive<u64>) -> Fut,
        Fut: Future<Output = Result<Vec<T>>>,
    {
        let (from, to) = (*blocks.start(), *blocks.end());
        let mut items = Vec::new();
        let mut cursor = from;
        let mut failures = 0u32;

        while cursor <= to {
            let chunk_end = cursor.saturating_add(self.chunk.max(1) - 1).min(to);

            match fetch(cursor..=chunk_end).await {
                Ok(mut batch) => {
                    debug!(
                        from_block = cursor,
                        to_block = chunk_end,
                        items = batch.len(),
                        "Scanned chunk"
                    );
                    items.append(&mut batch);
                    failures = 0;
                    self.adjust_chunk(true);
                    if chunk_end == u64::MAX {
                        break;
                    }
                    cursor = chunk_end + 1;
                }
                Err(e) if !e.is_retryable() => return Err(e),
                Err(e) => {
                    failures += 1;
                    self.adjust_chunk(false);
                    if failures > self.config.max_retries {
                        return Err(Error::ScanExhausted {
                            from: cursor,
                            to: chunk_end,
                            attempts: failures,
                            source: Box::new(e),
                        });
                    }
                    warn!(
                        from_block = cursor,
                        to_block = chunk_end,
                        attempt = failures,
                        next_chunk = self.chunk,
                        error = %e,
                        "Chunk failed, retrying with a smaller range"
                    );
                    tokio::time::sleep(self.config.retry_delay).await;
                }
            }
        }

        info!(from_block = from, to_block = to, items = items.len(), "Scan complete");
        Ok(ScanOutcome {
            items,
            next_block: to.saturating_add(1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::{primitives::B256, transports::TransportErrorKind};
    use proptest::prelude::*;
    use std::sync::{Arc, Mutex};

    fn config() -> ScannerConfig {
        ScannerConfig {
            initial_chunk: 100,
            min_chunk: 10,
            max_chunk: 400,
            max_retries: 2,
            retry_delay: Duration::ZERO,
        }
    }

    fn rpc_failure() -> Error {
        Error::Transport(TransportErrorKind::custom_str("query returned more than 10000 results"))
    }

    #[tokio::test]
    async fn covers_range_without_gaps_or_overlap() {
        let mut scanner = LogScanner::new(config());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let outcome = scanner
            .scan(1_000..=2_000, |range| {
                let seen = seen.clone();
                async move {
                    seen.lock().unwrap().push(range.clone());
                    Ok(range.collect::<Vec<u64>>())
                }
            })
            .await
            .unwrap();

        assert_eq!(outcome.items, (1_000..=2_000).collect::<Vec<_>>());
        assert_eq!(outcome.next_block, 2_001);

        let ranges = seen.lock().unwrap();
        assert_eq!(*ranges[0].start(), 1_000);
        assert_eq!(*ranges[0].end(), 1_099);
        assert_eq!(*ranges[1].end() - *ranges[1].start() + 1, 125, "chunk grows by 5/4");
        for pair in ranges.windows(2) {
            assert_eq!(*pair[0].end() + 1, *pair[1].start());
        }
    }

    #[tokio::test]
    async fn shrinks_chunk_after_failure() {
        let mut scanner = LogScanner::new(config());
        let mut calls = 0;

        let outcome = scanner
            .scan(0..=49, |range| {
                calls += 1;
                let fail = calls == 1;
                async move {
                    if fail {
                        Err(rpc_failure())
                    } else {
                        Ok(vec![*range.start()])
                    }
                }
            })
            .await
            .unwrap();

        // 100 -> 75 after the failure, enough to cover the range in one retry.
        assert_eq!(outcome.items, vec![0]);
        assert_eq!(calls, 2);
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        let mut scanner = LogScanner::new(config());

        let err = scanner
            .scan(0..=10_000, |_| async { Err::<Vec<u64>, _>(rpc_failure()) })
            .await
            .unwrap_err();

        match err {
            Error::ScanExhausted { from, attempts, .. } => {
                assert_eq!(from, 0);
                assert_eq!(attempts, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(scanner.chunk(), 42);
    }

    #[tokio::test]
    async fn huge_chunks_do_not_overflow() {
        let mut scanner = LogScanner::new(ScannerConfig {
            initial_chunk: u64::MAX / 2,
            min_chunk: 1,
            max_chunk: u64::MAX,
            ..config()
        });

        let outcome = scanner
            .scan(0..=10, |range| async move { Ok(vec![*range.end()]) })
            .await
            .unwrap();
        assert_eq!(outcome.items, vec![10]);
        assert_eq!(scanner.chunk(), u64::MAX / 2 + u64::MAX / 8);

        for _ in 0..8 {
            scanner.adjust_chunk(true);
        }
        assert_eq!(scanner.chunk(), u64::MAX);
        scanner.adjust_chunk(false);
        assert_eq!(scanner.chunk(), u64::MAX - u64::MAX.div_ceil(4));
    }

    #[tokio::test]
    async fn decode_failures_are_not_retried() {
        let mut scanner = LogScanner::new(config());
        let mut calls = 0;

        let err = scanner
            .scan(0..=1_000, |_| {
                calls += 1;
                async { Err::<Vec<u64>, _>(Error::UnknownEvent(B256::repeat_byte(0xab))) }
            })
            .await
            .unwrap_err();

        assert!(matches!(err, Error::UnknownEvent(_)), "got {err}");
        assert_eq!(calls, 1);
        assert_eq!(scanner.chunk(), 100, "chunk untouched");
    }

    #[test]
    fn chunk_stays_within_bounds() {
        let mut scanner = LogScanner::new(ScannerConfig {
            initial_chunk: 1_000_000,
            ..config()
        });
        assert_eq!(scanner.chunk(), 400);
        scanner.adjust_chunk(true);
        assert_eq!(scanner.chunk(), 400);
        for _ in 0..20 {
            scanner.adjust_chunk(false);
        }
        assert_eq!(scanner.chunk(), 10);
    }

    #[test]
    fn zero_bounds_are_normalized() {
        let scanner = LogScanner::new(ScannerConfig {
            initial_chunk: 0,
            min_chunk: 0,
            max_chunk: 0,
            ..config()
        });
        assert_eq!(scanner.chunk(), 1);
    }

    proptest! {
        #[test]
        fn chunk_never_leaves_bounds(
            min in 1u64..1_000,
            span in 0u64..100_000,
            initial in 0u64..200_000,
            outcomes in proptest::collection::vec(any::<bool>(), 0..64),
        ) {
            let max = min + span;
            let mut scanner = LogScanner::new(ScannerConfig {
                initial_chunk: initial,
                min_chunk: min,
                max_chunk: max,
                ..config()
            });
            for success in outcomes {
                scanner.adjust_chunk(success);
                prop_assert!((min..=max).contains(&scanner.chunk()));
            }
        }
    }

    #[test]
    fn config_from_partial_map() {
        let config: ScannerConfig = serde_json::from_str(r#"{"max_chunk": 5000, "retry_delay": 250}"#).unwrap();
        assert_eq!(config.max_chunk, 5_000);
        assert_eq!(config.retry_delay, Duration::from_millis(250));
        assert_eq!(config.min_chunk, ScannerConfig::default().min_chunk);
    }
}
