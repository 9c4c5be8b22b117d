//! Batch scheduling: windowed-concurrent or strict sequential.
//!
//! The scheduler fans an ordered list of specs out to the executor and
//! aggregates results in input order. Mode selection is a separate pre-pass
//! so the PATCH rule is independently testable.

use std::time::Duration;

use futures::future::join_all;
use log::{debug, info};
use serde_json::Value;

use crate::config::{CONCURRENT_WINDOW_DELAY, DEFAULT_BATCH_CONCURRENCY, SEQUENTIAL_ITEM_DELAY};
use crate::error_handling::EngineError;
use crate::request::{HttpMethod, RequestSpec};
use crate::retry::RetryStrategy;

use super::{executor, NetSuiteClient};

/// How a batch will be executed, decided before any request is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Fixed-size windows dispatched in parallel.
    Concurrent {
        /// Items per window.
        window: usize,
    },
    /// One item at a time, in input order.
    Sequential,
}

impl ExecutionMode {
    /// Classifies a batch.
    ///
    /// Any PATCH item forces sequential execution regardless of the requested
    /// concurrency: partial updates against line items sharing a parent
    /// record must not race, and the upstream API offers no compare-and-swap
    /// across them.
    pub fn classify(specs: &[RequestSpec], concurrency: usize) -> Self {
        if specs.iter().any(|spec| spec.method == HttpMethod::Patch) {
            ExecutionMode::Sequential
        } else {
            ExecutionMode::Concurrent {
                window: concurrency.max(1),
            }
        }
    }
}

/// Options for a batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Requested window size for concurrent mode.
    pub concurrency: usize,
    /// Delay between windows (concurrent) or items (sequential). `None`
    /// selects the mode's default; sequential's default is the longer one.
    pub inter_batch_delay: Option<Duration>,
    /// Retry strategy applied to every item.
    pub strategy: RetryStrategy,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_BATCH_CONCURRENCY,
            inter_batch_delay: None,
            strategy: RetryStrategy::default(),
        }
    }
}

/// Runs an ordered batch, aborting on the first unrecovered item failure.
///
/// Results preserve the caller's input order for the surviving portion of
/// the run; failures are wrapped with the item's index and endpoint.
pub(super) async fn run(
    client: &NetSuiteClient,
    specs: Vec<RequestSpec>,
    options: BatchOptions,
) -> Result<Vec<Value>, EngineError> {
    if specs.is_empty() {
        return Ok(Vec::new());
    }

    let policy = options.strategy.policy();
    match ExecutionMode::classify(&specs, options.concurrency) {
        ExecutionMode::Sequential => {
            info!(
                "Batch contains PATCH operations; running {} items sequentially",
                specs.len()
            );
            let delay = options.inter_batch_delay.unwrap_or(SEQUENTIAL_ITEM_DELAY);
            let total = specs.len();
            let mut results = Vec::with_capacity(total);

            for (index, spec) in specs.iter().enumerate() {
                debug!("Sequential item {}/{total}: {}", index + 1, spec.endpoint);
                match executor::execute(client, spec, &policy).await {
                    Ok(value) => results.push(value),
                    Err(source) => {
                        return Err(EngineError::Batch {
                            index,
                            endpoint: spec.endpoint.clone(),
                            source: Box::new(source),
                        })
                    }
                }
                if index + 1 < total && !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }
            Ok(results)
        }

        ExecutionMode::Concurrent { window } => {
            let delay = options.inter_batch_delay.unwrap_or(CONCURRENT_WINDOW_DELAY);
            let total = specs.len();
            let mut results = Vec::with_capacity(total);

            for (chunk_index, chunk) in specs.chunks(window).enumerate() {
                let base = chunk_index * window;
                debug!(
                    "Dispatching window of {} items ({}..{} of {total})",
                    chunk.len(),
                    base,
                    base + chunk.len()
                );

                // The whole window settles before any member's failure is
                // surfaced; in-flight siblings run to completion
                let settled = join_all(
                    chunk
                        .iter()
                        .map(|spec| executor::execute(client, spec, &policy)),
                )
                .await;

                for (offset, outcome) in settled.into_iter().enumerate() {
                    match outcome {
                        Ok(value) => results.push(value),
                        Err(source) => {
                            return Err(EngineError::Batch {
                                index: base + offset,
                                endpoint: chunk[offset].endpoint.clone(),
                                source: Box::new(source),
                            })
                        }
                    }
                }

                if base + window < total && !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }
            Ok(results)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_all_reads_is_concurrent() {
        let specs = vec![RequestSpec::get("/a"), RequestSpec::get("/b")];
        assert_eq!(
            ExecutionMode::classify(&specs, 5),
            ExecutionMode::Concurrent { window: 5 }
        );
    }

    #[test]
    fn test_classify_any_patch_forces_sequential() {
        let specs = vec![
            RequestSpec::get("/services/rest/record/v1/salesOrder/7"),
            RequestSpec::patch(
                "/services/rest/record/v1/salesOrder/7/item/1",
                json!({"quantity": 2}),
            ),
        ];
        // Requested concurrency is irrelevant once a PATCH is present
        assert_eq!(
            ExecutionMode::classify(&specs, 10),
            ExecutionMode::Sequential
        );
    }

    #[test]
    fn test_classify_clamps_zero_concurrency() {
        let specs = vec![RequestSpec::get("/a")];
        assert_eq!(
            ExecutionMode::classify(&specs, 0),
            ExecutionMode::Concurrent { window: 1 }
        );
    }

    #[test]
    fn test_default_options() {
        let options = BatchOptions::default();
        assert_eq!(options.concurrency, DEFAULT_BATCH_CONCURRENCY);
        assert!(options.inter_batch_delay.is_none());
        assert_eq!(options.strategy, RetryStrategy::Standard);
    }
}
