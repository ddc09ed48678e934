use chrono::{DateTime, NaiveDateTime};
use serde_json::Value;
use std::fmt::Display;
use tracing::{debug, info, warn};

use super::vote::TransactionClassifier;
use crate::{
    db::common::models::block_metric_models::{BlockMetric, BlockMetricTuple},
    utils::errors::MalformedBlockError,
};

/// Result of processing one `(identifier, raw_json)` pair
pub type BlockOutcome<I> = (I, Result<BlockMetric, MalformedBlockError>);

/// Counts of a processed batch, logged once per batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub skipped: usize,
}

impl BatchSummary {
    pub fn from_outcomes<I>(outcomes: &[BlockOutcome<I>]) -> Self {
        let skipped = outcomes.iter().filter(|(_, result)| result.is_err()).count();
        Self {
            processed: outcomes.len() - skipped,
            skipped,
        }
    }
}

// Running sums over the transactions of one block
#[derive(Debug, Default)]
struct TransactionTotals {
    total_non_vote_txns: i64,
    total_vote_txns: i64,
    total_fees: i64,
    total_compute: i64,
}

impl TransactionTotals {
    fn add(&mut self, txn: &Value, is_vote: bool) {
        let meta = &txn["meta"];
        self.total_fees = self.total_fees.saturating_add(non_negative(&meta["fee"]));
        self.total_compute = self
            .total_compute
            .saturating_add(non_negative(&meta["computeUnitsConsumed"]));

        if is_vote {
            self.total_vote_txns += 1;
        } else {
            self.total_non_vote_txns += 1;
        }
    }

    fn total_txns(&self) -> i64 {
        self.total_vote_txns + self.total_non_vote_txns
    }
}

// Absent, null, negative or non-integral values count as 0
fn non_negative(value: &Value) -> i64 {
    value
        .as_u64()
        .map(|v| i64::try_from(v).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

fn json_type(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(_) => "a boolean".to_string(),
        Value::Number(n) => format!("number {}", n),
        Value::String(_) => "a string".to_string(),
        Value::Array(_) => "an array".to_string(),
        Value::Object(_) => "an object".to_string(),
    }
}

/// BlockAggregator folds a raw `getBlock` response into a single BlockMetric.
///
/// Stateless: the same input always yields the same metric, and a batch is
/// processed strictly in input order with failures isolated per block.
#[derive(Debug, Clone, Default)]
pub struct BlockAggregator {
    classifier: TransactionClassifier,
}

impl BlockAggregator {
    pub fn new() -> Self {
        Self {
            classifier: TransactionClassifier::new(),
        }
    }

    /// Derive the metrics of one raw block.
    ///
    /// `parentSlot` is required. Missing `blockTime`, `blockhash`, `transactions`
    /// and per-transaction fee or compute values fall back to defaults.
    pub fn process_one(&self, block: &Value) -> Result<BlockMetric, MalformedBlockError> {
        // A missing envelope indexes to null, which behaves like an empty object
        let block_info = &block["result"];

        let block_id = Self::derive_block_id(block_info)?;
        let block_timestamp = Self::derive_block_timestamp(block_info)?;
        let block_hash = block_info["blockhash"].as_str().map(str::to_owned);

        let mut totals = TransactionTotals::default();
        match &block_info["transactions"] {
            Value::Null => {}
            Value::Array(transactions) => {
                for txn in transactions {
                    totals.add(txn, self.classifier.is_vote(txn));
                }
            }
            other => {
                return Err(MalformedBlockError::InvalidField {
                    field: "transactions",
                    expected: "an array",
                    found: json_type(other),
                })
            }
        }

        debug!(
            "🧱 Block {}: {} txns ({} vote, {} non-vote)",
            block_id,
            totals.total_txns(),
            totals.total_vote_txns,
            totals.total_non_vote_txns
        );

        Ok(BlockMetric {
            block_id,
            block_timestamp,
            block_hash,
            total_txns: totals.total_txns(),
            total_non_vote_txns: totals.total_non_vote_txns,
            total_vote_txns: totals.total_vote_txns,
            total_fees: totals.total_fees,
            total_compute: totals.total_compute,
        })
    }

    /// Process every `(identifier, raw_json)` pair, keeping one outcome per input in order.
    pub fn process_items<I, S>(&self, items: &[(I, S)]) -> Vec<BlockOutcome<I>>
    where
        I: Clone,
        S: AsRef<str>,
    {
        items
            .iter()
            .map(|(id, raw_json)| {
                let result = serde_json::from_str::<Value>(raw_json.as_ref())
                    .map_err(MalformedBlockError::from)
                    .and_then(|block| self.process_one(&block));
                (id.clone(), result)
            })
            .collect()
    }

    /// Process a batch of raw blocks into rows ready for bulk insertion.
    ///
    /// Blocks that fail to parse or lack required fields are logged with their
    /// identifier and skipped; the remaining rows keep input order.
    pub fn process_batch<I, S>(&self, items: &[(I, S)]) -> Vec<BlockMetricTuple>
    where
        I: Clone + Display,
        S: AsRef<str>,
    {
        let outcomes = self.process_items(items);
        let summary = BatchSummary::from_outcomes(&outcomes);

        let rows = outcomes
            .into_iter()
            .filter_map(|(id, result)| match result {
                Ok(metric) => Some(metric.into_tuple()),
                Err(e) => {
                    warn!("❌ Error processing block {}: {}", id, e);
                    None
                }
            })
            .collect();

        info!(
            "📊 Computed metrics for {} blocks ({} skipped)",
            summary.processed, summary.skipped
        );
        rows
    }

    fn derive_block_id(block_info: &Value) -> Result<i64, MalformedBlockError> {
        // getBlock does not echo the slot, so rebuild it from the parent
        let parent_slot = match &block_info["parentSlot"] {
            Value::Null => return Err(MalformedBlockError::MissingField("parentSlot")),
            value => value.as_u64().ok_or_else(|| MalformedBlockError::InvalidField {
                field: "parentSlot",
                expected: "a non-negative integer",
                found: json_type(value),
            })?,
        };

        parent_slot
            .checked_add(1)
            .and_then(|slot| i64::try_from(slot).ok())
            .ok_or(MalformedBlockError::SlotOverflow(parent_slot))
    }

    fn derive_block_timestamp(block_info: &Value) -> Result<NaiveDateTime, MalformedBlockError> {
        let block_time = &block_info["blockTime"];
        let seconds = match block_time {
            Value::Null => 0,
            value => value.as_i64().ok_or_else(|| MalformedBlockError::InvalidField {
                field: "blockTime",
                expected: "an integer unix timestamp",
                found: json_type(value),
            })?,
        };

        DateTime::from_timestamp(seconds, 0)
            .map(|dt| dt.naive_utc())
            .ok_or_else(|| MalformedBlockError::InvalidField {
                field: "blockTime",
                expected: "a representable unix timestamp",
                found: json_type(block_time),
            })
    }
}
