use chrono::NaiveDateTime;
use diesel::prelude::*;
use field_count::FieldCount;
use serde::{Deserialize, Serialize};

use crate::db::postgres::schema::block_metrics;

/// Flat row in `block_metrics` column order:
/// (block_id, block_timestamp, block_hash, total_txns, total_non_vote_txns,
/// total_vote_txns, total_fees, total_compute)
pub type BlockMetricTuple = (i64, NaiveDateTime, Option<String>, i64, i64, i64, i64, i64);

/// Aggregates for one block, built once by the BlockAggregator.
///
/// `total_txns == total_non_vote_txns + total_vote_txns` always holds.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, FieldCount, Insertable)]
#[diesel(table_name = block_metrics)]
pub struct BlockMetric {
    pub block_id: i64,
    pub block_timestamp: NaiveDateTime,
    pub block_hash: Option<String>,
    pub total_txns: i64,
    pub total_non_vote_txns: i64,
    pub total_vote_txns: i64,
    pub total_fees: i64,
    pub total_compute: i64,
}

impl BlockMetric {
    pub fn into_tuple(self) -> BlockMetricTuple {
        (
            self.block_id,
            self.block_timestamp,
            self.block_hash,
            self.total_txns,
            self.total_non_vote_txns,
            self.total_vote_txns,
            self.total_fees,
            self.total_compute,
        )
    }
}

impl From<BlockMetricTuple> for BlockMetric {
    fn from(
        (
            block_id,
            block_timestamp,
            block_hash,
            total_txns,
            total_non_vote_txns,
            total_vote_txns,
            total_fees,
            total_compute,
        ): BlockMetricTuple,
    ) -> Self {
        Self {
            block_id,
            block_timestamp,
            block_hash,
            total_txns,
            total_non_vote_txns,
            total_vote_txns,
            total_fees,
            total_compute,
        }
    }
}
