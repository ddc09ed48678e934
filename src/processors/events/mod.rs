pub mod block_aggregator;
pub mod vote;

pub use block_aggregator::{BatchSummary, BlockAggregator, BlockOutcome};
pub use vote::TransactionClassifier;
