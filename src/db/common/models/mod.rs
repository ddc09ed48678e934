pub mod block_metric_models;
pub mod raw_block_models;
