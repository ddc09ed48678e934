use serde::{Deserialize, Serialize};

pub const DEFAULT_METRICS_BATCH_SIZE: i64 = 1000;

/// Which pipeline to run, selected by `processor_config.type` in the YAML file.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq, strum::IntoStaticStr)]
#[serde(tag = "type", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProcessorConfig {
    /// getBlock over the configured slot range into `raw_blocks`
    RawBlockProcessor,
    /// `raw_blocks` into `block_metrics`
    BlockMetricsProcessor(BlockMetricsProcessorConfig),
}

impl ProcessorConfig {
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct BlockMetricsProcessorConfig {
    /// Raw blocks read and written per page
    #[serde(default = "BlockMetricsProcessorConfig::default_metrics_batch_size")]
    pub metrics_batch_size: i64,
}

impl BlockMetricsProcessorConfig {
    const fn default_metrics_batch_size() -> i64 {
        DEFAULT_METRICS_BATCH_SIZE
    }
}

impl Default for BlockMetricsProcessorConfig {
    fn default() -> Self {
        Self {
            metrics_batch_size: DEFAULT_METRICS_BATCH_SIZE,
        }
    }
}
