use anyhow::{ensure, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use super::{processor_config::ProcessorConfig, server_args::RunnableConfig};
use crate::{
    processors::{
        block_metrics_processor::BlockMetricsProcessor, raw_block_processor::RawBlockProcessor,
    },
    utils::processor_trait::ProcessorTrait,
};

pub const DEFAULT_DB_POOL_SIZE: u32 = 30;
pub const DEFAULT_BATCH_SIZE: usize = 10;
pub const DEFAULT_FETCH_CONCURRENCY: usize = 1;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IndexerProcessorConfig {
    pub processor_config: ProcessorConfig,
    pub db_config: DbConfig,
    pub rpc_config: RpcConfig,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DbConfig {
    pub postgres_connection_string: String,
    #[serde(default = "DbConfig::default_db_pool_size")]
    pub db_pool_size: u32,
}

impl DbConfig {
    const fn default_db_pool_size() -> u32 {
        DEFAULT_DB_POOL_SIZE
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RpcConfig {
    pub rpc_url: Url,
    pub starting_slot: u64,
    pub num_blocks: u64,
    #[serde(default = "RpcConfig::default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "RpcConfig::default_fetch_concurrency")]
    pub fetch_concurrency: usize,
    #[serde(default = "RpcConfig::default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl RpcConfig {
    const fn default_batch_size() -> usize {
        DEFAULT_BATCH_SIZE
    }

    const fn default_fetch_concurrency() -> usize {
        DEFAULT_FETCH_CONCURRENCY
    }

    const fn default_request_timeout_secs() -> u64 {
        DEFAULT_REQUEST_TIMEOUT_SECS
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// First slot past the configured range
    pub fn ending_slot(&self) -> u64 {
        self.starting_slot.saturating_add(self.num_blocks)
    }
}

impl IndexerProcessorConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.db_config.db_pool_size > 0, "db_pool_size must be positive");
        ensure!(self.rpc_config.batch_size > 0, "batch_size must be positive");
        ensure!(
            self.rpc_config.fetch_concurrency > 0,
            "fetch_concurrency must be positive"
        );
        if let ProcessorConfig::BlockMetricsProcessor(config) = &self.processor_config {
            ensure!(
                config.metrics_batch_size > 0,
                "metrics_batch_size must be positive"
            );
        }
        Ok(())
    }
}

#[async_trait]
impl RunnableConfig for IndexerProcessorConfig {
    async fn run(&self) -> Result<()> {
        self.validate()?;
        match &self.processor_config {
            ProcessorConfig::RawBlockProcessor => {
                RawBlockProcessor::new(self.clone())
                    .await?
                    .run_processor()
                    .await
            }
            ProcessorConfig::BlockMetricsProcessor(_) => {
                BlockMetricsProcessor::new(self.clone())
                    .await?
                    .run_processor()
                    .await
            }
        }
    }

    fn get_server_name(&self) -> String {
        self.processor_config.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::processor_config::BlockMetricsProcessorConfig;

    const RAW_CONFIG: &str = r#"
processor_config:
  type: raw_block_processor
db_config:
  postgres_connection_string: postgres://postgres@localhost:5432/solana
rpc_config:
  rpc_url: https://api.mainnet-beta.solana.com
  starting_slot: 305000000
  num_blocks: 100
"#;

    const METRICS_CONFIG: &str = r#"
processor_config:
  type: block_metrics_processor
  metrics_batch_size: 250
db_config:
  postgres_connection_string: postgres://postgres@localhost:5432/solana
  db_pool_size: 5
rpc_config:
  rpc_url: http://localhost:8899
  starting_slot: 0
  num_blocks: 0
  batch_size: 20
  fetch_concurrency: 4
  request_timeout_secs: 10
"#;

    #[test]
    fn test_raw_config_defaults() {
        let config: IndexerProcessorConfig = serde_yaml::from_str(RAW_CONFIG).unwrap();

        assert_eq!(config.processor_config, ProcessorConfig::RawBlockProcessor);
        assert_eq!(config.processor_config.name(), "raw_block_processor");
        assert_eq!(config.db_config.db_pool_size, DEFAULT_DB_POOL_SIZE);
        assert_eq!(config.rpc_config.batch_size, DEFAULT_BATCH_SIZE);
        assert_eq!(config.rpc_config.fetch_concurrency, DEFAULT_FETCH_CONCURRENCY);
        assert_eq!(config.rpc_config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.rpc_config.ending_slot(), 305000100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_metrics_config() {
        let config: IndexerProcessorConfig = serde_yaml::from_str(METRICS_CONFIG).unwrap();

        assert_eq!(
            config.processor_config,
            ProcessorConfig::BlockMetricsProcessor(BlockMetricsProcessorConfig {
                metrics_batch_size: 250
            })
        );
        assert_eq!(config.get_server_name(), "block_metrics_processor");
        assert_eq!(config.db_config.db_pool_size, 5);
        assert_eq!(config.rpc_config.fetch_concurrency, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_metrics_batch_size_defaults() {
        let yaml = METRICS_CONFIG.replace("  metrics_batch_size: 250\n", "");
        let config: IndexerProcessorConfig = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(
            config.processor_config,
            ProcessorConfig::BlockMetricsProcessor(BlockMetricsProcessorConfig::default())
        );
    }

    #[test]
    fn test_validate_rejects_zero_sizes() {
        let mut config: IndexerProcessorConfig = serde_yaml::from_str(METRICS_CONFIG).unwrap();
        config.rpc_config.batch_size = 0;
        assert!(config.validate().is_err());

        let mut config: IndexerProcessorConfig = serde_yaml::from_str(METRICS_CONFIG).unwrap();
        config.processor_config =
            ProcessorConfig::BlockMetricsProcessor(BlockMetricsProcessorConfig {
                metrics_batch_size: 0,
            });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let yaml = RAW_CONFIG.replace("num_blocks: 100", "num_blocks: 100\n  rpc_token: abc");
        assert!(serde_yaml::from_str::<IndexerProcessorConfig>(&yaml).is_err());
    }
}
