use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::Parser;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// A configuration that knows how to run the processor it describes.
#[async_trait]
pub trait RunnableConfig: DeserializeOwned + Send + Sync + 'static {
    async fn run(&self) -> Result<()>;

    fn get_server_name(&self) -> String;
}

#[derive(Parser, Debug)]
#[command(name = "solana-block-metrics", author, version, about, long_about = None)]
pub struct ServerArgs {
    /// Path to the YAML processor configuration
    #[arg(short, long)]
    pub config_path: PathBuf,
}

impl ServerArgs {
    pub async fn run<C: RunnableConfig>(&self) -> Result<()> {
        setup_logging();

        let config: C = load(&self.config_path)?;
        info!(
            "⚙️ Loaded {} config from {}",
            config.get_server_name(),
            self.config_path.display()
        );
        config.run().await
    }
}

/// Read and parse a YAML config file.
pub fn load<C: DeserializeOwned>(path: &Path) -> Result<C> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}

/// Install the global tracing subscriber, honouring `RUST_LOG` and defaulting to `info`.
pub fn setup_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A subscriber may already be installed when embedded in tests
    let _ = tracing_subscriber::registry()
        .with(fmt::layer())
        .with(env_filter)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::indexer_processor_config::IndexerProcessorConfig;

    #[test]
    fn test_parse_config_path() {
        let args = ServerArgs::parse_from(["solana-block-metrics", "--config-path", "config.yaml"]);
        assert_eq!(args.config_path, PathBuf::from("config.yaml"));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = load::<IndexerProcessorConfig>(Path::new("/nonexistent/config.yaml"));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
