// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! # Configuration Management
//!
//! This module handles all configuration aspects of the block metrics indexer,
//! including processor selection, database connections, and RPC parameters.
//!
//! ## Configuration Structure
//!
//! The configuration system is hierarchical:
//! - **IndexerProcessorConfig**: Top-level configuration container
//! - **ProcessorConfig**: Which pipeline to run and its own settings
//! - **DbConfig**: Database connection and pooling parameters
//! - **RpcConfig**: Solana RPC endpoint and slot range
//!
//! ## Configuration Sources
//!
//! Configuration is loaded from a YAML file passed with `--config-path`.
//! Log verbosity follows `RUST_LOG`.
//!
//! ## Validation
//!
//! Batch sizes, fetch concurrency and pool size must be positive; unknown
//! keys are rejected at parse time.

/// Main indexer processor configuration including all subsystem settings
pub mod indexer_processor_config;

/// Processor type definitions and processor-specific options
pub mod processor_config;

/// Command-line arguments, config loading and logging setup
pub mod server_args;
