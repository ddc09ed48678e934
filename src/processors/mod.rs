// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! # Block Ingestion and Metrics Processors
//!
//! This module contains the core processing logic for turning Solana
//! `getBlock` responses into per-block metrics.
//!
//! ## Main Components
//!
//! ### `raw_block_processor`
//! Walks a slot range against the RPC endpoint and stores every response
//! verbatim in `raw_blocks`. Skipped slots and failed requests are logged
//! and left out without stopping the batch.
//!
//! ### `block_metrics_processor`
//! Pages through `raw_blocks`, derives metrics with the BlockAggregator and
//! upserts them into `block_metrics`.
//!
//! ### `events`
//! The derivation engine itself:
//! - **TransactionClassifier**: vote vs non-vote by program id and discriminator
//! - **BlockAggregator**: per-block counts, fees and compute units, plus the
//!   batch wrapper that isolates malformed blocks
//!
//! ## Data Flow
//!
//! ```text
//! Solana RPC → RawBlockProcessor → raw_blocks
//!                                      ↓
//!   block_metrics ← BlockMetricsProcessor ← BlockAggregator ← TransactionClassifier
//! ```

/// getBlock over a slot range into `raw_blocks`
pub mod raw_block_processor;

/// `raw_blocks` into `block_metrics`
pub mod block_metrics_processor;

/// Vote classification and per-block aggregation
pub mod events;
