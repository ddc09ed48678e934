// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! # Database Layer
//!
//! ## Database Schema
//!
//! - `raw_blocks`: verbatim `getBlock` responses keyed by slot
//! - `block_metrics`: per-block transaction counts, fees and compute units
//!
//! Both tables are keyed by `block_id` (the slot), so re-running either
//! processor over the same range is idempotent: raw inserts ignore
//! conflicts and metric inserts overwrite them.

/// Common database models and shared data structures
pub mod common;

/// PostgreSQL schema and embedded migrations
pub mod postgres;
