// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! # Utility Functions and Shared Components
//!
//! ### Database Utilities (`database`)
//! - Connection pool management, with optional TLS via `sslrootcert`
//! - Embedded migrations
//! - Bulk inserts chunked under the Postgres bind parameter limit
//!
//! ### Solana RPC (`rpc`)
//! - `getBlock` requests against a JSON-RPC endpoint
//!
//! ### Slot Management (`starting_slot`)
//! - Resumes raw ingestion after the last stored slot of the configured range
//!
//! ### Errors (`errors`)
//! - Typed failures for malformed blocks and RPC requests

pub mod database;

pub mod errors;

pub mod processor_trait;

pub mod rpc;

pub mod starting_slot;
