// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! # Solana Block Metrics Indexer
//!
//! Fetches raw blocks from a Solana RPC endpoint into Postgres and derives
//! per-block transaction, fee, compute and vote metrics from them.

use anyhow::Result;
use clap::Parser;
use solana_block_metrics::config::{
    indexer_processor_config::IndexerProcessorConfig, server_args::ServerArgs,
};

/// Configure jemalloc as the global allocator for better memory management
#[cfg(unix)]
#[global_allocator]
static ALLOC: jemallocator::Jemalloc = jemallocator::Jemalloc;

fn main() -> Result<()> {
    // Use at least 16 threads for concurrent database operations and network I/O
    let num_cpus = num_cpus::get();
    let worker_threads = num_cpus.max(16);

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder
        .enable_all()
        .worker_threads(worker_threads)
        .build()?
        .block_on(async {
            let args = ServerArgs::parse();
            args.run::<IndexerProcessorConfig>().await
        })
}
