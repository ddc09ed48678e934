use anyhow::{Context, Result};
use async_trait::async_trait;
use field_count::FieldCount;
use futures::{stream, StreamExt};
use serde_json::Value;
use std::ops::Range;
use tracing::{info, warn};

use crate::{
    config::indexer_processor_config::IndexerProcessorConfig,
    db::{common::models::raw_block_models::NewRawBlock, postgres::schema::raw_blocks},
    utils::{
        database::{execute_in_chunks, new_db_pool, run_migrations, ArcDbPool},
        errors::RpcClientError,
        processor_trait::{ProcessorName, ProcessorTrait},
        rpc::SolanaRpcClient,
        starting_slot::get_starting_slot,
    },
};

/// RawBlockFetcher walks a slot range in fixed-size batches of `getBlock` calls.
pub struct RawBlockFetcher {
    client: SolanaRpcClient,
    next_slot: u64,
    ending_slot: u64,
    batch_size: usize,
    fetch_concurrency: usize,
}

impl RawBlockFetcher {
    pub fn new(
        client: SolanaRpcClient,
        slots: Range<u64>,
        batch_size: usize,
        fetch_concurrency: usize,
    ) -> Self {
        Self {
            client,
            next_slot: slots.start,
            ending_slot: slots.end,
            batch_size: batch_size.max(1),
            fetch_concurrency: fetch_concurrency.max(1),
        }
    }

    /// Advance the cursor and return the slots of the next batch, or None when done.
    fn next_slot_range(&mut self) -> Option<Range<u64>> {
        if self.next_slot >= self.ending_slot {
            return None;
        }
        let start = self.next_slot;
        let end = start
            .saturating_add(self.batch_size as u64)
            .min(self.ending_slot);
        self.next_slot = end;
        Some(start..end)
    }

    /// Fetch the next batch of blocks in slot order.
    ///
    /// Returns None once the range is exhausted. Skipped slots and failed
    /// requests are logged and left out, so a batch may be empty.
    pub async fn fetch_next_batch(&mut self) -> Option<Vec<(u64, Value)>> {
        let slots = self.next_slot_range()?;
        let client = &self.client;

        let responses: Vec<(u64, Result<Value, RpcClientError>)> = stream::iter(slots)
            .map(|slot| async move {
                info!("🔍 Fetching details for block {}...", slot);
                (slot, client.get_block(slot).await)
            })
            .buffered(self.fetch_concurrency)
            .collect()
            .await;

        Some(
            responses
                .into_iter()
                .filter_map(|(slot, response)| accept_block(slot, response))
                .collect(),
        )
    }
}

/// Keep a response only if it carries a block.
fn accept_block(slot: u64, response: Result<Value, RpcClientError>) -> Option<(u64, Value)> {
    match response {
        Ok(block) if block.get("result").is_some_and(|result| !result.is_null()) => {
            Some((slot, block))
        }
        Ok(block) => {
            // Leader skipped the slot or the node pruned it
            warn!(
                "⏭️ Block {} is skipped: {}",
                slot,
                block.get("error").unwrap_or(&serde_json::Value::Null)
            );
            None
        }
        Err(e) => {
            warn!("❌ Error fetching block {}: {}", slot, e);
            None
        }
    }
}

/// Serialize fetched blocks into `raw_blocks` rows.
pub fn to_raw_rows(batch: &[(u64, Value)]) -> Result<Vec<NewRawBlock>> {
    batch
        .iter()
        .map(|(slot, block)| {
            Ok(NewRawBlock {
                block_id: i64::try_from(*slot)
                    .with_context(|| format!("Slot {} does not fit in BIGINT", slot))?,
                raw: serde_json::to_string(block)?,
            })
        })
        .collect()
}

/// RawBlockProcessor copies `getBlock` responses for a slot range into `raw_blocks`.
pub struct RawBlockProcessor {
    config: IndexerProcessorConfig,
    db_pool: ArcDbPool,
}

impl RawBlockProcessor {
    pub async fn new(config: IndexerProcessorConfig) -> Result<Self> {
        info!("🚀 Initializing RawBlockProcessor");

        let db_pool = new_db_pool(
            &config.db_config.postgres_connection_string,
            Some(config.db_config.db_pool_size),
        )
        .await
        .context("Failed to create connection pool")?;
        info!(
            "🔌 Database connection pool created with size: {}",
            config.db_config.db_pool_size
        );

        Ok(Self { config, db_pool })
    }

    async fn insert_raw_blocks(&self, rows: &[NewRawBlock]) -> Result<usize> {
        execute_in_chunks(
            self.db_pool.clone(),
            |chunk: &[NewRawBlock]| {
                diesel::insert_into(raw_blocks::table)
                    .values(chunk.to_vec())
                    .on_conflict(raw_blocks::block_id)
                    .do_nothing()
            },
            rows,
            NewRawBlock::field_count(),
        )
        .await
    }
}

impl ProcessorName for RawBlockProcessor {
    fn name(&self) -> &'static str {
        self.config.processor_config.name()
    }
}

#[async_trait]
impl ProcessorTrait for RawBlockProcessor {
    async fn run_processor(self) -> Result<()> {
        let rpc_config = &self.config.rpc_config;
        info!("▶️ Starting {} using RPC: {}", self.name(), rpc_config.rpc_url);

        run_migrations(self.config.db_config.postgres_connection_string.clone()).await?;

        let starting_slot = get_starting_slot(&self.config, self.db_pool.clone()).await?;
        let ending_slot = rpc_config.ending_slot();
        info!(
            "📌 Fetching slots [{}, {}) with batch size {}",
            starting_slot, ending_slot, rpc_config.batch_size
        );

        let client = SolanaRpcClient::new(rpc_config.rpc_url.clone(), rpc_config.request_timeout());
        let mut fetcher = RawBlockFetcher::new(
            client,
            starting_slot..ending_slot,
            rpc_config.batch_size,
            rpc_config.fetch_concurrency,
        );

        let mut total_inserted = 0;
        while let Some(batch) = fetcher.fetch_next_batch().await {
            let (Some((first_block, _)), Some((last_block, _))) = (batch.first(), batch.last())
            else {
                continue;
            };

            let rows = to_raw_rows(&batch)?;
            let inserted = self.insert_raw_blocks(&rows).await?;
            total_inserted += inserted;
            info!(
                "✅ Inserted blocks {} to {} into raw_blocks ({} new)",
                first_block, last_block, inserted
            );
        }

        info!("🏁 {} finished, {} raw blocks inserted", self.name(), total_inserted);
        Ok(())
    }
}
