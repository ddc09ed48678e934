use anyhow::{Context, Result};
use async_trait::async_trait;
use diesel::{pg::Pg, upsert::excluded, ExpressionMethods, QueryDsl};
use diesel_async::RunQueryDsl;
use field_count::FieldCount;
use tracing::{debug, info};

use crate::{
    config::{
        indexer_processor_config::IndexerProcessorConfig, processor_config::ProcessorConfig,
    },
    db::{
        common::models::block_metric_models::BlockMetric,
        postgres::schema::{block_metrics, raw_blocks},
    },
    processors::events::BlockAggregator,
    utils::{
        database::{execute_in_chunks, new_db_pool, run_migrations, ArcDbPool},
        processor_trait::{ProcessorName, ProcessorTrait},
    },
};

/// BlockMetricsProcessor derives `block_metrics` rows from everything stored in `raw_blocks`.
pub struct BlockMetricsProcessor {
    config: IndexerProcessorConfig,
    db_pool: ArcDbPool,
    block_aggregator: BlockAggregator,
    metrics_batch_size: i64,
}

impl BlockMetricsProcessor {
    pub async fn new(config: IndexerProcessorConfig) -> Result<Self> {
        info!("🚀 Creating BlockMetricsProcessor");

        let metrics_batch_size = match &config.processor_config {
            ProcessorConfig::BlockMetricsProcessor(processor_config) => {
                processor_config.metrics_batch_size
            }
            other => anyhow::bail!("BlockMetricsProcessor cannot run with {} config", other.name()),
        };

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

        Ok(Self {
            config,
            db_pool,
            block_aggregator: BlockAggregator::new(),
            metrics_batch_size,
        })
    }

    /// Next page of `(block_id, raw)` ordered by block id, strictly after `after_block_id`.
    async fn fetch_raw_page(&self, after_block_id: Option<i64>) -> Result<Vec<(i64, String)>> {
        let mut conn = self
            .db_pool
            .get()
            .await
            .context("Failed to get a database connection")?;

        let mut query = raw_blocks::table
            .select((raw_blocks::block_id, raw_blocks::raw))
            .order(raw_blocks::block_id.asc())
            .limit(self.metrics_batch_size)
            .into_boxed::<Pg>();
        if let Some(after_block_id) = after_block_id {
            query = query.filter(raw_blocks::block_id.gt(after_block_id));
        }

        query
            .load::<(i64, String)>(&mut conn)
            .await
            .context("Failed to load raw blocks")
    }

    async fn upsert_block_metrics(&self, metrics: &[BlockMetric]) -> Result<usize> {
        execute_in_chunks(
            self.db_pool.clone(),
            |chunk: &[BlockMetric]| {
                diesel::insert_into(block_metrics::table)
                    .values(chunk.to_vec())
                    .on_conflict(block_metrics::block_id)
                    .do_update()
                    .set((
                        block_metrics::block_timestamp.eq(excluded(block_metrics::block_timestamp)),
                        block_metrics::block_hash.eq(excluded(block_metrics::block_hash)),
                        block_metrics::total_txns.eq(excluded(block_metrics::total_txns)),
                        block_metrics::total_non_vote_txns
                            .eq(excluded(block_metrics::total_non_vote_txns)),
                        block_metrics::total_vote_txns.eq(excluded(block_metrics::total_vote_txns)),
                        block_metrics::total_fees.eq(excluded(block_metrics::total_fees)),
                        block_metrics::total_compute.eq(excluded(block_metrics::total_compute)),
                        block_metrics::inserted_at.eq(diesel::dsl::now),
                    ))
            },
            metrics,
            BlockMetric::field_count(),
        )
        .await
    }
}

impl ProcessorName for BlockMetricsProcessor {
    fn name(&self) -> &'static str {
        self.config.processor_config.name()
    }
}

#[async_trait]
impl ProcessorTrait for BlockMetricsProcessor {
    async fn run_processor(self) -> Result<()> {
        info!(
            "▶️ Starting {} with page size {}",
            self.name(),
            self.metrics_batch_size
        );

        run_migrations(self.config.db_config.postgres_connection_string.clone()).await?;

        let mut after_block_id = None;
        let mut total_written = 0;
        loop {
            let raw_page = self.fetch_raw_page(after_block_id).await?;
            let Some((last_block_id, _)) = raw_page.last() else {
                break;
            };
            after_block_id = Some(*last_block_id);
            debug!(
                "📥 Loaded {} raw blocks up to block {}",
                raw_page.len(),
                last_block_id
            );

            info!("🧮 Computing metrics for blocks...");
            let metrics: Vec<BlockMetric> = self
                .block_aggregator
                .process_batch(&raw_page)
                .into_iter()
                .map(BlockMetric::from)
                .collect();
            if metrics.is_empty() {
                continue;
            }

            let written = self.upsert_block_metrics(&metrics).await?;
            total_written += written;
            info!(
                "✅ Successfully inserted metrics for {} blocks into block_metrics",
                written
            );
        }

        info!("🏁 {} finished, {} block metrics written", self.name(), total_written);
        Ok(())
    }
}
