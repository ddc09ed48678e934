use super::database::ArcDbPool;
use crate::{
    config::indexer_processor_config::IndexerProcessorConfig, db::postgres::schema::raw_blocks,
};
use anyhow::{Context, Result};
use diesel::{ExpressionMethods, QueryDsl};
use diesel_async::RunQueryDsl;
use tracing::info;

/// Get the slot the raw block processor should start from.
///
/// Starts at `starting_slot` from the config, or at the first slot of the
/// configured range missing from `raw_blocks`. Slots dropped by an earlier run
/// are therefore fetched again; anything already stored past the gap is left
/// to `ON CONFLICT DO NOTHING`.
pub async fn get_starting_slot(
    indexer_processor_config: &IndexerProcessorConfig,
    conn_pool: ArcDbPool,
) -> Result<u64> {
    let rpc_config = &indexer_processor_config.rpc_config;
    let range_start = i64::try_from(rpc_config.starting_slot).context("starting_slot too large")?;
    let range_end = i64::try_from(rpc_config.ending_slot()).unwrap_or(i64::MAX);

    let mut conn = conn_pool
        .get()
        .await
        .context("Failed to get a database connection")?;
    let stored_slots: Vec<i64> = raw_blocks::table
        .filter(raw_blocks::block_id.ge(range_start))
        .filter(raw_blocks::block_id.lt(range_end))
        .select(raw_blocks::block_id)
        .order(raw_blocks::block_id.asc())
        .load(&mut conn)
        .await
        .context("Failed to query stored slots")?;

    let starting_slot = resume_slot(rpc_config.starting_slot, &stored_slots);
    if starting_slot != rpc_config.starting_slot {
        info!(
            "⏩ Slots {} to {} already stored, resuming at {}",
            rpc_config.starting_slot,
            starting_slot - 1,
            starting_slot
        );
    }
    info!("🚀 Using starting slot: {}", starting_slot);
    Ok(starting_slot)
}

/// First slot at or after `configured` that is not in `stored_slots` (ascending).
fn resume_slot(configured: u64, stored_slots: &[i64]) -> u64 {
    let mut next = configured;
    for slot in stored_slots.iter().filter_map(|slot| u64::try_from(*slot).ok()) {
        if slot < next {
            continue;
        }
        if slot > next {
            break;
        }
        next = next.saturating_add(1);
    }
    next
}
