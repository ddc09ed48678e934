use diesel::prelude::*;
use field_count::FieldCount;
use serde::{Deserialize, Serialize};

use crate::db::postgres::schema::raw_blocks;

/// Verbatim `getBlock` response for one slot
#[derive(Debug, Deserialize, Serialize, Clone, FieldCount, Insertable)]
#[diesel(table_name = raw_blocks)]
pub struct NewRawBlock {
    pub block_id: i64,
    pub raw: String,
}
