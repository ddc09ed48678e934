use thiserror::Error;

/// A raw block that cannot be turned into a BlockMetric.
///
/// Optional fields never produce this error; they fall back to defaults.
#[derive(Debug, Error)]
pub enum MalformedBlockError {
    #[error("invalid block JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("block is missing required field `{0}`")]
    MissingField(&'static str),

    #[error("block field `{field}` is invalid: expected {expected}, got {found}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
        found: String,
    },

    #[error("parent slot {0} is too large to derive a block id")]
    SlotOverflow(u64),
}

/// Failures talking to the Solana JSON-RPC endpoint.
#[derive(Debug, Error)]
pub enum RpcClientError {
    #[error("request for slot {slot} failed: {source}")]
    Transport {
        slot: u64,
        #[source]
        source: reqwest::Error,
    },

    #[error("request for slot {slot} returned status {status}")]
    Status {
        slot: u64,
        status: reqwest::StatusCode,
    },

    #[error("response for slot {slot} could not be decoded: {source}")]
    Decode {
        slot: u64,
        #[source]
        source: reqwest::Error,
    },
}
