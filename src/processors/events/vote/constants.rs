// Vote program constants
// Reference: https://docs.rs/solana-program/2.1.13/src/solana_program/vote/instruction.rs.html
pub const VOTE_PROGRAM_ID: &str = "Vote111111111111111111111111111111111111111";

// Discriminators are the little-endian u32 tag of the VoteInstruction variant
pub const VOTE_DISCRIMINATOR_LEN: usize = 4;

pub const VOTE: [u8; VOTE_DISCRIMINATOR_LEN] = 2u32.to_le_bytes();
pub const VOTE_SWITCH: [u8; VOTE_DISCRIMINATOR_LEN] = 6u32.to_le_bytes();
pub const UPDATE_VOTE_STATE: [u8; VOTE_DISCRIMINATOR_LEN] = 8u32.to_le_bytes();
pub const UPDATE_VOTE_STATE_SWITCH: [u8; VOTE_DISCRIMINATOR_LEN] = 9u32.to_le_bytes();
pub const COMPACT_UPDATE_VOTE_STATE: [u8; VOTE_DISCRIMINATOR_LEN] = 12u32.to_le_bytes();
pub const COMPACT_UPDATE_VOTE_STATE_SWITCH: [u8; VOTE_DISCRIMINATOR_LEN] = 13u32.to_le_bytes();
pub const TOWER_SYNC: [u8; VOTE_DISCRIMINATOR_LEN] = 14u32.to_le_bytes();
pub const TOWER_SYNC_SWITCH: [u8; VOTE_DISCRIMINATOR_LEN] = 15u32.to_le_bytes();

// Instructions accepted by is_simple_vote
pub const VOTE_INSTRUCTION_DISCRIMINATORS: [[u8; VOTE_DISCRIMINATOR_LEN]; 8] = [
    VOTE,
    VOTE_SWITCH,
    UPDATE_VOTE_STATE,
    UPDATE_VOTE_STATE_SWITCH,
    COMPACT_UPDATE_VOTE_STATE,
    COMPACT_UPDATE_VOTE_STATE_SWITCH,
    TOWER_SYNC,
    TOWER_SYNC_SWITCH,
];
