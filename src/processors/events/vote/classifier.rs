use super::constants::{VOTE_DISCRIMINATOR_LEN, VOTE_INSTRUCTION_DISCRIMINATORS, VOTE_PROGRAM_ID};
use serde_json::Value;
use tracing::debug;

/// TransactionClassifier decides whether a JSON-encoded transaction is a simple vote.
///
/// Follows `is_simple_vote` from the vote program: a transaction counts as a vote
/// when any of its instructions is executed by the vote program and carries one of
/// the vote instruction discriminators.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransactionClassifier;

impl TransactionClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify one transaction record from a `getBlock` response.
    ///
    /// Never fails. Missing `accountKeys` or `instructions` are treated as empty,
    /// and undecodable instruction data simply does not match.
    pub fn is_vote(&self, txn: &Value) -> bool {
        let message = &txn["transaction"]["message"];
        let account_keys = message["accountKeys"]
            .as_array()
            .map(Vec::as_slice)
            .unwrap_or_default();
        let instructions = message["instructions"]
            .as_array()
            .map(Vec::as_slice)
            .unwrap_or_default();

        instructions
            .iter()
            .any(|instruction| self.is_vote_instruction(account_keys, instruction))
    }

    /// Check a single instruction against the vote program and discriminator table.
    ///
    /// Instruction data is decoded for every instruction so that undecodable
    /// payloads are logged whichever program they target.
    pub fn is_vote_instruction(&self, account_keys: &[Value], instruction: &Value) -> bool {
        let data = instruction["data"].as_str().unwrap_or_default();
        let decoded = match bs58::decode(data).into_vec() {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!("⚠️ Failed to decode instruction data {:?}: {}", data, e);
                return false;
            }
        };

        Self::executing_account(account_keys, instruction) == Some(VOTE_PROGRAM_ID)
            && Self::has_vote_discriminator(&decoded)
    }

    /// Resolve `programIdIndex` into the account that executes the instruction.
    fn executing_account<'a>(account_keys: &'a [Value], instruction: &Value) -> Option<&'a str> {
        let index = instruction["programIdIndex"].as_u64()?;
        let index = usize::try_from(index).ok()?;
        account_keys.get(index)?.as_str()
    }

    fn has_vote_discriminator(data: &[u8]) -> bool {
        data.get(..VOTE_DISCRIMINATOR_LEN).is_some_and(|prefix| {
            VOTE_INSTRUCTION_DISCRIMINATORS
                .iter()
                .any(|discriminator| discriminator.as_slice() == prefix)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tracing_test::traced_test;

    fn txn(account_keys: Value, instructions: Value) -> Value {
        json!({
            "transaction": {
                "message": {
                    "accountKeys": account_keys,
                    "instructions": instructions,
                }
            }
        })
    }

    fn encode(bytes: &[u8]) -> String {
        bs58::encode(bytes).into_string()
    }

    #[test]
    fn test_compact_update_vote_state_is_vote() {
        let classifier = TransactionClassifier::new();

        // "JnrP9" decodes to 0c 00 00 00
        let vote_txn = txn(
            json!(["some_account", VOTE_PROGRAM_ID]),
            json!([{ "programIdIndex": 1, "data": "JnrP9" }]),
        );
        assert!(classifier.is_vote(&vote_txn));
    }

    #[test]
    fn test_every_discriminator_is_accepted() {
        let classifier = TransactionClassifier::new();

        for tag in [2u32, 6, 8, 9, 12, 13, 14, 15] {
            // Trailing payload after the discriminator must not matter
            let mut data = tag.to_le_bytes().to_vec();
            data.extend_from_slice(&[0xaa, 0xbb, 0xcc]);

            let vote_txn = txn(
                json!([VOTE_PROGRAM_ID]),
                json!([{ "programIdIndex": 0, "data": encode(&data) }]),
            );
            assert!(classifier.is_vote(&vote_txn), "tag {} should be a vote", tag);
        }
    }

    #[test]
    fn test_other_vote_program_instructions_are_not_votes() {
        let classifier = TransactionClassifier::new();

        // InitializeAccount, Authorize, Withdraw, UpdateValidatorIdentity, ...
        for tag in [0u32, 1, 3, 4, 5, 7, 10, 11, 16, 256] {
            let non_vote_txn = txn(
                json!([VOTE_PROGRAM_ID]),
                json!([{ "programIdIndex": 0, "data": encode(&tag.to_le_bytes()) }]),
            );
            assert!(!classifier.is_vote(&non_vote_txn), "tag {} should not be a vote", tag);
        }
    }

    #[test]
    fn test_non_vote_program_is_not_vote() {
        let classifier = TransactionClassifier::new();

        let non_vote_txn = txn(
            json!(["some_account", "other_account"]),
            json!([{ "programIdIndex": 1, "data": "somedata" }]),
        );
        assert!(!classifier.is_vote(&non_vote_txn));

        // A vote discriminator sent to another program is still not a vote
        let spoofed_txn = txn(
            json!(["some_account", "other_account"]),
            json!([{ "programIdIndex": 1, "data": "JnrP9" }]),
        );
        assert!(!classifier.is_vote(&spoofed_txn));
    }

    #[test]
    fn test_short_data_is_not_vote() {
        let classifier = TransactionClassifier::new();

        let short_txn = txn(
            json!([VOTE_PROGRAM_ID]),
            json!([{ "programIdIndex": 0, "data": encode(&[0x0c, 0x00, 0x00]) }]),
        );
        assert!(!classifier.is_vote(&short_txn));

        let empty_txn = txn(json!([VOTE_PROGRAM_ID]), json!([{ "programIdIndex": 0 }]));
        assert!(!classifier.is_vote(&empty_txn));
    }

    #[test]
    fn test_invalid_base58_is_swallowed() {
        let classifier = TransactionClassifier::new();

        // 0, O, I and l are outside the base58 alphabet
        let invalid_txn = txn(
            json!([VOTE_PROGRAM_ID]),
            json!([{ "programIdIndex": 0, "data": "0OIl" }]),
        );
        assert!(!classifier.is_vote(&invalid_txn));

        // A later valid vote instruction still wins
        let mixed_txn = txn(
            json!([VOTE_PROGRAM_ID]),
            json!([
                { "programIdIndex": 0, "data": "0OIl" },
                { "programIdIndex": 0, "data": "JnrP9" },
            ]),
        );
        assert!(classifier.is_vote(&mixed_txn));
    }

    #[test]
    fn test_program_id_index_edge_cases() {
        let classifier = TransactionClassifier::new();

        for instruction in [
            json!({ "programIdIndex": 5, "data": "JnrP9" }),
            json!({ "programIdIndex": -1, "data": "JnrP9" }),
            json!({ "programIdIndex": "0", "data": "JnrP9" }),
            json!({ "programIdIndex": null, "data": "JnrP9" }),
            json!({ "programIdIndex": 0.0, "data": "JnrP9" }),
            json!({ "programIdIndex": 1.5, "data": "JnrP9" }),
            json!({ "data": "JnrP9" }),
        ] {
            let t = txn(json!([VOTE_PROGRAM_ID]), json!([instruction.clone()]));
            assert!(!classifier.is_vote(&t), "{} should not be a vote", instruction);
        }
    }

    #[test]
    fn test_missing_message_parts() {
        let classifier = TransactionClassifier::new();

        assert!(!classifier.is_vote(&json!({})));
        assert!(!classifier.is_vote(&txn(json!([VOTE_PROGRAM_ID]), json!([]))));
        assert!(!classifier.is_vote(&json!({
            "transaction": { "message": { "instructions": [{ "programIdIndex": 0, "data": "JnrP9" }] } }
        })));
    }

    #[test]
    fn test_vote_among_multiple_instructions() {
        let classifier = TransactionClassifier::new();

        let multi_txn = txn(
            json!(["ComputeBudget111111111111111111111111111111", VOTE_PROGRAM_ID]),
            json!([
                { "programIdIndex": 0, "data": "3DdGGhkhJbjm" },
                { "programIdIndex": 1, "data": "Mkpwq" },
            ]),
        );
        assert!(classifier.is_vote(&multi_txn));
    }

    #[test]
    fn test_non_string_data_is_empty() {
        let classifier = TransactionClassifier::new();

        for data in [json!(12), json!([12, 0, 0, 0]), json!({ "bytes": "JnrP9" }), json!(true)] {
            let t = txn(
                json!([VOTE_PROGRAM_ID]),
                json!([{ "programIdIndex": 0, "data": data.clone() }]),
            );
            assert!(!classifier.is_vote(&t), "{} should not be a vote", data);
        }
    }

    #[test]
    #[traced_test]
    fn test_decode_failures_logged_for_any_program() {
        let classifier = TransactionClassifier::new();

        let non_vote_txn = txn(
            json!(["some_account", "other_account"]),
            json!([{ "programIdIndex": 1, "data": "0OIl" }]),
        );
        assert!(!classifier.is_vote(&non_vote_txn));
        assert!(logs_contain("Failed to decode instruction data"));
        assert!(logs_contain("0OIl"));
    }
}
