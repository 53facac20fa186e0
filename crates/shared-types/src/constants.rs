//! Chain protocol constants.
//!
//! Every value here is consensus-normative: changing one is a protocol
//! change that forks the chain.

/// Chain epoch reference instant, 2021-03-21T13:00:00Z, as a unix timestamp.
/// All block timestamps are whole seconds elapsed since this instant.
pub const EPOCH_START_UNIX: i64 = 1_616_331_600;

/// Seconds per forging slot.
pub const BLOCK_TIME_SECS: u32 = 8;

/// Number of active delegates per round (one slot each).
pub const ACTIVE_DELEGATES: u32 = 51;

/// Maximum block payload size in bytes.
pub const MAX_PAYLOAD_LENGTH: u32 = 1_048_576;

/// Total token supply in base units (10^8 base units per token).
/// Upper bound for any single balance or amount field.
pub const TOTAL_SUPPLY: u64 = 12_500_000_000_000_000;

/// Compressed secp256k1 public key length in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 33;

/// Payload digest length in bytes (SHA-256).
pub const PAYLOAD_HASH_LENGTH: usize = 32;

/// Delegate username length bounds.
pub const MIN_USERNAME_LENGTH: usize = 1;
/// Maximum delegate username length.
pub const MAX_USERNAME_LENGTH: usize = 20;

/// Maximum number of co-signers in a multisignature group.
pub const MAX_MULTISIG_KEYSGROUP: u32 = 17;

/// Multisignature registration lifetime bounds, in hours.
pub const MIN_MULTISIG_LIFETIME: u32 = 1;
/// Maximum multisignature registration lifetime, in hours.
pub const MAX_MULTISIG_LIFETIME: u32 = 72;

/// Forging reward milestones in base units, applied in order every
/// [`REWARD_DISTANCE`] blocks past [`REWARD_OFFSET`].
pub const REWARD_MILESTONES: [u64; 5] = [
    500_000_000,
    400_000_000,
    300_000_000,
    200_000_000,
    100_000_000,
];

/// Height at which forging rewards start.
pub const REWARD_OFFSET: u64 = 2_102_400;

/// Number of blocks between reward milestone steps.
pub const REWARD_DISTANCE: u64 = 3_000_000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_grid_constants() {
        assert_eq!(BLOCK_TIME_SECS, 8);
        assert_eq!(ACTIVE_DELEGATES, 51);
    }

    #[test]
    fn test_reward_milestones_decrease() {
        for pair in REWARD_MILESTONES.windows(2) {
            assert!(pair[0] > pair[1]);
        }
    }

    #[test]
    fn test_supply_holds_max_amount_in_u64() {
        // An 8-byte wire field must be able to carry any legal amount.
        assert!(TOTAL_SUPPLY < u64::MAX);
    }
}
