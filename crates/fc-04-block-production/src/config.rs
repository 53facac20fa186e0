//! Configuration types for block production.

use crate::error::{ProductionError, Result};
use serde::Deserialize;
use shared_types::constants::MAX_PAYLOAD_LENGTH;

/// Runtime configuration for block assembly.
#[derive(Clone, Debug, Deserialize)]
pub struct BlockProductionConfig {
    /// Maximum payload bytes per block. Bounded by the protocol cap.
    pub max_payload_length: u32,

    /// Maximum candidates pulled from the pool per forging attempt.
    pub max_transaction_candidates: u32,
}

impl Default for BlockProductionConfig {
    fn default() -> Self {
        Self {
            max_payload_length: MAX_PAYLOAD_LENGTH,
            max_transaction_candidates: 10_000,
        }
    }
}

impl BlockProductionConfig {
    /// Validate parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if self.max_payload_length == 0 {
            return Err(ProductionError::InvalidConfig(
                "max_payload_length must be greater than zero".into(),
            ));
        }
        if self.max_payload_length > MAX_PAYLOAD_LENGTH {
            return Err(ProductionError::InvalidConfig(format!(
                "max_payload_length above protocol cap {MAX_PAYLOAD_LENGTH}"
            )));
        }
        if self.max_transaction_candidates == 0 {
            return Err(ProductionError::InvalidConfig(
                "max_transaction_candidates must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = BlockProductionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_payload_length, MAX_PAYLOAD_LENGTH);
    }

    #[test]
    fn test_cap_enforced() {
        let config = BlockProductionConfig {
            max_payload_length: MAX_PAYLOAD_LENGTH + 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
