//! Validator manager construction parameters.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::validator_mgr::ValidatorMgrError;

/// Name the mining token is published under
pub const DEFAULT_MINING_TOKEN_NAME: &str = "miningtoken.kowala";

/// Parameters fixed at construction
///
/// ```toml
/// base_deposit = 1
/// max_num_validators = 2
/// freeze_period = 3
/// super_node_amount = 1
/// mining_token_name = "miningtoken.kowala"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ValidatorMgrParams {
    /// Minimum deposit in mining tokens
    pub base_deposit: u64,
    pub max_num_validators: u64,
    /// Days a deposit stays locked after leaving
    pub freeze_period: u64,
    /// Deposit that makes a validator a super node
    pub super_node_amount: u64,
    pub mining_token_name: String,
}

impl Default for ValidatorMgrParams {
    fn default() -> Self {
        Self {
            base_deposit: 1,
            max_num_validators: 100,
            freeze_period: 0,
            super_node_amount: 0,
            mining_token_name: DEFAULT_MINING_TOKEN_NAME.to_string(),
        }
    }
}

impl ValidatorMgrParams {
    pub fn new(base_deposit: u64, max_num_validators: u64, freeze_period: u64, super_node_amount: u64) -> Self {
        Self {
            base_deposit,
            max_num_validators,
            freeze_period,
            super_node_amount,
            ..Self::default()
        }
    }

    pub fn with_mining_token_name(mut self, name: impl Into<String>) -> Self {
        self.mining_token_name = name.into();
        self
    }

    pub fn validate(&self) -> Result<(), ValidatorMgrError> {
        if self.max_num_validators == 0 {
            return Err(ValidatorMgrError::InvalidParams(
                "max_num_validators must be at least 1".to_string(),
            ));
        }
        if self.mining_token_name.trim().is_empty() {
            return Err(ValidatorMgrError::InvalidParams(
                "mining_token_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ValidatorMgrError> {
        toml::from_str(raw).map_err(|e| ValidatorMgrError::Config(e.to_string()))
    }
}

pub fn load_params(path: &Path) -> Result<ValidatorMgrParams, ValidatorMgrError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| ValidatorMgrError::Config(format!("{}: {}", path.display(), e)))?;
    ValidatorMgrParams::from_toml_str(&raw)
}
