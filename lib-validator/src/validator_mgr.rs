//! Validator manager binding.
//!
//! The manager looks up the mining token through KNS exactly once, while it
//! is being constructed, and keeps the resolved resolver and token addresses
//! as plain values. Later changes to the name's records are not picked up.

use lib_kns::{Address, KnsError, Ledger, NameResolutionClient};
use thiserror::Error;
use tracing::info;

use crate::config::ValidatorMgrParams;

#[derive(Debug, Error)]
pub enum ValidatorMgrError {
    #[error("registry {given} is not hosted by this ledger (expected {expected})")]
    UnknownRegistry { given: Address, expected: Address },

    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    #[error("mining token lookup failed: {0}")]
    Resolution(#[from] KnsError),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ValidatorMgrError {
    /// Revert reason code; resolution failures keep the KNS code
    pub fn reason(&self) -> &'static str {
        match self {
            ValidatorMgrError::UnknownRegistry { .. } => "UnknownRegistry",
            ValidatorMgrError::InvalidParams(_) => "InvalidParams",
            ValidatorMgrError::Resolution(err) => err.reason(),
            ValidatorMgrError::Config(_) => "Config",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorMgr {
    params: ValidatorMgrParams,
    registry: Address,
    kns_resolver: Address,
    mining_token: Address,
}

impl ValidatorMgr {
    /// Construct the manager, resolving the mining token through `registry`.
    ///
    /// Any resolution failure aborts construction.
    pub fn new(
        params: ValidatorMgrParams,
        ledger: &Ledger,
        registry: Address,
    ) -> Result<Self, ValidatorMgrError> {
        params.validate()?;

        if registry != ledger.registry_address() {
            return Err(ValidatorMgrError::UnknownRegistry {
                given: registry,
                expected: ledger.registry_address(),
            });
        }

        let binding = NameResolutionClient::new(ledger).resolve_binding(&params.mining_token_name)?;

        info!(
            "validator manager bound '{}' to token {} via resolver {}",
            binding.name, binding.target, binding.resolver
        );

        Ok(Self {
            params,
            registry,
            kns_resolver: binding.resolver,
            mining_token: binding.target,
        })
    }

    pub fn registry(&self) -> Address {
        self.registry
    }

    /// Resolver the mining token was read from
    pub fn kns_resolver(&self) -> Address {
        self.kns_resolver
    }

    pub fn mining_token(&self) -> Address {
        self.mining_token
    }

    pub fn base_deposit(&self) -> u64 {
        self.params.base_deposit
    }

    pub fn max_num_validators(&self) -> u64 {
        self.params.max_num_validators
    }

    pub fn freeze_period(&self) -> u64 {
        self.params.freeze_period
    }

    pub fn super_node_amount(&self) -> u64 {
        self.params.super_node_amount
    }

    pub fn params(&self) -> &ValidatorMgrParams {
        &self.params
    }
}
