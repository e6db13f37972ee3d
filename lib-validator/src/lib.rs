//! Validator manager
//!
//! Binds the mining token address by name through KNS at construction.
//! Staking, election and slashing live elsewhere.

pub mod config;
pub mod validator_mgr;

pub use config::{load_params, ValidatorMgrParams, DEFAULT_MINING_TOKEN_NAME};
pub use validator_mgr::{ValidatorMgr, ValidatorMgrError};
