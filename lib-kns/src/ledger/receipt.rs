//! Transaction Receipt Types
//!
//! A receipt reports whether a transaction committed. Failed transactions
//! carry the revert reason code verbatim and commit nothing.

use lib_types::{Address, BlockHeight, TxHash};
use serde::{Deserialize, Serialize};

use crate::errors::KnsError;
use crate::events::KnsEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    /// Committed; state and events visible to readers
    Success,
    /// Rejected; nothing committed
    Failed,
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::Success => write!(f, "Success"),
            TransactionStatus::Failed => write!(f, "Failed"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionReceipt {
    pub tx_hash: TxHash,
    /// Height the transaction committed at, or the current height if it failed
    pub block_height: BlockHeight,
    pub status: TransactionStatus,
    /// Taxonomy code (`NotAuthorized`, `AlreadyRegistered`, ...)
    pub revert_reason: Option<String>,
    /// Full error message
    pub message: Option<String>,
    /// Address of the contract created by a deployment
    pub contract_address: Option<Address>,
    pub events: Vec<KnsEvent>,
}

impl TransactionReceipt {
    pub fn success(
        tx_hash: TxHash,
        block_height: BlockHeight,
        contract_address: Option<Address>,
        events: Vec<KnsEvent>,
    ) -> Self {
        Self {
            tx_hash,
            block_height,
            status: TransactionStatus::Success,
            revert_reason: None,
            message: None,
            contract_address,
            events,
        }
    }

    pub fn failed(tx_hash: TxHash, block_height: BlockHeight, error: &KnsError) -> Self {
        Self {
            tx_hash,
            block_height,
            status: TransactionStatus::Failed,
            revert_reason: Some(error.reason().to_string()),
            message: Some(error.to_string()),
            contract_address: None,
            events: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == TransactionStatus::Success
    }
}
