//! Transactions accepted by the ledger.

use lib_types::{Address, TxHash};
use serde::{Deserialize, Serialize};

use crate::types::Node;

/// Contract call carried by a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KnsCall {
    // Registry
    SetOwner { node: Node, owner: Address },
    SetSubnodeOwner { node: Node, label: String, owner: Address },
    SetResolver { node: Node, resolver: Address },
    SetTtl { node: Node, ttl: u64 },

    // Deployment
    DeployRegistrar { parent_node: Node },
    DeployResolver,

    // Registrar
    Register { registrar: Address, label: String, owner: Address },

    // Resolver
    SetAddr { resolver: Address, node: Node, addr: Address },
    SetName { resolver: Address, node: Node, name: String },
    SetText { resolver: Address, node: Node, key: String, value: String },
    SetContent { resolver: Address, node: Node, hash: [u8; 32] },
    ClearRecords { resolver: Address, node: Node },
}

impl KnsCall {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            KnsCall::SetOwner { .. } => "setOwner",
            KnsCall::SetSubnodeOwner { .. } => "setSubnodeOwner",
            KnsCall::SetResolver { .. } => "setResolver",
            KnsCall::SetTtl { .. } => "setTTL",
            KnsCall::DeployRegistrar { .. } => "deployRegistrar",
            KnsCall::DeployResolver => "deployResolver",
            KnsCall::Register { .. } => "register",
            KnsCall::SetAddr { .. } => "setAddr",
            KnsCall::SetName { .. } => "setName",
            KnsCall::SetText { .. } => "setText",
            KnsCall::SetContent { .. } => "setContent",
            KnsCall::ClearRecords { .. } => "clearRecords",
        }
    }
}

/// Transaction submitted from an account
///
/// The ledger trusts `from` as already signature-checked by the submission
/// layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub from: Address,
    pub call: KnsCall,
}

impl Transaction {
    pub fn new(from: Address, call: KnsCall) -> Self {
        Self { from, call }
    }

    /// Hash over the canonical JSON encoding plus the ledger sequence number
    pub fn hash(&self, sequence: u64) -> TxHash {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"kns:tx:v1");
        hasher.update(&sequence.to_le_bytes());
        // Serializing plain enums/structs to a Vec cannot fail
        let encoded = serde_json::to_vec(self).unwrap_or_default();
        hasher.update(&encoded);
        TxHash(*hasher.finalize().as_bytes())
    }
}
