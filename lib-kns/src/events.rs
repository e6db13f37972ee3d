//! Name service events for off-chain indexers.
//!
//! Every successful mutation emits one or more events. They are attached to
//! the transaction receipt and appended to the ledger event log. Failed
//! transactions emit nothing.

use lib_types::{Address, BlockHeight, TxHash};
use serde::{Deserialize, Serialize};

use super::types::{ContractKind, LabelHash, Node};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KnsEvent {
    /// Owner of a child node assigned by the parent owner
    NewOwner {
        parent: Node,
        label: LabelHash,
        node: Node,
        owner: Address,
    },

    /// Node ownership transferred by its current owner
    Transfer { node: Node, owner: Address },

    /// Resolver pointer changed
    NewResolver { node: Node, resolver: Address },

    /// TTL changed
    NewTtl { node: Node, ttl: u64 },

    /// Address record changed on a resolver
    AddrChanged {
        resolver: Address,
        node: Node,
        addr: Address,
    },

    /// Name record changed on a resolver
    NameChanged {
        resolver: Address,
        node: Node,
        name: String,
    },

    /// Text record changed on a resolver
    TextChanged {
        resolver: Address,
        node: Node,
        key: String,
    },

    /// Content hash changed on a resolver
    ContentChanged {
        resolver: Address,
        node: Node,
        hash: [u8; 32],
    },

    /// All records for a node dropped from a resolver
    RecordsCleared { resolver: Address, node: Node },

    /// Contract deployed on the ledger
    ContractDeployed {
        kind: ContractKind,
        address: Address,
        deployer: Address,
    },
}

impl std::fmt::Display for KnsEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KnsEvent::NewOwner { node, owner, .. } => write!(f, "NewOwner({:?} -> {:?})", node, owner),
            KnsEvent::Transfer { node, owner } => write!(f, "Transfer({:?} -> {:?})", node, owner),
            KnsEvent::NewResolver { node, resolver } => {
                write!(f, "NewResolver({:?} -> {:?})", node, resolver)
            }
            KnsEvent::NewTtl { node, ttl } => write!(f, "NewTtl({:?} = {})", node, ttl),
            KnsEvent::AddrChanged { node, addr, .. } => write!(f, "AddrChanged({:?} -> {:?})", node, addr),
            KnsEvent::NameChanged { node, name, .. } => write!(f, "NameChanged({:?} = {})", node, name),
            KnsEvent::TextChanged { node, key, .. } => write!(f, "TextChanged({:?}[{}])", node, key),
            KnsEvent::ContentChanged { node, .. } => write!(f, "ContentChanged({:?})", node),
            KnsEvent::RecordsCleared { node, .. } => write!(f, "RecordsCleared({:?})", node),
            KnsEvent::ContractDeployed { kind, address, .. } => {
                write!(f, "ContractDeployed({} at {:?})", kind, address)
            }
        }
    }
}

/// Event as recorded in the ledger log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedEvent {
    pub block_height: BlockHeight,
    pub tx_hash: TxHash,
    pub event: KnsEvent,
}
