//! Name Service Types and State Model
//!
//! Core types for the KNS naming tree:
//! - Node identifiers (namehash output)
//! - Per-node registry records (owner, resolver, ttl)
//! - Name limits

use lib_types::{parse_bytes32, Address, ParseBytesError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Node Identity
// ============================================================================

/// 32-byte node identifier: `H(parent || H(label))` folded from the root
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct Node(pub [u8; 32]);

/// The well-known root of the namespace (all zeros)
pub const ROOT_NODE: Node = Node([0u8; 32]);

impl Node {
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Node {
    type Err = ParseBytesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_bytes32(s).map(Self)
    }
}

impl From<[u8; 32]> for Node {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

// Nodes travel through config files and indexer payloads, so they serialize
// as 0x-prefixed hex rather than a 32-element array.
impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// 32-byte hash of a single label
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct LabelHash(pub [u8; 32]);

// ============================================================================
// Registry Record
// ============================================================================

/// Registry entry for one node
///
/// A node with a zero owner is Unowned. The resolver pointer and ttl are
/// independent of ownership and survive transfers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub owner: Address,
    /// Zero means unset
    pub resolver: Address,
    /// Caching hint in seconds; zero means unset
    pub ttl: u64,
}

impl NodeRecord {
    pub fn is_owned(&self) -> bool {
        !self.owner.is_zero()
    }

    /// True when nothing about the node is set and it can be dropped from storage
    pub fn is_empty(&self) -> bool {
        self.owner.is_zero() && self.resolver.is_zero() && self.ttl == 0
    }
}

// ============================================================================
// Contract Kinds
// ============================================================================

/// Contracts hosted by the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractKind {
    Registry,
    Registrar,
    Resolver,
}

impl fmt::Display for ContractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractKind::Registry => write!(f, "registry"),
            ContractKind::Registrar => write!(f, "registrar"),
            ContractKind::Resolver => write!(f, "resolver"),
        }
    }
}

// ============================================================================
// Constants
// ============================================================================

/// Name length limits
pub mod limits {
    /// Maximum length of a full dotted name
    pub const MAX_NAME_LENGTH: usize = 253;

    /// Maximum length of a single label
    pub const MAX_LABEL_LENGTH: usize = 63;

    /// Maximum number of labels in a name
    pub const MAX_DEPTH: usize = 16;

    /// Maximum length of a text record key
    pub const MAX_TEXT_KEY_LENGTH: usize = 64;
}

/// Length bounds applied when parsing names, taken from ledger config
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameLimits {
    pub max_name_length: usize,
    pub max_label_length: usize,
}

impl Default for NameLimits {
    fn default() -> Self {
        Self {
            max_name_length: limits::MAX_NAME_LENGTH,
            max_label_length: limits::MAX_LABEL_LENGTH,
        }
    }
}
