//! KNS: hierarchical name service
//!
//! Maps dotted names such as `miningtoken.kowala` to addresses.
//!
//! # Components
//!
//! - [`namehash`]: label validation and node id derivation
//! - [`registry`]: node ownership, resolver pointers, ttl
//! - [`registrar`]: first-come-first-served subdomain registrar
//! - [`resolver`]: per-node address/name/text/content records
//! - [`ledger`]: transaction host with atomic commit, receipts and event log
//! - [`client`]: two-hop name resolution against one snapshot
//!
//! Ownership is re-checked against the registry on every write. Resolver
//! records are not cleared when a node changes hands.

pub mod client;
pub mod config;
pub mod context;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod namehash;
pub mod registrar;
pub mod registry;
pub mod resolver;
pub mod types;


pub use client::{resolve_in, NameResolutionClient, ResolvedBinding};
pub use config::{load_config, ConfigError, KnsConfig};
pub use context::{CallContext, CallOrigin};
pub use errors::{KnsError, KnsResult};
pub use events::{KnsEvent, LoggedEvent};
pub use ledger::{KnsCall, KnsState, Ledger, Transaction, TransactionReceipt, TransactionStatus};
pub use namehash::{
    child_node, child_node_with, label_hash, namehash, parse_name, parse_name_with, NameError, ParsedName,
};
pub use registrar::SubdomainRegistrar;
pub use registry::NameRegistry;
pub use resolver::{PublicResolver, ResolverRecord};
pub use types::{limits, ContractKind, LabelHash, NameLimits, Node, NodeRecord, ROOT_NODE};

pub use lib_types::{Address, BlockHeight, TxHash};
