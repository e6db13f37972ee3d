//! KNS error taxonomy.

use lib_types::Address;
use thiserror::Error;

use super::namehash::NameError;
use super::types::{ContractKind, Node};

/// Errors surfaced by registry, registrar, resolver and resolution calls
///
/// Every variant is a terminal failure of the triggering call. The ledger
/// discards all staged writes of a failed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KnsError {
    /// Caller is not the current owner of the node being mutated
    #[error("NotAuthorized: {caller} does not own node {node}")]
    NotAuthorized { caller: Address, node: Node },

    /// First-come registration of a node that already has an owner
    #[error("AlreadyRegistered: node {node} is owned by {owner}")]
    AlreadyRegistered { node: Node, owner: Address },

    /// Resolution reached a node with no resolver pointer
    #[error("ResolverUnset: no resolver set for '{name}' ({node})")]
    ResolverUnset { name: String, node: Node },

    /// Resolver exists but has no address record for the node
    #[error("UnresolvedRecord: resolver {resolver} has no address for '{name}' ({node})")]
    UnresolvedRecord {
        name: String,
        node: Node,
        resolver: Address,
    },

    /// Name or label failed validation
    #[error("InvalidName: {0}")]
    InvalidName(#[from] NameError),

    /// Transaction targets an address that hosts no contract of that kind
    #[error("UnknownContract: no {kind} deployed at {address}")]
    UnknownContract { kind: ContractKind, address: Address },
}

impl KnsError {
    /// Stable revert reason code reported in transaction receipts
    pub fn reason(&self) -> &'static str {
        match self {
            KnsError::NotAuthorized { .. } => "NotAuthorized",
            KnsError::AlreadyRegistered { .. } => "AlreadyRegistered",
            KnsError::ResolverUnset { .. } => "ResolverUnset",
            KnsError::UnresolvedRecord { .. } => "UnresolvedRecord",
            KnsError::InvalidName(_) => "InvalidName",
            KnsError::UnknownContract { .. } => "UnknownContract",
        }
    }
}

pub type KnsResult<T> = Result<T, KnsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_starts_with_reason() {
        let errors = vec![
            KnsError::NotAuthorized {
                caller: Address::new([1; 32]),
                node: Node::new([2; 32]),
            },
            KnsError::AlreadyRegistered {
                node: Node::new([2; 32]),
                owner: Address::new([1; 32]),
            },
            KnsError::ResolverUnset {
                name: "x".into(),
                node: Node::new([2; 32]),
            },
            KnsError::UnresolvedRecord {
                name: "x".into(),
                node: Node::new([2; 32]),
                resolver: Address::new([3; 32]),
            },
            KnsError::InvalidName(NameError::EmptyLabel { name: "a.".into() }),
            KnsError::UnknownContract {
                kind: ContractKind::Resolver,
                address: Address::new([4; 32]),
            },
        ];

        for err in errors {
            assert!(err.to_string().starts_with(err.reason()), "{}", err);
        }
    }
}
