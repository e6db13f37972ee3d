//! Name resolution read path.
//!
//! Resolution is a two-hop read: registry → resolver pointer → address
//! record. Both hops run against the same committed snapshot.

use lib_types::Address;
use tracing::debug;

use super::errors::{KnsError, KnsResult};
use super::ledger::{KnsState, Ledger};
use super::namehash::parse_name_with;
use super::types::Node;

/// Result of resolving one name. Derived on every call, never stored by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBinding {
    pub name: String,
    pub node: Node,
    pub resolver: Address,
    pub target: Address,
}

/// Resolve `name` against `state`, folding from `root`
pub fn resolve_in(state: &KnsState, root: Node, name: &str) -> KnsResult<ResolvedBinding> {
    let parsed = parse_name_with(name, &state.registry().name_limits())?;
    let node = parsed.node(root);

    let resolver_addr = state.registry().resolver(&node);
    if resolver_addr.is_zero() {
        return Err(KnsError::ResolverUnset {
            name: parsed.full_name,
            node,
        });
    }

    // A pointer at something that is not a resolver resolves nothing.
    let resolver = state
        .resolver(&resolver_addr)
        .ok_or_else(|| KnsError::ResolverUnset {
            name: parsed.full_name.clone(),
            node,
        })?;

    let target = resolver.addr(&node);
    if target.is_zero() {
        return Err(KnsError::UnresolvedRecord {
            name: parsed.full_name,
            node,
            resolver: resolver_addr,
        });
    }

    Ok(ResolvedBinding {
        name: parsed.full_name,
        node,
        resolver: resolver_addr,
        target,
    })
}

#[derive(Debug, Clone, Copy)]
pub struct NameResolutionClient<'a> {
    ledger: &'a Ledger,
    root: Node,
}

impl<'a> NameResolutionClient<'a> {
    /// Client folding names from the ledger's configured root
    pub fn new(ledger: &'a Ledger) -> Self {
        Self {
            ledger,
            root: ledger.root_node(),
        }
    }

    pub fn with_root(ledger: &'a Ledger, root: Node) -> Self {
        Self { ledger, root }
    }

    pub fn root(&self) -> Node {
        self.root
    }

    pub fn resolve_binding(&self, name: &str) -> KnsResult<ResolvedBinding> {
        let binding = self
            .ledger
            .read(|state| resolve_in(state, self.root, name))?;
        debug!("resolved '{}' -> {} via {}", binding.name, binding.target, binding.resolver);
        Ok(binding)
    }

    pub fn resolve(&self, name: &str) -> KnsResult<Address> {
        self.resolve_binding(name).map(|binding| binding.target)
    }
}
