//! Name registry contract (authoritative ownership state).
//!
//! Holds one [`NodeRecord`] per owned or configured node, keyed by node id.
//! Every mutation requires the caller to own the node it touches (for
//! `set_subnode_owner`, the parent).

use std::collections::HashMap;

use lib_types::Address;
use tracing::debug;

use super::context::CallContext;
use super::errors::{KnsError, KnsResult};
use super::events::KnsEvent;
use super::namehash::{child_node_with, label_hash};
use super::types::{NameLimits, Node, NodeRecord};

#[derive(Debug, Clone)]
pub struct NameRegistry {
    address: Address,
    root: Node,
    limits: NameLimits,
    records: HashMap<Node, NodeRecord>,
}

impl NameRegistry {
    /// Create a registry whose root node is owned by `root_owner`
    pub fn new(address: Address, root: Node, root_owner: Address) -> Self {
        let mut records = HashMap::new();
        records.insert(
            root,
            NodeRecord {
                owner: root_owner,
                ..NodeRecord::default()
            },
        );
        Self {
            address,
            root,
            limits: NameLimits::default(),
            records,
        }
    }

    /// Bound the labels accepted by `set_subnode_owner` and registrars
    pub fn with_name_limits(mut self, limits: NameLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn name_limits(&self) -> NameLimits {
        self.limits
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn root(&self) -> Node {
        self.root
    }

    pub fn record(&self, node: &Node) -> NodeRecord {
        self.records.get(node).copied().unwrap_or_default()
    }

    pub fn owner(&self, node: &Node) -> Address {
        self.record(node).owner
    }

    pub fn resolver(&self, node: &Node) -> Address {
        self.record(node).resolver
    }

    pub fn ttl(&self, node: &Node) -> u64 {
        self.record(node).ttl
    }

    /// The zero address never owns anything, so an unowned node authorizes nobody.
    pub fn is_owner(&self, node: &Node, caller: &Address) -> bool {
        !caller.is_zero() && self.owner(node) == *caller
    }

    fn authorize(&self, ctx: &CallContext, node: &Node) -> KnsResult<()> {
        if self.is_owner(node, &ctx.caller) {
            Ok(())
        } else {
            Err(KnsError::NotAuthorized {
                caller: ctx.caller,
                node: *node,
            })
        }
    }

    fn update(&mut self, node: Node, f: impl FnOnce(&mut NodeRecord)) {
        let record = self.records.entry(node).or_default();
        f(record);
        if record.is_empty() {
            self.records.remove(&node);
        }
    }

    /// Transfer ownership of `node`. A zero `new_owner` makes the node Unowned.
    pub fn set_owner(&mut self, ctx: &mut CallContext, node: Node, new_owner: Address) -> KnsResult<()> {
        self.authorize(ctx, &node)?;
        self.update(node, |record| record.owner = new_owner);
        debug!("registry: {} transferred to {}", node, new_owner);
        ctx.emit(KnsEvent::Transfer {
            node,
            owner: new_owner,
        });
        Ok(())
    }

    /// Assign the owner of `label` under `parent`, returning the child node.
    ///
    /// Resolver and ttl of the child are left untouched.
    pub fn set_subnode_owner(
        &mut self,
        ctx: &mut CallContext,
        parent: Node,
        label: &str,
        new_owner: Address,
    ) -> KnsResult<Node> {
        self.authorize(ctx, &parent)?;
        let node = child_node_with(&parent, label, &self.limits)?;
        self.update(node, |record| record.owner = new_owner);
        debug!("registry: subnode '{}' of {} assigned to {}", label, parent, new_owner);
        ctx.emit(KnsEvent::NewOwner {
            parent,
            label: label_hash(label),
            node,
            owner: new_owner,
        });
        Ok(node)
    }

    pub fn set_resolver(&mut self, ctx: &mut CallContext, node: Node, resolver: Address) -> KnsResult<()> {
        self.authorize(ctx, &node)?;
        self.update(node, |record| record.resolver = resolver);
        ctx.emit(KnsEvent::NewResolver { node, resolver });
        Ok(())
    }

    pub fn set_ttl(&mut self, ctx: &mut CallContext, node: Node, ttl: u64) -> KnsResult<()> {
        self.authorize(ctx, &node)?;
        self.update(node, |record| record.ttl = ttl);
        ctx.emit(KnsEvent::NewTtl { node, ttl });
        Ok(())
    }

    /// Number of nodes with any state set
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
