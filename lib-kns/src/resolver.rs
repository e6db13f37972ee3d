//! Public resolver contract.
//!
//! Stores records per node. Writes are authorized against the registry's
//! current owner of the node at write time; ownership is never cached.
//! Records are not cleared on ownership change.

use std::collections::{BTreeMap, HashMap};

use lib_types::Address;
use serde::{Deserialize, Serialize};

use super::context::CallContext;
use super::errors::{KnsError, KnsResult};
use super::events::KnsEvent;
use super::namehash::NameError;
use super::registry::NameRegistry;
use super::types::{limits, Node};

/// Records held for one node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverRecord {
    /// Zero means unresolved
    pub addr: Address,
    /// Reverse name
    pub name: Option<String>,
    pub text: BTreeMap<String, String>,
    pub content: Option<[u8; 32]>,
}

impl ResolverRecord {
    fn is_empty(&self) -> bool {
        self.addr.is_zero() && self.name.is_none() && self.text.is_empty() && self.content.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct PublicResolver {
    address: Address,
    registry: Address,
    records: HashMap<Node, ResolverRecord>,
}

impl PublicResolver {
    pub fn new(address: Address, registry: Address) -> Self {
        Self {
            address,
            registry,
            records: HashMap::new(),
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn registry(&self) -> Address {
        self.registry
    }

    fn authorize(&self, ctx: &CallContext, registry: &NameRegistry, node: &Node) -> KnsResult<()> {
        if registry.is_owner(node, &ctx.caller) {
            Ok(())
        } else {
            Err(KnsError::NotAuthorized {
                caller: ctx.caller,
                node: *node,
            })
        }
    }

    fn update(&mut self, node: Node, f: impl FnOnce(&mut ResolverRecord)) {
        let record = self.records.entry(node).or_default();
        f(record);
        if record.is_empty() {
            self.records.remove(&node);
        }
    }

    pub fn record(&self, node: &Node) -> Option<&ResolverRecord> {
        self.records.get(node)
    }

    /// Address record; zero if never set
    pub fn addr(&self, node: &Node) -> Address {
        self.records.get(node).map(|r| r.addr).unwrap_or_default()
    }

    pub fn name(&self, node: &Node) -> Option<&str> {
        self.records.get(node).and_then(|r| r.name.as_deref())
    }

    pub fn text(&self, node: &Node, key: &str) -> Option<&str> {
        self.records
            .get(node)
            .and_then(|r| r.text.get(key))
            .map(String::as_str)
    }

    pub fn content(&self, node: &Node) -> Option<[u8; 32]> {
        self.records.get(node).and_then(|r| r.content)
    }

    pub fn set_addr(
        &mut self,
        ctx: &mut CallContext,
        registry: &NameRegistry,
        node: Node,
        addr: Address,
    ) -> KnsResult<()> {
        self.authorize(ctx, registry, &node)?;
        self.update(node, |record| record.addr = addr);
        ctx.emit(KnsEvent::AddrChanged {
            resolver: self.address,
            node,
            addr,
        });
        Ok(())
    }

    /// Empty `name` removes the record
    pub fn set_name(
        &mut self,
        ctx: &mut CallContext,
        registry: &NameRegistry,
        node: Node,
        name: &str,
    ) -> KnsResult<()> {
        self.authorize(ctx, registry, &node)?;
        let value = (!name.is_empty()).then(|| name.to_string());
        self.update(node, |record| record.name = value);
        ctx.emit(KnsEvent::NameChanged {
            resolver: self.address,
            node,
            name: name.to_string(),
        });
        Ok(())
    }

    /// Empty `value` removes the key
    pub fn set_text(
        &mut self,
        ctx: &mut CallContext,
        registry: &NameRegistry,
        node: Node,
        key: &str,
        value: &str,
    ) -> KnsResult<()> {
        self.authorize(ctx, registry, &node)?;
        if key.is_empty() || key.len() > limits::MAX_TEXT_KEY_LENGTH {
            return Err(KnsError::InvalidName(NameError::InvalidTextKey {
                key: key.to_string(),
                max: limits::MAX_TEXT_KEY_LENGTH,
            }));
        }

        self.update(node, |record| {
            if value.is_empty() {
                record.text.remove(key);
            } else {
                record.text.insert(key.to_string(), value.to_string());
            }
        });
        ctx.emit(KnsEvent::TextChanged {
            resolver: self.address,
            node,
            key: key.to_string(),
        });
        Ok(())
    }

    pub fn set_content(
        &mut self,
        ctx: &mut CallContext,
        registry: &NameRegistry,
        node: Node,
        hash: [u8; 32],
    ) -> KnsResult<()> {
        self.authorize(ctx, registry, &node)?;
        let value = (hash != [0u8; 32]).then_some(hash);
        self.update(node, |record| record.content = value);
        ctx.emit(KnsEvent::ContentChanged {
            resolver: self.address,
            node,
            hash,
        });
        Ok(())
    }

    /// Drop every record for `node`
    pub fn clear_records(&mut self, ctx: &mut CallContext, registry: &NameRegistry, node: Node) -> KnsResult<()> {
        self.authorize(ctx, registry, &node)?;
        self.records.remove(&node);
        ctx.emit(KnsEvent::RecordsCleared {
            resolver: self.address,
            node,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ROOT_NODE;

    fn addr(id: u8) -> Address {
        Address::new([id; 32])
    }

    fn setup() -> (NameRegistry, PublicResolver, Node) {
        let owner = addr(1);
        let mut registry = NameRegistry::new(addr(0xee), ROOT_NODE, owner);
        let mut ctx = CallContext::new(owner, 1);
        let node = registry
            .set_subnode_owner(&mut ctx, ROOT_NODE, "kowala", owner)
            .unwrap();
        let resolver = PublicResolver::new(addr(0xbb), registry.address());
        (registry, resolver, node)
    }

    #[test]
    fn test_addr_defaults_to_zero() {
        let (_, resolver, node) = setup();
        assert!(resolver.addr(&node).is_zero());
        assert!(resolver.record(&node).is_none());
    }

    #[test]
    fn test_owner_sets_addr() {
        let (registry, mut resolver, node) = setup();
        let mut ctx = CallContext::new(addr(1), 2);

        resolver.set_addr(&mut ctx, &registry, node, addr(7)).unwrap();

        assert_eq!(resolver.addr(&node), addr(7));
        assert_eq!(
            ctx.events(),
            &[KnsEvent::AddrChanged {
                resolver: resolver.address(),
                node,
                addr: addr(7)
            }]
        );
    }

    #[test]
    fn test_non_owner_cannot_write() {
        let (registry, mut resolver, node) = setup();
        let mut ctx = CallContext::new(addr(4), 2);

        assert!(matches!(
            resolver.set_addr(&mut ctx, &registry, node, addr(7)),
            Err(KnsError::NotAuthorized { .. })
        ));
        assert!(resolver.set_text(&mut ctx, &registry, node, "url", "x").is_err());
        assert!(resolver.clear_records(&mut ctx, &registry, node).is_err());
        assert!(resolver.addr(&node).is_zero());
        assert!(ctx.events().is_empty());
    }

    #[test]
    fn test_ownership_checked_at_write_time() {
        let (mut registry, mut resolver, node) = setup();
        let mut ctx = CallContext::new(addr(1), 2);
        resolver.set_addr(&mut ctx, &registry, node, addr(7)).unwrap();

        registry.set_owner(&mut ctx, node, addr(2)).unwrap();

        assert!(resolver.set_addr(&mut ctx, &registry, node, addr(8)).is_err());
        // record survives the owner change
        assert_eq!(resolver.addr(&node), addr(7));

        let mut new_owner = CallContext::new(addr(2), 3);
        resolver
            .set_addr(&mut new_owner, &registry, node, addr(8))
            .unwrap();
        assert_eq!(resolver.addr(&node), addr(8));
    }

    #[test]
    fn test_text_name_content_records() {
        let (registry, mut resolver, node) = setup();
        let mut ctx = CallContext::new(addr(1), 2);

        resolver.set_name(&mut ctx, &registry, node, "kowala").unwrap();
        resolver
            .set_text(&mut ctx, &registry, node, "url", "https://kowala.tech")
            .unwrap();
        resolver.set_content(&mut ctx, &registry, node, [9u8; 32]).unwrap();

        assert_eq!(resolver.name(&node), Some("kowala"));
        assert_eq!(resolver.text(&node, "url"), Some("https://kowala.tech"));
        assert_eq!(resolver.content(&node), Some([9u8; 32]));

        resolver.set_text(&mut ctx, &registry, node, "url", "").unwrap();
        assert_eq!(resolver.text(&node, "url"), None);
        assert!(resolver.set_text(&mut ctx, &registry, node, "", "v").is_err());
    }

    #[test]
    fn test_clear_records() {
        let (registry, mut resolver, node) = setup();
        let mut ctx = CallContext::new(addr(1), 2);
        resolver.set_addr(&mut ctx, &registry, node, addr(7)).unwrap();
        resolver.set_name(&mut ctx, &registry, node, "kowala").unwrap();

        resolver.clear_records(&mut ctx, &registry, node).unwrap();

        assert!(resolver.addr(&node).is_zero());
        assert!(resolver.name(&node).is_none());
    }
}
