//! First-come-first-served subdomain registrar.
//!
//! A registrar is scoped to one parent node, which it must own in the
//! registry. Any account may claim an unowned label under that parent; a
//! claimed label can never be re-registered through the registrar.

use lib_types::Address;
use tracing::info;

use super::context::CallContext;
use super::errors::{KnsError, KnsResult};
use super::namehash::child_node_with;
use super::registry::NameRegistry;
use super::types::Node;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubdomainRegistrar {
    address: Address,
    registry: Address,
    parent_node: Node,
}

impl SubdomainRegistrar {
    pub fn new(address: Address, registry: Address, parent_node: Node) -> Self {
        Self {
            address,
            registry,
            parent_node,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn registry(&self) -> Address {
        self.registry
    }

    pub fn parent_node(&self) -> Node {
        self.parent_node
    }

    /// Claim `label` under the parent node for `new_owner`.
    ///
    /// Fails with `AlreadyRegistered` if the child already has an owner, and
    /// with `NotAuthorized` if this registrar does not own the parent.
    pub fn register(
        &self,
        ctx: &mut CallContext,
        registry: &mut NameRegistry,
        label: &str,
        new_owner: Address,
    ) -> KnsResult<Node> {
        let node = child_node_with(&self.parent_node, label, &registry.name_limits())?;

        let current = registry.owner(&node);
        if !current.is_zero() {
            return Err(KnsError::AlreadyRegistered {
                node,
                owner: current,
            });
        }

        let registrar = self.address;
        let parent = self.parent_node;
        ctx.call_as_contract(registrar, |inner| {
            registry.set_subnode_owner(inner, parent, label, new_owner)
        })?;

        info!("registrar {}: '{}' registered to {}", registrar, label, new_owner);
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namehash::namehash;
    use crate::types::ROOT_NODE;

    fn addr(id: u8) -> Address {
        Address::new([id; 32])
    }

    /// Registry with `kowala` owned by a registrar scoped to it
    fn setup() -> (NameRegistry, SubdomainRegistrar) {
        let deployer = addr(1);
        let mut registry = NameRegistry::new(addr(0xee), ROOT_NODE, deployer);
        let kowala = namehash(ROOT_NODE, "kowala").unwrap();
        let registrar = SubdomainRegistrar::new(addr(0xaa), registry.address(), kowala);

        let mut ctx = CallContext::new(deployer, 1);
        registry
            .set_subnode_owner(&mut ctx, ROOT_NODE, "kowala", registrar.address())
            .expect("delegate kowala");
        (registry, registrar)
    }

    #[test]
    fn test_register_assigns_child() {
        let (mut registry, registrar) = setup();
        let mut ctx = CallContext::new(addr(2), 2);

        let node = registrar
            .register(&mut ctx, &mut registry, "miningtoken", addr(2))
            .expect("register");

        assert_eq!(node, namehash(ROOT_NODE, "miningtoken.kowala").unwrap());
        assert_eq!(registry.owner(&node), addr(2));
        assert_eq!(ctx.caller, addr(2));
    }

    #[test]
    fn test_second_registration_rejected() {
        let (mut registry, registrar) = setup();
        let mut ctx = CallContext::new(addr(2), 2);
        registrar
            .register(&mut ctx, &mut registry, "miningtoken", addr(2))
            .unwrap();

        let mut other = CallContext::new(addr(3), 3);
        let result = registrar.register(&mut other, &mut registry, "miningtoken", addr(3));

        assert!(matches!(result, Err(KnsError::AlreadyRegistered { .. })));
        let node = namehash(ROOT_NODE, "miningtoken.kowala").unwrap();
        assert_eq!(registry.owner(&node), addr(2));
        assert!(other.events().is_empty());
    }

    #[test]
    fn test_owner_cannot_reclaim_through_registrar() {
        let (mut registry, registrar) = setup();
        let mut ctx = CallContext::new(addr(2), 2);
        registrar
            .register(&mut ctx, &mut registry, "miningtoken", addr(2))
            .unwrap();

        let again = registrar.register(&mut ctx, &mut registry, "miningtoken", addr(4));
        assert!(matches!(again, Err(KnsError::AlreadyRegistered { .. })));
    }

    #[test]
    fn test_registrar_without_parent_ownership_fails() {
        let deployer = addr(1);
        let mut registry = NameRegistry::new(addr(0xee), ROOT_NODE, deployer);
        let kowala = namehash(ROOT_NODE, "kowala").unwrap();
        let registrar = SubdomainRegistrar::new(addr(0xaa), registry.address(), kowala);
        let mut ctx = CallContext::new(addr(2), 2);

        let result = registrar.register(&mut ctx, &mut registry, "miningtoken", addr(2));

        assert!(matches!(
            result,
            Err(KnsError::NotAuthorized { caller, .. }) if caller == registrar.address()
        ));
    }

    #[test]
    fn test_released_label_can_be_claimed_again() {
        let (mut registry, registrar) = setup();
        let mut ctx = CallContext::new(addr(2), 2);
        let node = registrar
            .register(&mut ctx, &mut registry, "miningtoken", addr(2))
            .unwrap();
        registry.set_owner(&mut ctx, node, Address::ZERO).unwrap();

        let mut next = CallContext::new(addr(3), 3);
        registrar
            .register(&mut next, &mut registry, "miningtoken", addr(3))
            .expect("unowned node is claimable");
        assert_eq!(registry.owner(&node), addr(3));
    }
}
