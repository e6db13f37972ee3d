//! Validator manager binds the mining token from KNS during creation.

use anyhow::{anyhow, Result};
use lib_kns::{namehash, Address, KnsCall, KnsConfig, Ledger, Node, Transaction, ROOT_NODE};
use lib_validator::{ValidatorMgr, ValidatorMgrError, ValidatorMgrParams};

fn account(id: u8) -> Address {
    Address::new([id; 32])
}

struct Kns {
    ledger: Ledger,
    owner: Address,
    resolver: Address,
    node: Node,
}

impl Kns {
    fn send(&self, call: KnsCall) -> Result<Option<Address>> {
        Ok(self
            .ledger
            .execute(Transaction::new(self.owner, call))?
            .contract_address)
    }

    fn set_token(&self, token: Address) -> Result<()> {
        self.send(KnsCall::SetAddr {
            resolver: self.resolver,
            node: self.node,
            addr: token,
        })?;
        Ok(())
    }
}

/// Registry with `miningtoken.kowala` registered to `owner` through a
/// first-come registrar. Resolver pointer optional, no address record yet.
fn kns(with_resolver: bool) -> Result<Kns> {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let owner = account(1);
    let ledger = Ledger::new(owner, KnsConfig::default());
    let kowala = namehash(ROOT_NODE, "kowala")?;
    let node = namehash(ROOT_NODE, "miningtoken.kowala")?;

    let mut kns = Kns {
        ledger,
        owner,
        resolver: Address::ZERO,
        node,
    };

    let registrar = kns
        .send(KnsCall::DeployRegistrar { parent_node: kowala })?
        .ok_or_else(|| anyhow!("no registrar address"))?;
    kns.resolver = kns
        .send(KnsCall::DeployResolver)?
        .ok_or_else(|| anyhow!("no resolver address"))?;

    kns.send(KnsCall::SetSubnodeOwner {
        node: ROOT_NODE,
        label: "kowala".into(),
        owner: registrar,
    })?;
    kns.send(KnsCall::Register {
        registrar,
        label: "miningtoken".into(),
        owner,
    })?;
    if with_resolver {
        kns.send(KnsCall::SetResolver {
            node,
            resolver: kns.resolver,
        })?;
    }
    Ok(kns)
}

#[test]
fn should_set_mining_token_address_from_kns_during_creation() -> Result<()> {
    let kns = kns(true)?;
    let mining_token = account(0x70);
    kns.set_token(mining_token)?;

    let validator = ValidatorMgr::new(
        ValidatorMgrParams::new(1, 2, 3, 1),
        &kns.ledger,
        kns.ledger.registry_address(),
    )?;

    // the resolver the manager stored still answers with the token
    let resolver_addr = validator.kns_resolver();
    let from_resolver = kns
        .ledger
        .read(|state| state.resolver(&resolver_addr).map(|r| r.addr(&kns.node)));

    assert_eq!(resolver_addr, kns.resolver);
    assert_eq!(from_resolver, Some(mining_token));
    assert_eq!(validator.mining_token(), mining_token);
    assert_eq!(validator.base_deposit(), 1);
    assert_eq!(validator.max_num_validators(), 2);
    assert_eq!(validator.freeze_period(), 3);
    assert_eq!(validator.super_node_amount(), 1);
    Ok(())
}

#[test]
fn creation_fails_without_resolver() -> Result<()> {
    let kns = kns(false)?;

    let err = ValidatorMgr::new(
        ValidatorMgrParams::default(),
        &kns.ledger,
        kns.ledger.registry_address(),
    )
    .unwrap_err();

    assert_eq!(err.reason(), "ResolverUnset");
    Ok(())
}

#[test]
fn creation_fails_without_address_record() -> Result<()> {
    let kns = kns(true)?;

    let err = ValidatorMgr::new(
        ValidatorMgrParams::default(),
        &kns.ledger,
        kns.ledger.registry_address(),
    )
    .unwrap_err();

    assert!(matches!(err, ValidatorMgrError::Resolution(_)));
    assert_eq!(err.reason(), "UnresolvedRecord");
    Ok(())
}

#[test]
fn creation_rejects_foreign_registry() -> Result<()> {
    let kns = kns(true)?;
    kns.set_token(account(0x70))?;

    let err = ValidatorMgr::new(ValidatorMgrParams::default(), &kns.ledger, account(0x99)).unwrap_err();

    assert!(matches!(err, ValidatorMgrError::UnknownRegistry { .. }));
    Ok(())
}

#[test]
fn binding_is_not_refreshed_after_creation() -> Result<()> {
    let kns = kns(true)?;
    kns.set_token(account(0x70))?;
    let validator = ValidatorMgr::new(
        ValidatorMgrParams::default(),
        &kns.ledger,
        kns.ledger.registry_address(),
    )?;

    kns.set_token(account(0x71))?;

    assert_eq!(validator.mining_token(), account(0x70));
    Ok(())
}

#[test]
fn custom_token_name_is_honoured() -> Result<()> {
    let kns = kns(true)?;
    kns.set_token(account(0x70))?;

    let params = ValidatorMgrParams::default().with_mining_token_name("other.kowala");
    let err = ValidatorMgr::new(params, &kns.ledger, kns.ledger.registry_address()).unwrap_err();

    assert_eq!(err.reason(), "ResolverUnset");
    Ok(())
}
