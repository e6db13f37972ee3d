//! In-process ledger hosting the name service contracts.
//!
//! The ledger owns the registry singleton plus every deployed registrar and
//! resolver. Transactions are applied one at a time under a write lock:
//! each call runs against a full clone of the state, which replaces the
//! live state only if the call succeeds. Readers never observe a partially
//! applied transaction.

pub mod receipt;
pub mod transaction;

use std::collections::{HashMap, VecDeque};

use lib_types::{Address, BlockHeight};
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::config::KnsConfig;
use crate::context::CallContext;
use crate::errors::{KnsError, KnsResult};
use crate::events::{KnsEvent, LoggedEvent};
use crate::registrar::SubdomainRegistrar;
use crate::registry::NameRegistry;
use crate::resolver::PublicResolver;
use crate::types::{ContractKind, Node};

pub use receipt::{TransactionReceipt, TransactionStatus};
pub use transaction::{KnsCall, Transaction};

/// Contract state as of the last committed transaction
#[derive(Debug, Clone)]
pub struct KnsState {
    registry: NameRegistry,
    registrars: HashMap<Address, SubdomainRegistrar>,
    resolvers: HashMap<Address, PublicResolver>,
}

impl KnsState {
    pub fn registry(&self) -> &NameRegistry {
        &self.registry
    }

    pub fn registrar(&self, address: &Address) -> Option<&SubdomainRegistrar> {
        self.registrars.get(address)
    }

    pub fn resolver(&self, address: &Address) -> Option<&PublicResolver> {
        self.resolvers.get(address)
    }
}

#[derive(Debug)]
struct LedgerInner {
    state: KnsState,
    height: BlockHeight,
    /// Submissions seen, committed or not
    sequence: u64,
    deploy_nonce: u64,
    event_log: VecDeque<LoggedEvent>,
    /// Highest block height with at least one event trimmed from the log
    pruned_through: BlockHeight,
}

#[derive(Debug)]
pub struct Ledger {
    deployer: Address,
    registry_address: Address,
    config: KnsConfig,
    inner: RwLock<LedgerInner>,
}

impl Ledger {
    /// Create a ledger whose registry root is owned by `deployer`
    pub fn new(deployer: Address, config: KnsConfig) -> Self {
        let registry_address = Address::for_contract(&deployer, 0);
        let registry = NameRegistry::new(registry_address, config.root_node, deployer)
            .with_name_limits(config.name_limits());

        info!(
            "KNS ledger created: registry {} root {} owned by {}",
            registry_address, config.root_node, deployer
        );

        Self {
            deployer,
            registry_address,
            config,
            inner: RwLock::new(LedgerInner {
                state: KnsState {
                    registry,
                    registrars: HashMap::new(),
                    resolvers: HashMap::new(),
                },
                height: 0,
                sequence: 0,
                deploy_nonce: 1,
                event_log: VecDeque::new(),
                pruned_through: 0,
            }),
        }
    }

    pub fn deployer(&self) -> Address {
        self.deployer
    }

    pub fn registry_address(&self) -> Address {
        self.registry_address
    }

    pub fn root_node(&self) -> Node {
        self.config.root_node
    }

    pub fn config(&self) -> &KnsConfig {
        &self.config
    }

    pub fn height(&self) -> BlockHeight {
        self.inner.read().height
    }

    /// Run `f` against one consistent snapshot of committed state
    pub fn read<R>(&self, f: impl FnOnce(&KnsState) -> R) -> R {
        let inner = self.inner.read();
        f(&inner.state)
    }

    /// Apply a transaction and report the outcome as a receipt
    pub fn submit(&self, tx: Transaction) -> TransactionReceipt {
        self.process(tx).0
    }

    /// Apply a transaction, returning the typed error if it was rejected
    pub fn execute(&self, tx: Transaction) -> KnsResult<TransactionReceipt> {
        match self.process(tx) {
            (receipt, None) => Ok(receipt),
            (_, Some(err)) => Err(err),
        }
    }

    /// Committed events with `block_height > since`, oldest first.
    ///
    /// The log only keeps the newest `event_log_capacity` events. When
    /// `since` is below [`Ledger::events_pruned_through`] some matching
    /// events have already been dropped and the result is incomplete.
    pub fn events_since(&self, since: BlockHeight) -> Vec<LoggedEvent> {
        self.inner
            .read()
            .event_log
            .iter()
            .filter(|logged| logged.block_height > since)
            .cloned()
            .collect()
    }

    /// Highest block height whose events were partly or fully trimmed; 0 if none
    pub fn events_pruned_through(&self) -> BlockHeight {
        self.inner.read().pruned_through
    }

    fn process(&self, tx: Transaction) -> (TransactionReceipt, Option<KnsError>) {
        let mut inner = self.inner.write();
        inner.sequence += 1;
        let tx_hash = tx.hash(inner.sequence);
        let commit_height = inner.height + 1;
        let next_contract = Address::for_contract(&tx.from, inner.deploy_nonce);

        let mut staged = inner.state.clone();
        let mut ctx = CallContext::new(tx.from, commit_height);

        match apply(&mut staged, &mut ctx, &tx.call, next_contract) {
            Ok(created) => {
                inner.state = staged;
                inner.height = commit_height;
                if created.is_some() {
                    inner.deploy_nonce += 1;
                }

                let events = ctx.into_events();
                for event in &events {
                    inner.event_log.push_back(LoggedEvent {
                        block_height: commit_height,
                        tx_hash,
                        event: event.clone(),
                    });
                }
                let capacity = self.config.event_log_capacity;
                if capacity > 0 {
                    while inner.event_log.len() > capacity {
                        if let Some(dropped) = inner.event_log.pop_front() {
                            inner.pruned_through = dropped.block_height;
                        }
                    }
                }

                debug!(
                    "tx {} {} from {} committed at height {} ({} events)",
                    tx_hash,
                    tx.call.name(),
                    tx.from,
                    commit_height,
                    events.len()
                );
                (
                    TransactionReceipt::success(tx_hash, commit_height, created, events),
                    None,
                )
            }
            Err(err) => {
                warn!("tx {} {} from {} rejected: {}", tx_hash, tx.call.name(), tx.from, err);
                let receipt = TransactionReceipt::failed(tx_hash, inner.height, &err);
                (receipt, Some(err))
            }
        }
    }
}

fn unknown(kind: ContractKind, address: &Address) -> KnsError {
    KnsError::UnknownContract {
        kind,
        address: *address,
    }
}

/// Dispatch one call against staged state. Returns the created contract, if any.
fn apply(
    state: &mut KnsState,
    ctx: &mut CallContext,
    call: &KnsCall,
    next_contract: Address,
) -> KnsResult<Option<Address>> {
    match call {
        KnsCall::SetOwner { node, owner } => {
            state.registry.set_owner(ctx, *node, *owner)?;
            Ok(None)
        }
        KnsCall::SetSubnodeOwner { node, label, owner } => {
            state.registry.set_subnode_owner(ctx, *node, label, *owner)?;
            Ok(None)
        }
        KnsCall::SetResolver { node, resolver } => {
            state.registry.set_resolver(ctx, *node, *resolver)?;
            Ok(None)
        }
        KnsCall::SetTtl { node, ttl } => {
            state.registry.set_ttl(ctx, *node, *ttl)?;
            Ok(None)
        }

        KnsCall::DeployRegistrar { parent_node } => {
            let registrar =
                SubdomainRegistrar::new(next_contract, state.registry.address(), *parent_node);
            state.registrars.insert(next_contract, registrar);
            ctx.emit(KnsEvent::ContractDeployed {
                kind: ContractKind::Registrar,
                address: next_contract,
                deployer: ctx.caller,
            });
            info!("registrar deployed at {} for parent {}", next_contract, parent_node);
            Ok(Some(next_contract))
        }
        KnsCall::DeployResolver => {
            let resolver = PublicResolver::new(next_contract, state.registry.address());
            state.resolvers.insert(next_contract, resolver);
            ctx.emit(KnsEvent::ContractDeployed {
                kind: ContractKind::Resolver,
                address: next_contract,
                deployer: ctx.caller,
            });
            info!("resolver deployed at {}", next_contract);
            Ok(Some(next_contract))
        }

        KnsCall::Register {
            registrar,
            label,
            owner,
        } => {
            let target = state
                .registrars
                .get(registrar)
                .ok_or_else(|| unknown(ContractKind::Registrar, registrar))?;
            target.register(ctx, &mut state.registry, label, *owner)?;
            Ok(None)
        }

        KnsCall::SetAddr { resolver, node, addr } => {
            let target = state
                .resolvers
                .get_mut(resolver)
                .ok_or_else(|| unknown(ContractKind::Resolver, resolver))?;
            target.set_addr(ctx, &state.registry, *node, *addr)?;
            Ok(None)
        }
        KnsCall::SetName { resolver, node, name } => {
            let target = state
                .resolvers
                .get_mut(resolver)
                .ok_or_else(|| unknown(ContractKind::Resolver, resolver))?;
            target.set_name(ctx, &state.registry, *node, name)?;
            Ok(None)
        }
        KnsCall::SetText {
            resolver,
            node,
            key,
            value,
        } => {
            let target = state
                .resolvers
                .get_mut(resolver)
                .ok_or_else(|| unknown(ContractKind::Resolver, resolver))?;
            target.set_text(ctx, &state.registry, *node, key, value)?;
            Ok(None)
        }
        KnsCall::SetContent { resolver, node, hash } => {
            let target = state
                .resolvers
                .get_mut(resolver)
                .ok_or_else(|| unknown(ContractKind::Resolver, resolver))?;
            target.set_content(ctx, &state.registry, *node, *hash)?;
            Ok(None)
        }
        KnsCall::ClearRecords { resolver, node } => {
            let target = state
                .resolvers
                .get_mut(resolver)
                .ok_or_else(|| unknown(ContractKind::Resolver, resolver))?;
            target.clear_records(ctx, &state.registry, *node)?;
            Ok(None)
        }
    }
}
