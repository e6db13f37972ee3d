//! Call context threaded through contract calls.
//!
//! Authorization is derived from the context, never from caller-supplied
//! parameters. When a contract calls another contract (the registrar calling
//! the registry) the nested call runs with the calling contract's address as
//! its caller.

use lib_types::{Address, BlockHeight};
use serde::{Deserialize, Serialize};

use super::events::KnsEvent;

/// Maximum nested contract call depth
pub const MAX_CALL_DEPTH: u32 = 4;

/// Origin of a call for authorization purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallOrigin {
    /// Signed transaction from an account
    User,
    /// Contract-to-contract call
    Contract,
}

#[derive(Debug, Clone)]
pub struct CallContext {
    /// Address the current frame is authorized as
    pub caller: Address,
    pub origin: CallOrigin,
    /// Height the enclosing transaction will commit at
    pub block_height: BlockHeight,
    /// 0 = top-level user call
    pub call_depth: u32,
    events: Vec<KnsEvent>,
}

impl CallContext {
    pub fn new(caller: Address, block_height: BlockHeight) -> Self {
        Self {
            caller,
            origin: CallOrigin::User,
            block_height,
            call_depth: 0,
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: KnsEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[KnsEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<KnsEvent> {
        self.events
    }

    /// Run `f` as a nested call made by `contract`.
    ///
    /// Caller, origin and depth are restored afterwards; events emitted in the
    /// nested frame stay in the shared buffer.
    pub fn call_as_contract<R>(&mut self, contract: Address, f: impl FnOnce(&mut CallContext) -> R) -> R {
        debug_assert!(self.call_depth < MAX_CALL_DEPTH, "contract call depth exceeded");

        let saved_caller = std::mem::replace(&mut self.caller, contract);
        let saved_origin = std::mem::replace(&mut self.origin, CallOrigin::Contract);
        self.call_depth += 1;

        let result = f(self);

        self.call_depth -= 1;
        self.origin = saved_origin;
        self.caller = saved_caller;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_call_restores_caller() {
        let user = Address::new([1; 32]);
        let contract = Address::new([2; 32]);
        let mut ctx = CallContext::new(user, 5);

        let seen = ctx.call_as_contract(contract, |inner| {
            assert_eq!(inner.origin, CallOrigin::Contract);
            assert_eq!(inner.call_depth, 1);
            inner.caller
        });

        assert_eq!(seen, contract);
        assert_eq!(ctx.caller, user);
        assert_eq!(ctx.origin, CallOrigin::User);
        assert_eq!(ctx.call_depth, 0);
    }
}
