//! KNS primitives.
//! Stable, protocol-neutral, behavior-free.
//!
//! Accounts, contracts and transactions are identified by fixed 32-byte
//! values. Human-readable names and text records live in `lib-kns`.

pub mod primitives;

pub use primitives::{parse_bytes32, Address, BlockHeight, ParseBytesError, TxHash};
