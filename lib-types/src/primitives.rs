//! Canonical Primitive Types for KNS
//!
//! Every identity that crosses a component boundary (accounts, contracts,
//! transactions) is a fixed 32-byte value:
//! - Fixed-size (no dynamic allocation)
//! - Deterministically serializable
//! - Cheap to copy and compare
//!
//! The all-zero value is the "unset" sentinel everywhere.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ledger height (0 = nothing committed yet)
pub type BlockHeight = u64;

/// Error returned when parsing a hex-encoded 32-byte value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseBytesError {
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("expected 32 bytes, got {0}")]
    InvalidLength(usize),
}

/// Decode a hex string (optional `0x` prefix) into exactly 32 bytes
pub fn parse_bytes32(s: &str) -> Result<[u8; 32], ParseBytesError> {
    let trimmed = s.strip_prefix("0x").unwrap_or(s);
    let decoded = hex::decode(trimmed).map_err(|e| ParseBytesError::InvalidHex(e.to_string()))?;
    if decoded.len() != 32 {
        return Err(ParseBytesError::InvalidLength(decoded.len()));
    }
    let mut out = [0u8; 32];
    out.copy_from_slice(&decoded);
    Ok(out)
}

// ============================================================================
// IDENTITY TYPES
// ============================================================================

/// 32-byte account or contract address
///
/// Externally owned accounts and deployed contracts share one address space.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize, Default)]
pub struct Address(pub [u8; 32]);

impl Address {
    /// The zero address: "no owner", "no resolver", "unresolved"
    pub const ZERO: Self = Self([0u8; 32]);

    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub const fn zero() -> Self {
        Self::ZERO
    }

    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Deterministic contract address for the `nonce`-th deployment by `deployer`
    pub fn for_contract(deployer: &Address, nonce: u64) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"kns:contract:v1");
        hasher.update(deployer.as_bytes());
        hasher.update(&nonce.to_le_bytes());
        Self(*hasher.finalize().as_bytes())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = ParseBytesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_bytes32(s).map(Self)
    }
}

impl From<[u8; 32]> for Address {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// ============================================================================
// HASH TYPES
// ============================================================================

/// 32-byte transaction hash
#[derive(Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize, Default)]
pub struct TxHash(pub [u8; 32]);

impl TxHash {
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Debug for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxHash({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl From<[u8; 32]> for TxHash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_zero_sentinel() {
        assert!(Address::ZERO.is_zero());
        assert!(Address::default().is_zero());
        assert!(!Address::new([3u8; 32]).is_zero());
    }

    #[test]
    fn test_address_display_parses_back() {
        let addr = Address::new([0xab; 32]);
        let shown = addr.to_string();
        assert!(shown.starts_with("0x"));
        assert_eq!(shown.parse::<Address>().unwrap(), addr);
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert_eq!(
            "0xabcd".parse::<Address>(),
            Err(ParseBytesError::InvalidLength(2))
        );
        assert!(matches!(
            "zz".parse::<Address>(),
            Err(ParseBytesError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_contract_addresses_are_deterministic_and_distinct() {
        let deployer = Address::new([1u8; 32]);
        let first = Address::for_contract(&deployer, 0);
        assert_eq!(first, Address::for_contract(&deployer, 0));
        assert_ne!(first, Address::for_contract(&deployer, 1));
        assert_ne!(first, Address::for_contract(&Address::new([2u8; 32]), 0));
        assert!(!first.is_zero());
    }

    #[test]
    fn test_tx_hash_basics() {
        let hash = TxHash::new([2u8; 32]);
        assert!(!hash.is_zero());
        assert_eq!(hash.as_bytes(), &[2u8; 32]);
    }
}
