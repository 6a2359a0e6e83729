//! # Identity Newtypes
//!
//! Domain-primitive newtypes for identifiers throughout the signature-asset
//! core. Each identifier is a distinct type — you cannot pass a
//! [`CampaignId`] where a [`VersionId`] is expected.
//!
//! ## Validation
//!
//! String-based identifiers ([`OwnerAddress`], [`TxHash`]) validate format
//! at construction time. Index-based identifiers ([`CampaignId`],
//! [`VersionId`]) are always valid by construction.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Helper macro to implement `Deserialize` for string newtypes that must
/// validate their contents. Deserializes as a plain `String`, then routes
/// through the type's `new()` constructor so that invalid values are
/// rejected at deserialization time — not silently accepted.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(&raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Index-based identifiers (always valid by construction)
// ---------------------------------------------------------------------------

/// Identifier of a campaign on the petition contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CampaignId(u64);

impl CampaignId {
    /// Wrap a raw campaign index.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw index value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for CampaignId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CampaignId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Index of one entry in an owner's signature version history.
///
/// Key material in the local keystore is keyed by `(owner, version)`, so a
/// version id outlives the pointer record it was created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VersionId(u64);

impl VersionId {
    /// Wrap a raw version index.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw index value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for VersionId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for VersionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// String-based identifiers (validated at construction)
// ---------------------------------------------------------------------------

/// A 20-byte ledger account address.
///
/// String form is `0x` + 40 hex characters. Comparison is
/// case-insensitive: the address is stored as raw bytes and rendered
/// lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OwnerAddress([u8; 20]);

impl OwnerAddress {
    /// Parse an address from its `0x`-prefixed hex string form.
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let hex = s.strip_prefix("0x").ok_or_else(|| ValidationError::InvalidAddress {
            got: s.to_string(),
            reason: "missing 0x prefix".into(),
        })?;
        if !hex.is_ascii() || hex.len() != 40 {
            return Err(ValidationError::InvalidAddress {
                got: s.to_string(),
                reason: format!("expected 40 hex chars, got {}", hex.len()),
            });
        }
        let mut out = [0u8; 20];
        for (i, byte) in out.iter_mut().enumerate() {
            let pair = &hex[i * 2..i * 2 + 2];
            *byte = u8::from_str_radix(pair, 16).map_err(|_| ValidationError::InvalidAddress {
                got: s.to_string(),
                reason: format!("non-hex pair {pair:?}"),
            })?;
        }
        Ok(Self(out))
    }

    /// Construct from raw address bytes.
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Access the raw address bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl std::fmt::Display for OwnerAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x")?;
        for b in &self.0 {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for OwnerAddress {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for OwnerAddress {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl_validating_deserialize!(OwnerAddress);

/// A 32-byte transaction hash referencing the ledger transaction that
/// produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TxHash([u8; 32]);

impl TxHash {
    /// Parse a transaction hash from its `0x`-prefixed hex string form.
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let hex = s.strip_prefix("0x").ok_or_else(|| ValidationError::InvalidHex(
            "missing 0x prefix".into(),
        ))?;
        if !hex.is_ascii() || hex.len() != 64 {
            return Err(ValidationError::InvalidHexLength {
                expected: 32,
                got: hex.len() / 2,
            });
        }
        let mut out = [0u8; 32];
        for (i, byte) in out.iter_mut().enumerate() {
            let pair = &hex[i * 2..i * 2 + 2];
            *byte = u8::from_str_radix(pair, 16)
                .map_err(|_| ValidationError::InvalidHex(format!("non-hex pair {pair:?}")))?;
        }
        Ok(Self(out))
    }

    /// Construct from raw hash bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Access the raw hash bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Display for TxHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x")?;
        for b in &self.0 {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

impl Serialize for TxHash {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl_validating_deserialize!(TxHash);

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: &str = "0x1f9090aae28b8a3dceadf281b0f12828e676c326";

    #[test]
    fn owner_address_round_trip() {
        let a = OwnerAddress::new(ADDR).unwrap();
        assert_eq!(a.to_string(), ADDR);
    }

    #[test]
    fn owner_address_uppercase_normalizes() {
        let upper = format!("0x{}", ADDR[2..].to_uppercase());
        let a = OwnerAddress::new(&upper).unwrap();
        let b = OwnerAddress::new(ADDR).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), ADDR);
    }

    #[test]
    fn owner_address_rejects_missing_prefix() {
        assert!(OwnerAddress::new(&ADDR[2..]).is_err());
    }

    #[test]
    fn owner_address_rejects_wrong_length() {
        assert!(OwnerAddress::new("0x1234").is_err());
    }

    #[test]
    fn owner_address_rejects_non_hex() {
        let bad = format!("0x{}", "zz".repeat(20));
        assert!(OwnerAddress::new(&bad).is_err());
    }

    #[test]
    fn owner_address_serde_rejects_invalid() {
        let ok: Result<OwnerAddress, _> = serde_json::from_str(&format!("\"{ADDR}\""));
        assert!(ok.is_ok());
        let bad: Result<OwnerAddress, _> = serde_json::from_str("\"not-an-address\"");
        assert!(bad.is_err());
    }

    #[test]
    fn tx_hash_round_trip() {
        let h = format!("0x{}", "ab".repeat(32));
        let t = TxHash::new(&h).unwrap();
        assert_eq!(t.to_string(), h);
    }

    #[test]
    fn tx_hash_rejects_short() {
        assert!(TxHash::new("0xabcd").is_err());
    }

    #[test]
    fn ids_display_raw_value() {
        assert_eq!(CampaignId::new(7).to_string(), "7");
        assert_eq!(VersionId::new(0).to_string(), "0");
    }
}
