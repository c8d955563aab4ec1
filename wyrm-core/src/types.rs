//! Domain types for the Wyrm name service.
//!
//! - [`AccountAddress`]: the opaque identity that owns names
//! - [`Name`]: a validated, normalized registry key
//! - [`RegistryEntry`]: the stored (name, owner, record) tuple
//! - [`Tier`] / [`Quote`]: length-based pricing

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::{
    ACCOUNT_ADDRESS_SIZE, FEE_BASE, FEE_PREMIUM, FEE_STANDARD, PREMIUM_MAX_LEN, STANDARD_LEN,
};
use crate::error::{Result, WyrmError};

// ═══════════════════════════════════════════════════════════════════════════════
// ACCOUNT ADDRESS
// ═══════════════════════════════════════════════════════════════════════════════

/// A 20-byte account address identifying a caller.
///
/// Addresses are opaque: nothing beyond equality is ever interpreted.
/// Serialized as a lowercase hex string with `0x` prefix.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountAddress {
    bytes: [u8; ACCOUNT_ADDRESS_SIZE],
}

impl AccountAddress {
    /// Creates an address from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != ACCOUNT_ADDRESS_SIZE {
            return Err(WyrmError::InvalidAddress(format!(
                "expected {} bytes, got {}",
                ACCOUNT_ADDRESS_SIZE,
                bytes.len()
            )));
        }

        let mut arr = [0u8; ACCOUNT_ADDRESS_SIZE];
        arr.copy_from_slice(bytes);
        Ok(Self { bytes: arr })
    }

    /// Creates from a fixed-size array.
    pub fn from_array(bytes: [u8; ACCOUNT_ADDRESS_SIZE]) -> Self {
        Self { bytes }
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the `0x`-prefixed lowercase hex form.
    pub fn to_hex_string(&self) -> String {
        format!("0x{}", hex::encode(self.bytes))
    }

    /// Parses from hex string (with or without 0x prefix).
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let s = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
        let bytes = hex::decode(s)?;
        Self::from_bytes(&bytes)
    }

    /// Returns the zero address.
    pub fn zero() -> Self {
        Self {
            bytes: [0u8; ACCOUNT_ADDRESS_SIZE],
        }
    }

    /// Returns true if this is the zero address.
    pub fn is_zero(&self) -> bool {
        self.bytes.iter().all(|&b| b == 0)
    }
}

impl fmt::Debug for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountAddress({})", self.to_hex_string())
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex_string())
    }
}

impl Serialize for AccountAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex_string())
    }
}

impl<'de> Deserialize<'de> for AccountAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// NAME
// ═══════════════════════════════════════════════════════════════════════════════

/// A validated, normalized registry key.
///
/// Construction goes through [`Name::parse`], which trims surrounding
/// whitespace, lowercases, and rejects anything outside `[a-z0-9-]`.
/// Normalization happens exactly once, before any uniqueness check, so
/// `"ABC "` and `"abc"` are the same key everywhere.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    /// Parses and normalizes a raw caller-supplied string into a `Name`.
    pub fn parse(raw: &str) -> Result<Self> {
        let normalized = raw.trim().to_ascii_lowercase();

        if normalized.is_empty() {
            return Err(WyrmError::InvalidName("name is empty".into()));
        }

        // Allowed charset after normalization: [a-z0-9-]
        if let Some(c) = normalized
            .chars()
            .find(|c| !c.is_ascii_lowercase() && !c.is_ascii_digit() && *c != '-')
        {
            return Err(WyrmError::InvalidName(format!(
                "disallowed character {:?} in {:?}",
                c, normalized
            )));
        }

        Ok(Self(normalized))
    }

    /// Returns the normalized string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the name's length in characters.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    /// Names are never empty; kept for clippy symmetry with [`Name::len`].
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({:?})", self.0)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Deserialization re-validates so a persisted or wire-supplied name can
// never bypass the normalization invariant.
impl<'de> Deserialize<'de> for Name {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PRICE TIERS
// ═══════════════════════════════════════════════════════════════════════════════

/// Length-based price tier for a name.
///
/// Fee strictly decreases as the tier's lengths grow; see the constants
/// module for the amounts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Length 3 or shorter.
    Premium,
    /// Length exactly 4.
    Standard,
    /// Length 5 or longer.
    Base,
}

impl Tier {
    /// Classifies a name length into its tier.
    pub fn for_len(len: usize) -> Self {
        if len <= PREMIUM_MAX_LEN {
            Tier::Premium
        } else if len == STANDARD_LEN {
            Tier::Standard
        } else {
            Tier::Base
        }
    }

    /// Returns the registration fee this tier requires, in base units.
    pub fn fee(&self) -> u128 {
        match self {
            Tier::Premium => FEE_PREMIUM,
            Tier::Standard => FEE_STANDARD,
            Tier::Base => FEE_BASE,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Premium => write!(f, "premium"),
            Tier::Standard => write!(f, "standard"),
            Tier::Base => write!(f, "base"),
        }
    }
}

/// The price quote produced by classifying a name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// The name's price tier.
    pub tier: Tier,
    /// Fee required to register, in base units.
    pub required_fee: u128,
}

// ═══════════════════════════════════════════════════════════════════════════════
// REGISTRY ENTRY
// ═══════════════════════════════════════════════════════════════════════════════

/// A committed registration: the (name, owner, record) tuple plus metadata.
///
/// Created exactly once per name. The owner never changes and entries are
/// never deleted; only `record` is mutable, and only by the owner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    /// Sequential registration number (assigned by the store, starting at 1).
    pub id: u64,
    /// The registered name.
    pub name: Name,
    /// The immutable owning identity.
    pub owner: AccountAddress,
    /// Owner-writable text record. Empty on registration.
    pub record: String,
    /// Unix timestamp (seconds) when the registration committed.
    pub registered_at: u64,
}

/// One row of a full enumeration: the name joined with its current owner
/// and latest record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredName {
    /// The registered name.
    pub name: Name,
    /// The owning identity.
    pub owner: AccountAddress,
    /// The current record value.
    pub record: String,
}

impl From<RegistryEntry> for RegisteredName {
    fn from(entry: RegistryEntry) -> Self {
        Self {
            name: entry.name,
            owner: entry.owner,
            record: entry.record,
        }
    }
}
