//! Protocol constants for the Wyrm name service.
//!
//! Fees are denominated in base units of 10^-18 of the settlement currency,
//! so they stay exact integers end to end. The tier boundaries and amounts
//! match the deployed pricing: shorter names are scarcer and cost more.

// ═══════════════════════════════════════════════════════════════════════════════
// FEE TIERS
// ═══════════════════════════════════════════════════════════════════════════════

/// Registration fee for premium names (length 3 or shorter): 0.5 units.
pub const FEE_PREMIUM: u128 = 500_000_000_000_000_000;

/// Registration fee for standard names (length exactly 4): 0.3 units.
pub const FEE_STANDARD: u128 = 300_000_000_000_000_000;

/// Registration fee for base names (length 5 or longer): 0.1 units.
pub const FEE_BASE: u128 = 100_000_000_000_000_000;

/// Number of base units per whole settlement unit (18 decimals).
pub const UNITS_PER_WHOLE: u128 = 1_000_000_000_000_000_000;

/// Longest name that still prices at the premium tier.
pub const PREMIUM_MAX_LEN: usize = 3;

/// Name length that prices at the standard tier.
pub const STANDARD_LEN: usize = 4;

// ═══════════════════════════════════════════════════════════════════════════════
// IDENTITY
// ═══════════════════════════════════════════════════════════════════════════════

/// Size of an account address in bytes (20 bytes = 160 bits).
pub const ACCOUNT_ADDRESS_SIZE: usize = 20;

// ═══════════════════════════════════════════════════════════════════════════════
// STORE FILE FORMAT
// ═══════════════════════════════════════════════════════════════════════════════

/// Magic bytes at the start of a persisted store file.
pub const STORE_MAGIC: &[u8; 4] = b"WYRM";

/// Current store file format version.
/// Increment when making breaking changes to the on-disk layout.
pub const STORE_VERSION: u8 = 1;

/// Size of the store file header: magic (4) + version (1) + count (8).
pub const STORE_HEADER_SIZE: usize = 13;
