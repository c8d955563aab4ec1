//! DTOs for API requests and responses.
//!
//! Payments cross the wire as decimal strings: a u128 of base units does
//! not fit a JSON number without precision loss in common clients.

use serde::{Deserialize, Serialize};

use wyrm_core::types::{Quote, RegisteredName, RegistryEntry};

/// Request to register a name.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Candidate name (raw; the server normalizes).
    pub name: String,
    /// Hex account address of the registering caller.
    pub owner: String,
    /// Attached payment in base units, as a decimal string.
    pub payment: String,
}

/// Request to replace a record.
#[derive(Debug, Deserialize)]
pub struct SetRecordRequest {
    /// Hex account address of the caller (must be the owner).
    pub caller: String,
    /// The new record value. May be empty.
    pub record: String,
}

/// A committed registry entry.
#[derive(Debug, Serialize)]
pub struct EntryDto {
    /// Sequential registration number.
    pub id: u64,
    /// The normalized name.
    pub name: String,
    /// Owner address (hex).
    pub owner: String,
    /// Current record value.
    pub record: String,
    /// Unix timestamp of registration.
    pub registered_at: u64,
}

impl From<RegistryEntry> for EntryDto {
    fn from(entry: RegistryEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name.to_string(),
            owner: entry.owner.to_hex_string(),
            record: entry.record,
            registered_at: entry.registered_at,
        }
    }
}

/// One row of the full enumeration.
#[derive(Debug, Serialize)]
pub struct NameRow {
    /// The normalized name.
    pub name: String,
    /// Owner address (hex).
    pub owner: String,
    /// Current record value.
    pub record: String,
}

impl From<RegisteredName> for NameRow {
    fn from(row: RegisteredName) -> Self {
        Self {
            name: row.name.to_string(),
            owner: row.owner.to_hex_string(),
            record: row.record,
        }
    }
}

/// Response for the enumeration endpoint.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    /// Rows in registration order.
    pub names: Vec<NameRow>,
    /// Total number of registrations.
    pub count: u64,
}

/// Response resolving a name to its owner.
#[derive(Debug, Serialize)]
pub struct OwnerResponse {
    /// The normalized name.
    pub name: String,
    /// Owner address (hex).
    pub owner: String,
}

/// Response resolving a name to its record.
#[derive(Debug, Serialize)]
pub struct RecordResponse {
    /// The normalized name.
    pub name: String,
    /// Current record value (may be empty).
    pub record: String,
}

/// Response pricing a candidate name.
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    /// The candidate name as submitted.
    pub name: String,
    /// The price tier.
    pub tier: String,
    /// Required fee in base units, as a decimal string.
    pub required_fee: String,
}

impl QuoteResponse {
    /// Builds a response from an engine quote.
    pub fn new(name: impl Into<String>, quote: Quote) -> Self {
        Self {
            name: name.into(),
            tier: quote.tier.to_string(),
            required_fee: quote.required_fee.to_string(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` when the server answers.
    pub status: String,
    /// Crate version.
    pub version: String,
}
