//! Error types for the Wyrm name service.
//!
//! This module provides the full error hierarchy using `thiserror`.
//! Every failed operation surfaces one of these variants unchanged to the
//! caller and leaves the store untouched.

use thiserror::Error;

/// Result type alias using `WyrmError`.
pub type Result<T> = std::result::Result<T, WyrmError>;

/// Main error type for all Wyrm operations.
#[derive(Debug, Error)]
pub enum WyrmError {
    // ═══════════════════════════════════════════════════════════════════════════
    // REGISTRATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════
    /// The submitted name is malformed (empty or disallowed characters).
    #[error("invalid name: {0}")]
    InvalidName(String),

    /// The name already has an owner. Registrations are permanent, so this
    /// is never recoverable for that name.
    #[error("name already registered: {0}")]
    AlreadyExists(String),

    /// The attached payment does not cover the tier fee. Retryable with a
    /// larger payment.
    #[error("insufficient payment: required {required} base units, offered {offered}")]
    InsufficientPayment {
        /// Fee the name's tier requires.
        required: u128,
        /// Payment the caller attached.
        offered: u128,
    },

    // ═══════════════════════════════════════════════════════════════════════════
    // LOOKUP / MUTATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════
    /// No entry exists for the given name.
    #[error("name not found: {0}")]
    NotFound(String),

    /// The caller is not the current owner of the name.
    #[error("caller {caller} does not own name: {name}")]
    NotAuthorized {
        /// The name whose record was targeted.
        name: String,
        /// The caller that failed the ownership check.
        caller: String,
    },

    // ═══════════════════════════════════════════════════════════════════════════
    // INPUT PARSING ERRORS
    // ═══════════════════════════════════════════════════════════════════════════
    /// An account address string could not be parsed.
    #[error("invalid account address: {0}")]
    InvalidAddress(String),

    /// Invalid hex encoding.
    #[error("invalid hex encoding: {0}")]
    HexError(#[from] hex::FromHexError),

    // ═══════════════════════════════════════════════════════════════════════════
    // STORAGE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════
    /// File I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The persisted store file is corrupt or malformed.
    #[error("store error: {0}")]
    StoreError(String),

    /// Store file format version mismatch.
    #[error("store version mismatch: expected {expected}, got {actual}")]
    VersionMismatch {
        /// Version this build writes and reads.
        expected: u8,
        /// Version found in the file.
        actual: u8,
    },

    // ═══════════════════════════════════════════════════════════════════════════
    // INTERNAL ERRORS
    // ═══════════════════════════════════════════════════════════════════════════
    /// Internal invariant violation (should never happen).
    #[error("internal error: {0}")]
    InternalError(String),
}

impl WyrmError {
    /// Returns true if this error is a clean rejection of the caller's
    /// request: the operation was refused and the store is unchanged.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            WyrmError::InvalidName(_)
                | WyrmError::AlreadyExists(_)
                | WyrmError::InsufficientPayment { .. }
                | WyrmError::NotFound(_)
                | WyrmError::NotAuthorized { .. }
        )
    }

    /// Returns true if resubmitting the same request could succeed.
    ///
    /// Only underpayment qualifies: the caller can retry with a larger
    /// payment. A taken name stays taken and a non-owner stays a non-owner.
    pub fn is_retryable(&self) -> bool {
        matches!(self, WyrmError::InsufficientPayment { .. })
    }
}
