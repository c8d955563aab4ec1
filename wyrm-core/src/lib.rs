//! # Wyrm Core
//!
//! Core types, errors, and traits for the Wyrm name service.
//!
//! This crate provides the foundational building blocks used by all other Wyrm crates:
//!
//! - **Types**: Domain models for names, accounts, registry entries, and price tiers
//! - **Errors**: Comprehensive error types with context
//! - **Constants**: Tier fees and store format constants
//! - **Validation**: Name normalization and fee classification
//! - **Traits**: The store interface implemented by storage backends
//!
//! ## Example
//!
//! ```rust
//! use wyrm_core::{classify, Tier};
//!
//! let (name, quote) = classify("Knight").unwrap();
//! assert_eq!(name.as_str(), "knight");
//! assert_eq!(quote.tier, Tier::Base);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;
pub mod validate;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{Result, WyrmError};
pub use traits::*;
pub use types::*;
pub use validate::classify;
