//! # Wyrm Registry
//!
//! Registry entry storage for the Wyrm name service.
//!
//! This crate provides the storage backends behind the engine:
//!
//! - **Memory**: Fast in-memory store for development and testing
//! - **File**: Persistent file-based store for single-node deployments
//!
//! Both backends give every mutation all-or-nothing semantics: the entry
//! map and the registration-order index commit together or not at all.
//!
//! ## Example
//!
//! ```rust,ignore
//! use wyrm_registry::{MemoryStore, Store};
//!
//! let store = MemoryStore::new();
//! let entry = store.insert(new_entry).await?;
//! let names = store.all_names().await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// Re-export the trait from core
pub use wyrm_core::traits::RegistryStore as Store;
