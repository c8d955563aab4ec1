//! # Wyrm Engine
//!
//! The registration engine of the Wyrm name service: orchestrates
//! register / set-record / lookup / enumerate operations against a
//! [`RegistryStore`](wyrm_core::traits::RegistryStore), enforcing payment
//! and ownership rules.
//!
//! The engine holds no state of its own beyond the store handle; every
//! operation is a single atomic transaction against the store, and every
//! failure leaves the store unchanged.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use wyrm_engine::NameService;
//! use wyrm_registry::MemoryStore;
//!
//! let service = NameService::new(Arc::new(MemoryStore::new()));
//! let entry = service.register(caller, "knight", payment).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod command;
mod service;

pub use command::{Command, CommandOutput};
pub use service::NameService;
