//! Common traits for the Wyrm name service.
//!
//! [`RegistryStore`] is the seam between the engine and storage backends,
//! enabling in-memory stores for tests and persistent stores in production.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{AccountAddress, Name, RegistryEntry};

// ═══════════════════════════════════════════════════════════════════════════════
// STORE TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// A registration about to be committed. The store assigns the id and
/// timestamp at commit time.
#[derive(Clone, Debug)]
pub struct NewEntry {
    /// The validated, normalized name.
    pub name: Name,
    /// The caller becoming the immutable owner.
    pub owner: AccountAddress,
    /// Initial record value (empty for fresh registrations).
    pub record: String,
}

/// Interface for registry entry storage.
///
/// Implementations must make each mutation atomic as a unit: the uniqueness
/// check, map insert, and enumeration-index append of [`insert`] either all
/// happen or none do, and no reader may ever observe a half-applied entry.
///
/// [`insert`]: RegistryStore::insert
#[async_trait]
pub trait RegistryStore: Send + Sync {
    /// Returns the entry for a name, if one exists. Read-only.
    async fn get(&self, name: &Name) -> Result<Option<RegistryEntry>>;

    /// Commits a new registration.
    ///
    /// Fails with `AlreadyExists` if the name has an owner; the store is
    /// unchanged in that case. On success returns the committed entry with
    /// its assigned id and timestamp.
    async fn insert(&self, entry: NewEntry) -> Result<RegistryEntry>;

    /// Replaces the record of an existing entry, leaving the owner untouched.
    ///
    /// Fails with `NotFound` if the name is unregistered. Returns the
    /// updated entry.
    async fn update_record(&self, name: &Name, record: String) -> Result<RegistryEntry>;

    /// Returns all registered names in registration order.
    ///
    /// The snapshot reflects only committed entries.
    async fn all_names(&self) -> Result<Vec<Name>>;

    /// Returns all entries in registration order.
    async fn entries(&self) -> Result<Vec<RegistryEntry>>;

    /// Returns the total number of registrations.
    async fn count(&self) -> Result<u64>;
}
