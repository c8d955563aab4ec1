//! In-memory registry store.
//!
//! Fast, thread-safe storage suitable for development, testing,
//! and single-process deployments.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use tracing::{debug, instrument};

use wyrm_core::error::{Result, WyrmError};
use wyrm_core::traits::{NewEntry, RegistryStore};
use wyrm_core::types::{Name, RegistryEntry};

/// All mutable state lives behind one lock so the uniqueness check, id
/// assignment, map insert, and index append commit as a single unit.
/// Splitting these across finer-grained structures would reopen the
/// check-then-act race between concurrent registrations.
#[derive(Debug, Default)]
struct Inner {
    /// Primary storage: name → entry
    entries: HashMap<Name, RegistryEntry>,
    /// Registration-order index, append-only, used for enumeration
    index: Vec<Name>,
    /// Next registration id
    next_id: u64,
}

/// In-memory registry store.
///
/// # Atomicity
///
/// Writers take the write lock for the full check-and-commit sequence, so
/// writes serialize into a total order. Readers take the read lock and may
/// run concurrently; they always observe a consistent snapshot in which the
/// entry map and the index agree.
#[derive(Debug)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                entries: HashMap::new(),
                index: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Creates a store with preallocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(Inner {
                entries: HashMap::with_capacity(capacity),
                index: Vec::with_capacity(capacity),
                next_id: 1,
            }),
        }
    }

    /// Returns the number of registrations.
    pub fn len(&self) -> usize {
        self.inner.read().index.len()
    }

    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.read().index.is_empty()
    }

    /// Clears all entries. Test/tooling helper; live registries never
    /// delete entries.
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.entries.clear();
        inner.index.clear();
        inner.next_id = 1;
    }

    /// Imports committed entries from a snapshot, preserving their ids and
    /// the order given (which becomes the registration order).
    ///
    /// Used when restoring from a persisted file. Fails on duplicate names
    /// without importing anything.
    pub fn import(&self, entries: Vec<RegistryEntry>) -> Result<usize> {
        let mut inner = self.inner.write();

        // Validate the whole snapshot before touching anything
        let mut seen = std::collections::HashSet::with_capacity(entries.len());
        for entry in &entries {
            if inner.entries.contains_key(&entry.name) || !seen.insert(&entry.name) {
                return Err(WyrmError::StoreError(format!(
                    "duplicate name in snapshot: {}",
                    entry.name
                )));
            }
        }

        let count = entries.len();
        for entry in entries {
            if entry.id >= inner.next_id {
                inner.next_id = entry.id + 1;
            }
            inner.index.push(entry.name.clone());
            inner.entries.insert(entry.name.clone(), entry);
        }

        Ok(count)
    }

    fn now() -> u64 {
        Utc::now().timestamp().max(0) as u64
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RegistryStore for MemoryStore {
    async fn get(&self, name: &Name) -> Result<Option<RegistryEntry>> {
        Ok(self.inner.read().entries.get(name).cloned())
    }

    /// Commits a new registration.
    ///
    /// Existence check, id assignment, map insert, and index append all
    /// happen under one write guard; a losing concurrent caller observes
    /// `AlreadyExists` and an unchanged store.
    #[instrument(skip(self, entry), fields(name = %entry.name))]
    async fn insert(&self, entry: NewEntry) -> Result<RegistryEntry> {
        let mut inner = self.inner.write();

        if inner.entries.contains_key(&entry.name) {
            return Err(WyrmError::AlreadyExists(entry.name.to_string()));
        }

        let id = inner.next_id;
        inner.next_id += 1;

        let committed = RegistryEntry {
            id,
            name: entry.name.clone(),
            owner: entry.owner,
            record: entry.record,
            registered_at: Self::now(),
        };

        inner.index.push(entry.name.clone());
        inner.entries.insert(entry.name, committed.clone());

        debug!(id, name = %committed.name, owner = %committed.owner, "Registered name");
        Ok(committed)
    }

    #[instrument(skip(self, record))]
    async fn update_record(&self, name: &Name, record: String) -> Result<RegistryEntry> {
        let mut inner = self.inner.write();

        let entry = inner
            .entries
            .get_mut(name)
            .ok_or_else(|| WyrmError::NotFound(name.to_string()))?;

        entry.record = record;
        let updated = entry.clone();

        debug!(name = %name, "Updated record");
        Ok(updated)
    }

    async fn all_names(&self) -> Result<Vec<Name>> {
        Ok(self.inner.read().index.clone())
    }

    /// Returns all entries in registration order.
    ///
    /// Joined through the index so the order is registration order even
    /// though the map itself is unordered.
    async fn entries(&self) -> Result<Vec<RegistryEntry>> {
        let inner = self.inner.read();
        let mut out = Vec::with_capacity(inner.index.len());
        for name in &inner.index {
            let entry = inner.entries.get(name).ok_or_else(|| {
                WyrmError::InternalError(format!("index references missing entry: {}", name))
            })?;
            out.push(entry.clone());
        }
        Ok(out)
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.inner.read().index.len() as u64)
    }
}
