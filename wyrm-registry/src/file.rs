//! File-backed registry store with persistence.
//!
//! Wraps a [`MemoryStore`] and persists the full entry snapshot to a single
//! file, saving atomically via a temp file and rename. Suitable for
//! single-node deployments where registrations must survive restarts.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use wyrm_core::constants::{STORE_HEADER_SIZE, STORE_MAGIC, STORE_VERSION};
use wyrm_core::error::{Result, WyrmError};
use wyrm_core::traits::{NewEntry, RegistryStore};
use wyrm_core::types::{Name, RegistryEntry};

use crate::MemoryStore;

/// File-backed registry store.
///
/// # File Format
///
/// ```text
/// magic (4 bytes): "WYRM"
/// version (1 byte): 1
/// count (8 bytes, LE): number of entries
/// entries (variable): JSON array of entries in registration order
/// ```
///
/// The entry order in the file is the registration order, so a reload
/// reconstructs the enumeration index without any further bookkeeping.
pub struct FileStore {
    /// Path to the storage file
    path: PathBuf,
    /// In-memory storage
    memory: MemoryStore,
    /// Whether there are unsaved changes
    dirty: AtomicBool,
    /// Auto-save threshold (save after N writes)
    auto_save_threshold: u64,
    /// Writes since last save
    writes_since_save: AtomicU64,
    /// Serializes saves; all saves share one temp path
    save_lock: Mutex<()>,
}

impl FileStore {
    /// Creates a new file store at the given path.
    ///
    /// If the file exists, it is loaded. Otherwise an empty store is
    /// created and the file appears on first save.
    pub async fn new(path: impl AsRef<Path>) -> Result<Self> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
            memory: MemoryStore::new(),
            dirty: AtomicBool::new(false),
            auto_save_threshold: 64,
            writes_since_save: AtomicU64::new(0),
            save_lock: Mutex::new(()),
        };

        if store.path.exists() {
            store.load().await?;
        }

        Ok(store)
    }

    /// Creates a file store with a custom auto-save threshold.
    pub async fn with_auto_save(path: impl AsRef<Path>, threshold: u64) -> Result<Self> {
        let mut store = Self::new(path).await?;
        store.auto_save_threshold = threshold;
        Ok(store)
    }

    /// Loads entries from the file.
    #[instrument(skip(self))]
    async fn load(&self) -> Result<()> {
        let contents = fs::read(&self.path).await?;

        if contents.len() < STORE_HEADER_SIZE {
            return Err(WyrmError::StoreError("file too short".into()));
        }

        if &contents[0..4] != STORE_MAGIC {
            return Err(WyrmError::StoreError("invalid magic bytes".into()));
        }

        let version = contents[4];
        if version != STORE_VERSION {
            return Err(WyrmError::VersionMismatch {
                expected: STORE_VERSION,
                actual: version,
            });
        }

        let count = u64::from_le_bytes(
            contents[5..STORE_HEADER_SIZE]
                .try_into()
                .map_err(|_| WyrmError::StoreError("invalid count field".into()))?,
        );
        info!(count, "Loading registry entries from file");

        if contents.len() > STORE_HEADER_SIZE {
            let entries: Vec<RegistryEntry> =
                serde_json::from_slice(&contents[STORE_HEADER_SIZE..])?;

            if entries.len() as u64 != count {
                return Err(WyrmError::StoreError(format!(
                    "header promises {} entries, payload has {}",
                    count,
                    entries.len()
                )));
            }

            self.memory.import(entries)?;
        } else if count != 0 {
            return Err(WyrmError::StoreError(
                "header promises entries but payload is empty".into(),
            ));
        }

        self.dirty.store(false, Ordering::SeqCst);
        debug!("Registry store loaded");
        Ok(())
    }

    /// Saves all entries to the file.
    ///
    /// Writes to a temp file, syncs, then renames over the target so a
    /// crash mid-save never corrupts the previous snapshot. Saves run one
    /// at a time: they share the temp path, and two interleaved saves
    /// could truncate each other's half-written file. The snapshot is
    /// taken after acquiring the lock, so the last save to run wins with
    /// a complete, current snapshot.
    #[instrument(skip(self))]
    pub async fn save(&self) -> Result<()> {
        let _guard = self.save_lock.lock().await;

        let entries = self.memory.entries().await?;
        let count = entries.len() as u64;

        info!(count, path = ?self.path, "Saving registry store to file");

        let serialized = serde_json::to_vec(&entries)?;

        let mut contents = Vec::with_capacity(STORE_HEADER_SIZE + serialized.len());
        contents.extend_from_slice(STORE_MAGIC);
        contents.push(STORE_VERSION);
        contents.extend_from_slice(&count.to_le_bytes());
        contents.extend_from_slice(&serialized);

        let temp_path = self.path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(&contents).await?;
        file.sync_all().await?;

        fs::rename(&temp_path, &self.path).await?;

        self.dirty.store(false, Ordering::SeqCst);
        self.writes_since_save.store(0, Ordering::SeqCst);

        debug!("Registry store saved");
        Ok(())
    }

    /// Checks if there are unsaved changes.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Forces a save if dirty.
    pub async fn flush(&self) -> Result<()> {
        if self.is_dirty() {
            self.save().await?;
        }
        Ok(())
    }

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the number of registrations.
    pub fn len(&self) -> usize {
        self.memory.len()
    }

    /// Returns true if empty.
    pub fn is_empty(&self) -> bool {
        self.memory.is_empty()
    }

    /// Best-effort save once the write counter crosses the threshold.
    ///
    /// Called after the memory commit, which is the point of truth; a
    /// failed save must not turn a committed write into a reported error.
    /// On failure the store stays dirty and the counter is not reset, so
    /// the next write or `flush` retries.
    async fn maybe_auto_save(&self) {
        let writes = self.writes_since_save.fetch_add(1, Ordering::SeqCst);
        if writes >= self.auto_save_threshold {
            if let Err(err) = self.save().await {
                warn!(error = %err, path = ?self.path, "Auto-save failed, registry stays dirty");
            }
        }
    }
}

impl Drop for FileStore {
    fn drop(&mut self) {
        // Best effort only; we cannot await in Drop
        if self.is_dirty() {
            warn!("FileStore dropped with unsaved changes");
        }
    }
}

#[async_trait]
impl RegistryStore for FileStore {
    async fn get(&self, name: &Name) -> Result<Option<RegistryEntry>> {
        self.memory.get(name).await
    }

    async fn insert(&self, entry: NewEntry) -> Result<RegistryEntry> {
        let committed = self.memory.insert(entry).await?;
        self.dirty.store(true, Ordering::SeqCst);
        self.maybe_auto_save().await;
        Ok(committed)
    }

    async fn update_record(&self, name: &Name, record: String) -> Result<RegistryEntry> {
        let updated = self.memory.update_record(name, record).await?;
        self.dirty.store(true, Ordering::SeqCst);
        self.maybe_auto_save().await;
        Ok(updated)
    }

    async fn all_names(&self) -> Result<Vec<Name>> {
        self.memory.all_names().await
    }

    async fn entries(&self) -> Result<Vec<RegistryEntry>> {
        self.memory.entries().await
    }

    async fn count(&self) -> Result<u64> {
        self.memory.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use wyrm_core::types::AccountAddress;

    fn new_entry(name: &str, owner: u8) -> NewEntry {
        NewEntry {
            name: Name::parse(name).unwrap(),
            owner: AccountAddress::from_array([owner; 20]),
            record: String::new(),
        }
    }

    #[tokio::test]
    async fn test_new_empty_store() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("registry.wyrm");

        let store = FileStore::new(&path).await.unwrap();
        assert!(store.is_empty());
        assert!(!path.exists()); // File not created until save
    }

    #[tokio::test]
    async fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("registry.wyrm");

        let original = {
            let store = FileStore::new(&path).await.unwrap();
            store.insert(new_entry("abc", 0x01)).await.unwrap();
            store.insert(new_entry("defg", 0x02)).await.unwrap();
            store
                .update_record(&Name::parse("abc").unwrap(), "hello".into())
                .await
                .unwrap();
            store.save().await.unwrap();
            store.entries().await.unwrap()
        };

        let store = FileStore::new(&path).await.unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.entries().await.unwrap(), original);

        // Registration order survives the round trip
        let names: Vec<String> = store
            .all_names()
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(names, vec!["abc", "defg"]);

        // Record updates do too
        let entry = store
            .get(&Name::parse("abc").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(entry.record, "hello");
    }

    #[tokio::test]
    async fn test_ids_continue_after_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("registry.wyrm");

        {
            let store = FileStore::new(&path).await.unwrap();
            store.insert(new_entry("abc", 0x01)).await.unwrap();
            store.save().await.unwrap();
        }

        let store = FileStore::new(&path).await.unwrap();
        let next = store.insert(new_entry("def", 0x02)).await.unwrap();
        assert_eq!(next.id, 2);
    }

    #[tokio::test]
    async fn test_dirty_tracking() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("registry.wyrm");

        let store = FileStore::new(&path).await.unwrap();
        assert!(!store.is_dirty());

        store.insert(new_entry("abc", 0x01)).await.unwrap();
        assert!(store.is_dirty());

        store.save().await.unwrap();
        assert!(!store.is_dirty());
    }

    #[tokio::test]
    async fn test_flush() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("registry.wyrm");

        let store = FileStore::new(&path).await.unwrap();
        store.insert(new_entry("abc", 0x01)).await.unwrap();

        store.flush().await.unwrap();
        assert!(!store.is_dirty());
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_auto_save() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("registry.wyrm");

        // Threshold 2: auto-save fires once writes_since_save reaches 2
        let store = FileStore::with_auto_save(&path, 2).await.unwrap();

        store.insert(new_entry("aaa", 0x01)).await.unwrap();
        store.insert(new_entry("bbb", 0x01)).await.unwrap();
        store.insert(new_entry("ccc", 0x01)).await.unwrap();

        let reloaded = FileStore::new(&path).await.unwrap();
        assert_eq!(reloaded.len(), 3);
    }

    #[tokio::test]
    async fn test_atomic_save_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("registry.wyrm");

        let store = FileStore::new(&path).await.unwrap();
        store.insert(new_entry("abc", 0x01)).await.unwrap();
        store.save().await.unwrap();

        assert!(!path.with_extension("tmp").exists());
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_invalid_file_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("registry.wyrm");

        fs::write(&path, b"not a registry file").await.unwrap();

        let result = FileStore::new(&path).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_version_mismatch_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("registry.wyrm");

        let mut contents = Vec::new();
        contents.extend_from_slice(STORE_MAGIC);
        contents.push(STORE_VERSION + 1);
        contents.extend_from_slice(&0u64.to_le_bytes());
        fs::write(&path, &contents).await.unwrap();

        let result = FileStore::new(&path).await;
        assert!(matches!(result, Err(WyrmError::VersionMismatch { .. })));
    }

    #[tokio::test]
    async fn test_count_mismatch_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("registry.wyrm");

        let mut contents = Vec::new();
        contents.extend_from_slice(STORE_MAGIC);
        contents.push(STORE_VERSION);
        contents.extend_from_slice(&5u64.to_le_bytes());
        contents.extend_from_slice(b"[]");
        fs::write(&path, &contents).await.unwrap();

        let result = FileStore::new(&path).await;
        assert!(matches!(result, Err(WyrmError::StoreError(_))));
    }

    #[tokio::test]
    async fn test_concurrent_writes_with_auto_save_keep_file_intact() {
        use std::sync::Arc;
        use tokio::task::JoinSet;

        let dir = tempdir().unwrap();
        let path = dir.path().join("registry.wyrm");

        // Threshold 0: every insert triggers a save, so the saves race
        let store = Arc::new(FileStore::with_auto_save(&path, 0).await.unwrap());
        let mut tasks = JoinSet::new();

        for i in 0..16u32 {
            let store = store.clone();
            tasks.spawn(async move { store.insert(new_entry(&format!("name-{i}"), 1)).await });
        }

        while let Some(result) = tasks.join_next().await {
            result.unwrap().unwrap();
        }
        store.flush().await.unwrap();

        let reloaded = FileStore::new(&path).await.unwrap();
        assert_eq!(reloaded.len(), 16);
        assert!(!path.with_extension("tmp").exists());
    }

    #[tokio::test]
    async fn test_failed_auto_save_keeps_insert_committed() {
        let dir = tempdir().unwrap();
        // Parent directory does not exist, so every save fails
        let path = dir.path().join("missing").join("registry.wyrm");

        let store = FileStore::with_auto_save(&path, 0).await.unwrap();

        let committed = store.insert(new_entry("abc", 0x01)).await.unwrap();
        assert_eq!(committed.id, 1);

        // The commit stands and stays visible despite the failed save
        let entry = store
            .get(&Name::parse("abc").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(entry.owner, AccountAddress::from_array([0x01; 20]));

        // The name is really taken, and the store stays dirty for a retry
        let result = store.insert(new_entry("abc", 0x02)).await;
        assert!(matches!(result, Err(WyrmError::AlreadyExists(_))));
        assert!(store.is_dirty());

        // An explicit flush still surfaces the save failure
        assert!(store.flush().await.is_err());
    }

    #[tokio::test]
    async fn test_duplicate_insert_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("registry.wyrm");

        let store = FileStore::new(&path).await.unwrap();
        store.insert(new_entry("abc", 0x01)).await.unwrap();

        let result = store.insert(new_entry("abc", 0x02)).await;
        assert!(matches!(result, Err(WyrmError::AlreadyExists(_))));
    }
}
