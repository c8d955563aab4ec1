//! The name service: invariant enforcement over a registry store.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use wyrm_core::error::{Result, WyrmError};
use wyrm_core::traits::{NewEntry, RegistryStore};
use wyrm_core::types::{AccountAddress, Name, Quote, RegisteredName, RegistryEntry};
use wyrm_core::validate::classify;

/// The registration engine.
///
/// Stateless apart from the shared store handle; clones are cheap and all
/// clones operate on the same registry.
#[derive(Clone)]
pub struct NameService {
    store: Arc<dyn RegistryStore>,
}

impl NameService {
    /// Creates a service over the given store.
    pub fn new(store: Arc<dyn RegistryStore>) -> Self {
        Self { store }
    }

    /// Returns the underlying store handle.
    pub fn store(&self) -> &Arc<dyn RegistryStore> {
        &self.store
    }

    /// Registers a name to `caller` for `payment` base units.
    ///
    /// Fails with `InvalidName` for malformed input, `AlreadyExists` if the
    /// name is taken, and `InsufficientPayment` if the payment is below the
    /// tier fee. Excess payment is accepted and not refunded; settlement of
    /// the surplus is the caller's collaborator's concern.
    ///
    /// The duplicate pre-check below only orders `AlreadyExists` ahead of
    /// the fee check; the authoritative uniqueness guarantee is the store's
    /// atomic insert, so a racing registration still gets exactly one owner.
    #[instrument(skip(self), fields(caller = %caller))]
    pub async fn register(
        &self,
        caller: AccountAddress,
        raw_name: &str,
        payment: u128,
    ) -> Result<RegistryEntry> {
        let (name, quote) = classify(raw_name)?;

        if self.store.get(&name).await?.is_some() {
            return Err(WyrmError::AlreadyExists(name.to_string()));
        }

        if payment < quote.required_fee {
            return Err(WyrmError::InsufficientPayment {
                required: quote.required_fee,
                offered: payment,
            });
        }

        let entry = self
            .store
            .insert(NewEntry {
                name,
                owner: caller,
                record: String::new(),
            })
            .await?;

        info!(
            name = %entry.name,
            owner = %entry.owner,
            tier = %quote.tier,
            fee = quote.required_fee,
            "Name registered"
        );
        Ok(entry)
    }

    /// Replaces the record of `raw_name`, owner only. No payment required.
    #[instrument(skip(self, record), fields(caller = %caller))]
    pub async fn set_record(
        &self,
        caller: AccountAddress,
        raw_name: &str,
        record: String,
    ) -> Result<RegistryEntry> {
        let name = Self::lookup_name(raw_name)?;

        let entry = self
            .store
            .get(&name)
            .await?
            .ok_or_else(|| WyrmError::NotFound(name.to_string()))?;

        if entry.owner != caller {
            return Err(WyrmError::NotAuthorized {
                name: name.to_string(),
                caller: caller.to_string(),
            });
        }

        let updated = self.store.update_record(&name, record).await?;
        debug!(name = %updated.name, "Record updated");
        Ok(updated)
    }

    /// Returns the owner of `raw_name`. Read-only.
    pub async fn owner_of(&self, raw_name: &str) -> Result<AccountAddress> {
        Ok(self.entry_of(raw_name).await?.owner)
    }

    /// Returns the current record of `raw_name`. Read-only; the record may
    /// be empty.
    pub async fn record_of(&self, raw_name: &str) -> Result<String> {
        Ok(self.entry_of(raw_name).await?.record)
    }

    /// Returns the full entry for `raw_name`. Read-only.
    pub async fn entry_of(&self, raw_name: &str) -> Result<RegistryEntry> {
        let name = Self::lookup_name(raw_name)?;
        self.store
            .get(&name)
            .await?
            .ok_or_else(|| WyrmError::NotFound(name.to_string()))
    }

    /// Enumerates every registration in registration order, joined with the
    /// current owner and latest record. Read-only.
    pub async fn list_all(&self) -> Result<Vec<RegisteredName>> {
        let entries = self.store.entries().await?;
        Ok(entries.into_iter().map(RegisteredName::from).collect())
    }

    /// Prices a candidate name without touching the store.
    pub fn quote(&self, raw_name: &str) -> Result<Quote> {
        let (_, quote) = classify(raw_name)?;
        Ok(quote)
    }

    /// Normalizes a name for lookup. A string that fails validation can
    /// never have been registered, so lookups surface it as `NotFound`
    /// rather than leaking the validation error.
    fn lookup_name(raw: &str) -> Result<Name> {
        Name::parse(raw).map_err(|_| WyrmError::NotFound(raw.trim().to_string()))
    }
}

impl std::fmt::Debug for NameService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameService").finish_non_exhaustive()
    }
}
