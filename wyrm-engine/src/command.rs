//! Typed command dispatch.
//!
//! External collaborators drive the engine through a closed set of typed
//! commands instead of looking methods up by name, so an unknown or
//! misspelled operation is unrepresentable.

use serde::{Deserialize, Serialize};

use wyrm_core::error::Result;
use wyrm_core::types::{AccountAddress, RegisteredName, RegistryEntry};

use crate::NameService;

/// A single engine operation, ready to dispatch.
///
/// Externally tagged on the wire: `{"register": {...}}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// Register `name` to `caller`, attaching `payment` base units.
    Register {
        /// The caller becoming the owner on success.
        caller: AccountAddress,
        /// Candidate name, raw (normalized during validation).
        name: String,
        /// Attached payment in base units.
        payment: u128,
    },
    /// Replace the record of `name`; `caller` must be the owner.
    SetRecord {
        /// The caller claiming ownership.
        caller: AccountAddress,
        /// The target name.
        name: String,
        /// The new record value.
        record: String,
    },
    /// Look up the owner of `name`.
    GetOwner {
        /// The name to resolve.
        name: String,
    },
    /// Look up the current record of `name`.
    GetRecord {
        /// The name to resolve.
        name: String,
    },
    /// Enumerate every registration in registration order.
    ListAll,
}

/// The successful result of a dispatched [`Command`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandOutput {
    /// A registration committed.
    Registered(RegistryEntry),
    /// A record was replaced.
    RecordSet(RegistryEntry),
    /// The resolved owner.
    Owner(AccountAddress),
    /// The resolved record.
    Record(String),
    /// The full enumeration.
    Names(Vec<RegisteredName>),
}

impl NameService {
    /// Dispatches a typed command to the matching operation.
    ///
    /// Errors pass through unchanged from the underlying operation.
    pub async fn dispatch(&self, command: Command) -> Result<CommandOutput> {
        match command {
            Command::Register {
                caller,
                name,
                payment,
            } => self
                .register(caller, &name, payment)
                .await
                .map(CommandOutput::Registered),
            Command::SetRecord {
                caller,
                name,
                record,
            } => self
                .set_record(caller, &name, record)
                .await
                .map(CommandOutput::RecordSet),
            Command::GetOwner { name } => self.owner_of(&name).await.map(CommandOutput::Owner),
            Command::GetRecord { name } => self.record_of(&name).await.map(CommandOutput::Record),
            Command::ListAll => self.list_all().await.map(CommandOutput::Names),
        }
    }
}
