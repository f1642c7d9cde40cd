//! Persistence sink: where form state lands after every change
//!
//! The engine calls [`PersistenceSink::save`] after each applied mutation and
//! [`PersistenceSink::load`] once when a session opens. Saves are best effort;
//! a failed save is logged by the engine and the in-memory state is kept.

mod memory;
mod json_file;

pub use memory::MemoryStore;
pub use json_file::{JsonFileStore, DEFAULT_STORAGE_DIR};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::form::{FormState, SectionName};

/// What triggered a save
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Change {
    /// First save of a fresh form
    Initial,
    /// Scalar field written
    Field { section: SectionName, field: String },
    /// Record list appended to, trimmed, edited or replaced; the new list
    /// itself travels in the form passed to [`PersistenceSink::save`]
    List {
        section: SectionName,
        list: String,
        len: usize,
    },
    /// Section reset to empty
    SectionCleared { section: SectionName },
    /// Whole form replaced from an import
    Import,
    /// Explicit save with no new change
    Flush,
}

impl Change {
    pub fn section(&self) -> Option<SectionName> {
        match self {
            Change::Field { section, .. }
            | Change::List { section, .. }
            | Change::SectionCleared { section } => Some(*section),
            Change::Initial | Change::Import | Change::Flush => None,
        }
    }
}

/// Metadata stored next to each saved form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveMetadata {
    pub saved_at: DateTime<Utc>,
    /// Count of applied mutations since the form was created
    pub version: u64,
    pub change: Change,
}

impl SaveMetadata {
    pub fn now(version: u64, change: Change) -> Self {
        Self {
            saved_at: Utc::now(),
            version,
            change,
        }
    }
}

/// A saved form together with its metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredForm {
    pub metadata: SaveMetadata,
    pub form: FormState,
}

/// Durable storage for form state, keyed by user
pub trait PersistenceSink {
    /// Store the full current form for a user
    fn save(&mut self, user_key: &str, form: &FormState, metadata: &SaveMetadata) -> Result<()>;

    /// Most recently saved form for a user, if any
    fn load(&self, user_key: &str) -> Result<Option<StoredForm>>;
}
