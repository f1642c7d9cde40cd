//! Error types for the form engine

use thiserror::Error;

use crate::form::SectionName;

/// Result type for form operations
pub type Result<T> = std::result::Result<T, FormError>;

/// Form engine error types
#[derive(Error, Debug)]
pub enum FormError {
    /// Record index outside the current list
    #[error("Index {index} out of bounds for {section}.{list} (length {len})")]
    IndexOutOfBounds {
        section: SectionName,
        list: String,
        index: usize,
        len: usize,
    },

    /// No template registered for the requested list
    #[error("No template registered for {section}.{list}")]
    UnknownList { section: SectionName, list: String },

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV read/write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Imported document is not a form at all
    #[error("Invalid import: {0}")]
    InvalidImport(String),

    /// Credential hashing failure
    #[error("Authentication error: {0}")]
    Auth(String),

    /// User key already registered
    #[error("User already registered: {0}")]
    DuplicateUser(String),

    /// Session timed out; log in again
    #[error("Session expired for user: {0}")]
    SessionExpired(String),

    /// Config file failed validation
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Unknown user or wrong password
    #[error("Invalid credentials for user: {0}")]
    InvalidCredentials(String),
}

impl FormError {
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, FormError::IndexOutOfBounds { .. })
    }
}
