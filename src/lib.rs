//! Disclosure Form - state and aggregation engine for financial disclosure intake
//!
//! This library provides:
//! - A form state tree of sections (family data, income, assets, liabilities, expenses)
//! - Bounds-checked add/remove/update of repeatable records (accounts, vehicles, children, loans)
//! - Per-category subtotals and grand totals over entered currency fields
//! - A static template registry describing every section, list and money field
//! - Persistence sinks, session context with hashed credentials, JSON/CSV import-export

pub mod error;
pub mod form;
pub mod records;
pub mod templates;
pub mod aggregation;
pub mod persistence;
pub mod session;
pub mod engine;
pub mod validation;
pub mod io;
pub mod config;

// Re-export commonly used types
pub use error::{FormError, Result};
pub use form::{FormState, Section, SectionName, Record, RecordList, Scalar, FieldValue};
pub use aggregation::{FormSummary, SectionTotals, summarize};
pub use engine::{FormEngine, EngineConfig};
pub use persistence::{PersistenceSink, JsonFileStore, MemoryStore};
pub use session::Session;
pub use config::AppConfig;
