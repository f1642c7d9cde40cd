//! Form state tree: sections, scalar fields and repeatable records

mod value;
mod state;

pub use value::{Scalar, Record, RecordList};
pub use state::{SectionName, FieldValue, Section, FormState, record_at};
