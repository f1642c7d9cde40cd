//! Section template registry: declared fields, record templates and subtotal categories

mod schema;
mod registry;

pub use schema::{FieldKind, FieldSpec, ListSpec, CategorySource, CategorySpec, SectionSpec};
pub use registry::{registry, section_spec, list_spec, template_for, money_fields};
