//! Field and list schema types

use serde::Serialize;

use crate::form::{Record, Scalar, SectionName};

/// Input kind of a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    Text,
    Date,
    /// Currency amount; the only kind that feeds totals
    Money,
    Percentage,
    Select,
}

/// One declared field of a section or record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Marked required on the form; checks are advisory only
    pub required: bool,
}

impl FieldSpec {
    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind, required: false }
    }
}

/// Shape of one repeatable record list inside a section
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ListSpec {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl ListSpec {
    /// Blank record with every declared field present
    pub fn template(&self) -> Record {
        self.fields
            .iter()
            .map(|f| (f.name, Scalar::blank()))
            .collect()
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        let fields: &'static [FieldSpec] = self.fields;
        fields.iter().find(|f| f.name == name)
    }

    /// Names of money-kind fields, in declaration order
    pub fn money_fields(&self) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|f| f.kind == FieldKind::Money)
            .map(|f| f.name)
            .collect()
    }
}

/// Where a category subtotal takes its amounts from
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CategorySource {
    /// Scalar fields of the section itself
    Fields(&'static [&'static str]),
    /// Named fields of every record in a list, summed per record then across records
    List {
        list: &'static str,
        fields: &'static [&'static str],
    },
}

/// One subtotal line of a section summary
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CategorySpec {
    pub name: &'static str,
    pub label: &'static str,
    pub source: CategorySource,
}

/// Static layout of one form section
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SectionSpec {
    pub section: SectionName,
    pub fields: &'static [FieldSpec],
    pub lists: &'static [ListSpec],
    /// Subtotals that add up to the section total
    pub categories: &'static [CategorySpec],
    /// Subtotals subtracted from the section total (payroll deductions)
    pub deductions: &'static [CategorySpec],
}

impl SectionSpec {
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        let fields: &'static [FieldSpec] = self.fields;
        fields.iter().find(|f| f.name == name)
    }

    pub fn list(&self, name: &str) -> Option<&'static ListSpec> {
        let lists: &'static [ListSpec] = self.lists;
        lists.iter().find(|l| l.name == name)
    }
}
