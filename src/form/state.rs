//! Sections and the whole-form state tree

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::value::{Record, RecordList, Scalar};

/// Top-level category of the disclosure form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionName {
    FamilyData,
    Income,
    Assets,
    Liabilities,
    Expenses,
}

impl SectionName {
    /// Every section, in form display order
    pub const ALL: [SectionName; 5] = [
        SectionName::FamilyData,
        SectionName::Income,
        SectionName::Assets,
        SectionName::Liabilities,
        SectionName::Expenses,
    ];

    /// Key used in serialized forms
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionName::FamilyData => "familyData",
            SectionName::Income => "income",
            SectionName::Assets => "assets",
            SectionName::Liabilities => "liabilities",
            SectionName::Expenses => "expenses",
        }
    }
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionName::ALL
            .into_iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown section: {}", s))
    }
}

/// Value held under a section field name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    List(RecordList),
    Scalar(Scalar),
}

impl FieldValue {
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            FieldValue::Scalar(s) => Some(s),
            FieldValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&RecordList> {
        match self {
            FieldValue::List(list) => Some(list),
            FieldValue::Scalar(_) => None,
        }
    }
}

impl From<Scalar> for FieldValue {
    fn from(s: Scalar) -> Self {
        FieldValue::Scalar(s)
    }
}

impl From<RecordList> for FieldValue {
    fn from(list: RecordList) -> Self {
        FieldValue::List(list)
    }
}

/// Field name to scalar or record list
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Section {
    fields: BTreeMap<String, FieldValue>,
}

static EMPTY_SECTION: Section = Section {
    fields: BTreeMap::new(),
};

impl Section {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style scalar assignment
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.fields
            .insert(name.into(), FieldValue::Scalar(value.into()));
        self
    }

    /// Builder-style list assignment
    pub fn with_list(mut self, name: impl Into<String>, list: RecordList) -> Self {
        self.fields.insert(name.into(), FieldValue::List(list));
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn scalar(&self, name: &str) -> Option<&Scalar> {
        self.get(name).and_then(FieldValue::as_scalar)
    }

    pub fn list(&self, name: &str) -> Option<&RecordList> {
        self.get(name).and_then(FieldValue::as_list)
    }

    /// Numeric value of a scalar field, 0 when absent, a list, or unparseable
    pub fn amount(&self, name: &str) -> f64 {
        self.scalar(name).map(Scalar::as_amount).unwrap_or(0.0)
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.insert(name.into(), value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// The entire in-progress disclosure for one user
///
/// Every [`SectionName`] is always present. Sections are shared behind
/// `Arc`, so a snapshot is a cheap clone and is never affected by later
/// writes: writers build a new `Section` and swap it in.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    sections: BTreeMap<SectionName, Arc<Section>>,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    /// Empty form with every section present
    pub fn new() -> Self {
        Self {
            sections: SectionName::ALL
                .into_iter()
                .map(|name| (name, Arc::new(Section::new())))
                .collect(),
        }
    }

    pub fn section(&self, name: SectionName) -> &Section {
        self.sections
            .get(&name)
            .map(Arc::as_ref)
            .unwrap_or(&EMPTY_SECTION)
    }

    /// Shared handle to the current version of a section
    pub fn section_arc(&self, name: SectionName) -> Arc<Section> {
        self.sections
            .get(&name)
            .cloned()
            .unwrap_or_else(|| Arc::new(Section::new()))
    }

    /// Swap in a new version of a section
    pub(crate) fn replace_section(&mut self, name: SectionName, section: Section) {
        self.sections.insert(name, Arc::new(section));
    }

    /// Builder-style section assignment
    pub fn with_section(mut self, name: SectionName, section: Section) -> Self {
        self.replace_section(name, section);
        self
    }

    pub fn sections(&self) -> impl Iterator<Item = (SectionName, &Section)> {
        self.sections.iter().map(|(k, v)| (*k, v.as_ref()))
    }

    /// True when no section holds any field
    pub fn is_empty(&self) -> bool {
        self.sections.values().all(|s| s.is_empty())
    }
}

impl Serialize for FormState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.sections.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FormState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let stored = BTreeMap::<SectionName, Section>::deserialize(deserializer)?;
        let mut form = FormState::new();
        for (name, section) in stored {
            form.replace_section(name, section);
        }
        Ok(form)
    }
}

/// Record lookup shared by readers: `form[section][list][index]`
pub fn record_at<'a>(form: &'a FormState, section: SectionName, list: &str, index: usize) -> Option<&'a Record> {
    form.section(section).list(list).and_then(|l| l.get(index))
}
