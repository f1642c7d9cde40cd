//! Scalar values and repeatable records

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single form value: text, number, date string, checkbox or nothing
///
/// Dates are carried as text (`"2019-06-01"`); the form never interprets them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Scalar {
    /// Empty text, the initial value of every template field
    pub fn blank() -> Self {
        Scalar::Text(String::new())
    }

    /// Null or whitespace-only text
    pub fn is_blank(&self) -> bool {
        match self {
            Scalar::Null => true,
            Scalar::Text(s) => s.trim().is_empty(),
            Scalar::Bool(_) | Scalar::Number(_) => false,
        }
    }

    /// Numeric interpretation used by every total
    ///
    /// Text is parsed as a base-10 float after trimming. Anything that does
    /// not parse, and any non-finite result, counts as 0.
    pub fn as_amount(&self) -> f64 {
        let value = match self {
            Scalar::Number(n) => *n,
            Scalar::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
            Scalar::Null | Scalar::Bool(_) => 0.0,
        };
        if value.is_finite() {
            value
        } else {
            0.0
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => Ok(()),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Number(n)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

/// One repeatable entry inside a list (a bank account, a vehicle, a child)
///
/// A record has no identity of its own; it is addressed by its position in
/// the list that holds it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Scalar>,
}

/// Ordered records; position is the only address
pub type RecordList = Vec<Record>;

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field assignment
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Scalar> {
        self.fields.get(name)
    }

    pub(crate) fn set(&mut self, name: impl Into<String>, value: Scalar) {
        self.fields.insert(name.into(), value);
    }

    /// Numeric value of a field, 0 when absent or unparseable
    pub fn amount(&self, name: &str) -> f64 {
        self.fields.get(name).map(Scalar::as_amount).unwrap_or(0.0)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<Scalar>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
