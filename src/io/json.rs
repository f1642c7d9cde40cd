//! JSON import/export of the whole form
//!
//! Export is plain serde. Import is lenient: an unknown section, a nested
//! object where a scalar belongs, or a non-object list entry is dropped with
//! a warning and everything else is kept. Missing sections come back empty.

use log::warn;
use serde_json::{Map, Value};

use crate::error::{FormError, Result};
use crate::form::{FieldValue, FormState, Record, RecordList, Scalar, Section, SectionName};

/// Pretty-printed JSON of the form
pub fn export_json(form: &FormState) -> Result<String> {
    Ok(serde_json::to_string_pretty(form)?)
}

/// Parse an exported form, or a saved-form envelope (`{"metadata":..,"form":..}`)
pub fn import_json(text: &str) -> Result<FormState> {
    let value: Value = serde_json::from_str(text)?;
    form_from_value(value)
}

pub fn form_from_value(value: Value) -> Result<FormState> {
    let Value::Object(mut root) = value else {
        return Err(FormError::InvalidImport("top level must be a JSON object".to_string()));
    };

    if root.contains_key("metadata") {
        if let Some(Value::Object(inner)) = root.remove("form") {
            root = inner;
        }
    }

    let mut form = FormState::new();
    for (key, value) in root {
        let Ok(name) = key.parse::<SectionName>() else {
            warn!("Import: dropping unknown section '{}'", key);
            continue;
        };
        match value {
            Value::Object(fields) => form.replace_section(name, section_from_map(name, fields)),
            Value::Null => {}
            other => warn!("Import: section '{}' is {}, expected an object", key, kind(&other)),
        }
    }
    Ok(form)
}

fn section_from_map(name: SectionName, fields: Map<String, Value>) -> Section {
    let mut section = Section::new();
    for (field, value) in fields {
        match value {
            Value::Array(items) => {
                let list = list_from_items(name, &field, items);
                section.insert(field, FieldValue::List(list));
            }
            other => match scalar_from_value(&other) {
                Some(scalar) => section.insert(field, FieldValue::Scalar(scalar)),
                None => warn!("Import: dropping {}.{} ({})", name, field, kind(&other)),
            },
        }
    }
    section
}

fn list_from_items(name: SectionName, list: &str, items: Vec<Value>) -> RecordList {
    let mut records = RecordList::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let fields = match item {
            Value::Object(fields) => fields,
            other => {
                warn!("Import: dropping {}.{}[{}] ({})", name, list, index, kind(&other));
                continue;
            }
        };
        let mut record = Record::new();
        for (field, value) in fields {
            match scalar_from_value(&value) {
                Some(scalar) => record.set(field, scalar),
                None => warn!("Import: dropping {}.{}[{}].{} ({})", name, list, index, field, kind(&value)),
            }
        }
        records.push(record);
    }
    records
}

fn scalar_from_value(value: &Value) -> Option<Scalar> {
    match value {
        Value::Null => Some(Scalar::Null),
        Value::Bool(b) => Some(Scalar::Bool(*b)),
        Value::Number(n) => n.as_f64().map(Scalar::Number),
        Value::String(s) => Some(Scalar::Text(s.clone())),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
