//! Advisory required-field report
//!
//! Fields marked required in the registry are listed when blank. The report
//! never blocks saving or exporting; callers decide what to do with it.

use serde::Serialize;
use std::fmt;

use crate::form::{FormState, SectionName};
use crate::templates::registry;

/// A required field left blank
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingField {
    pub section: SectionName,
    /// List name and record index when the field belongs to a record
    pub record: Option<(String, usize)>,
    pub field: &'static str,
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.record {
            Some((list, index)) => write!(f, "{}.{}[{}].{}", self.section, list, index, self.field),
            None => write!(f, "{}.{}", self.section, self.field),
        }
    }
}

/// Every blank required field, in registry order
///
/// Records are only checked when present; an empty list is not reported.
pub fn missing_required(form: &FormState) -> Vec<MissingField> {
    let mut missing = Vec::new();

    for spec in registry() {
        let section = form.section(spec.section);

        for field in spec.fields.iter().filter(|f| f.required) {
            if section.scalar(field.name).map_or(true, |v| v.is_blank()) {
                missing.push(MissingField {
                    section: spec.section,
                    record: None,
                    field: field.name,
                });
            }
        }

        for list_spec in spec.lists {
            let Some(list) = section.list(list_spec.name) else {
                continue;
            };
            for (index, record) in list.iter().enumerate() {
                for field in list_spec.fields.iter().filter(|f| f.required) {
                    if record.get(field.name).map_or(true, |v| v.is_blank()) {
                        missing.push(MissingField {
                            section: spec.section,
                            record: Some((list_spec.name.to_string(), index)),
                            field: field.name,
                        });
                    }
                }
            }
        }
    }

    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{Record, Section};

    #[test]
    fn test_empty_form_lists_scalar_requirements() {
        let missing = missing_required(&FormState::new());
        let names: Vec<String> = missing.iter().map(|m| m.to_string()).collect();

        assert_eq!(
            names,
            vec![
                "familyData.clientName",
                "familyData.dateOfBirth",
                "familyData.maritalStatus",
                "income.grossSalary",
                "expenses.rentOrMortgage",
            ]
        );
    }

    #[test]
    fn test_record_fields_checked_per_index() {
        let form = FormState::new().with_section(
            SectionName::Assets,
            Section::new().with_list(
                "cashAccounts",
                vec![
                    Record::new().with("institution", "First Federal"),
                    Record::new().with("institution", "  "),
                ],
            ),
        );

        let record_missing: Vec<_> = missing_required(&form)
            .into_iter()
            .filter(|m| m.record.is_some())
            .collect();

        assert_eq!(record_missing.len(), 1);
        assert_eq!(record_missing[0].to_string(), "assets.cashAccounts[1].institution");
    }

    #[test]
    fn test_filled_fields_not_reported() {
        let form = FormState::new().with_section(
            SectionName::Income,
            Section::new().with("grossSalary", 0.0),
        );
        assert!(missing_required(&form)
            .iter()
            .all(|m| m.to_string() != "income.grossSalary"));
    }
}
