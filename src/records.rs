//! Record list operations
//!
//! Every operation takes the current list by reference and returns a new
//! list; the input is never modified. Index-addressed operations check the
//! index first and report an out-of-range position instead of touching any
//! neighbouring record.

use crate::error::FormError;
use crate::form::{Record, RecordList, Scalar, SectionName};

/// Position outside the list it was applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOutOfBounds {
    pub index: usize,
    pub len: usize,
}

impl IndexOutOfBounds {
    /// Attach the section and list the index was aimed at
    pub fn at(self, section: SectionName, list: &str) -> FormError {
        FormError::IndexOutOfBounds {
            section,
            list: list.to_string(),
            index: self.index,
            len: self.len,
        }
    }
}

fn check_index(list: &[Record], index: usize) -> Result<(), IndexOutOfBounds> {
    if index < list.len() {
        Ok(())
    } else {
        Err(IndexOutOfBounds { index, len: list.len() })
    }
}

/// New list with a copy of `template` at the end; an absent list counts as empty
pub fn append(list: Option<&[Record]>, template: &Record) -> RecordList {
    let mut next = list.map(<[Record]>::to_vec).unwrap_or_default();
    next.push(template.clone());
    next
}

/// New list without the record at `index`; later records shift down by one
pub fn remove(list: &[Record], index: usize) -> Result<RecordList, IndexOutOfBounds> {
    check_index(list, index)?;
    let mut next = list.to_vec();
    next.remove(index);
    Ok(next)
}

/// New list where only `list[index][field]` differs
pub fn update_field(
    list: &[Record],
    index: usize,
    field: &str,
    value: Scalar,
) -> Result<RecordList, IndexOutOfBounds> {
    check_index(list, index)?;
    let mut next = list.to_vec();
    next[index].set(field, value);
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accounts() -> RecordList {
        vec![
            Record::new().with("institution", "First Federal").with("currentAmount", "100.50"),
            Record::new().with("institution", "Credit Union").with("currentAmount", ""),
            Record::new().with("institution", "Brokerage Cash").with("currentAmount", "20"),
        ]
    }

    #[test]
    fn test_append_to_absent_list() {
        let template = Record::new().with("description", "").with("currentValue", "");
        let list = append(None, &template);

        assert_eq!(list.len(), 1);
        assert_eq!(list[0], template);
    }

    #[test]
    fn test_append_keeps_existing_order() {
        let before = accounts();
        let template = Record::new().with("institution", "").with("currentAmount", "");
        let after = append(Some(before.as_slice()), &template);

        assert_eq!(after.len(), 4);
        assert_eq!(&after[..3], &before[..]);
        assert_eq!(after[3], template);
    }

    #[test]
    fn test_append_then_remove_restores_list() {
        let before = accounts();
        let template = Record::new().with("institution", "").with("currentAmount", "");
        let appended = append(Some(before.as_slice()), &template);
        let restored = remove(&appended, appended.len() - 1).unwrap();

        assert_eq!(restored, before);
    }

    #[test]
    fn test_remove_shifts_later_records() {
        let list = remove(&accounts(), 0).unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list[0].get("institution"), Some(&Scalar::from("Credit Union")));
        assert_eq!(list[1].get("institution"), Some(&Scalar::from("Brokerage Cash")));
    }

    #[test]
    fn test_remove_out_of_bounds() {
        let list = accounts();
        let err = remove(&list, 5).unwrap_err();

        assert_eq!(err, IndexOutOfBounds { index: 5, len: 3 });
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_update_field_touches_only_target() {
        let before = accounts();
        let after = update_field(&before, 1, "currentAmount", Scalar::from("75")).unwrap();

        assert_eq!(after[1].get("currentAmount"), Some(&Scalar::from("75")));
        assert_eq!(after[0], before[0]);
        assert_eq!(after[2], before[2]);
        // Input list untouched
        assert_eq!(before[1].get("currentAmount"), Some(&Scalar::from("")));
    }

    #[test]
    fn test_update_field_adds_missing_field() {
        let after = update_field(&accounts(), 0, "accountType", Scalar::from("checking")).unwrap();
        assert_eq!(after[0].len(), 3);
    }

    #[test]
    fn test_update_field_idempotent() {
        let once = update_field(&accounts(), 2, "currentAmount", Scalar::from("42")).unwrap();
        let twice = update_field(&once, 2, "currentAmount", Scalar::from("42")).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_update_field_out_of_bounds() {
        let err = update_field(&[], 0, "currentAmount", Scalar::from("1")).unwrap_err();
        assert_eq!(err, IndexOutOfBounds { index: 0, len: 0 });

        let form_err = err.at(SectionName::Assets, "cashAccounts");
        assert!(form_err.is_out_of_bounds());
        assert_eq!(
            form_err.to_string(),
            "Index 0 out of bounds for assets.cashAccounts (length 0)"
        );
    }
}
