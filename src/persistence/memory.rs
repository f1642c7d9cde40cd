//! In-process store, used by tests and one-shot tools

use std::collections::HashMap;

use super::{PersistenceSink, SaveMetadata, StoredForm};
use crate::error::Result;
use crate::form::FormState;

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    forms: HashMap<String, StoredForm>,

    /// Number of saves received
    pub saves: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one user's form
    pub fn with_form(user_key: &str, stored: StoredForm) -> Self {
        let mut store = Self::new();
        store.forms.insert(user_key.to_string(), stored);
        store
    }

    pub fn get(&self, user_key: &str) -> Option<&StoredForm> {
        self.forms.get(user_key)
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

impl PersistenceSink for MemoryStore {
    fn save(&mut self, user_key: &str, form: &FormState, metadata: &SaveMetadata) -> Result<()> {
        self.saves += 1;
        self.forms.insert(
            user_key.to_string(),
            StoredForm {
                metadata: metadata.clone(),
                form: form.clone(),
            },
        );
        Ok(())
    }

    fn load(&self, user_key: &str) -> Result<Option<StoredForm>> {
        Ok(self.forms.get(user_key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{Section, SectionName};
    use crate::persistence::Change;

    #[test]
    fn test_save_and_load() {
        let mut store = MemoryStore::new();
        let form = FormState::new().with_section(SectionName::Income, Section::new().with("grossSalary", "4100"));
        let meta = SaveMetadata::now(3, Change::Field {
            section: SectionName::Income,
            field: "grossSalary".to_string(),
        });

        store.save("pat", &form, &meta).unwrap();

        let loaded = store.load("pat").unwrap().unwrap();
        assert_eq!(loaded.form, form);
        assert_eq!(loaded.metadata.version, 3);
        assert_eq!(loaded.metadata.change.section(), Some(SectionName::Income));
        assert!(store.load("sam").unwrap().is_none());
        assert_eq!(store.saves, 1);
    }
}
