//! One pretty-printed JSON file per user in a storage directory

use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

use super::{PersistenceSink, SaveMetadata, StoredForm};
use crate::error::Result;
use crate::form::FormState;

/// Default storage directory, relative to the working directory
pub const DEFAULT_STORAGE_DIR: &str = "data/forms";

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding a user's form; the key is reduced to file-name-safe characters
    pub fn path_for(&self, user_key: &str) -> PathBuf {
        let name: String = user_key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        let name = name.trim_start_matches('.');
        let name = if name.is_empty() { "_" } else { name };
        self.dir.join(format!("{}.json", name))
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(DEFAULT_STORAGE_DIR)
    }
}

impl PersistenceSink for JsonFileStore {
    fn save(&mut self, user_key: &str, form: &FormState, metadata: &SaveMetadata) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        let stored = StoredForm {
            metadata: metadata.clone(),
            form: form.clone(),
        };
        let json = serde_json::to_string_pretty(&stored)?;

        // Write-then-rename; the previous save survives a failed write
        let path = self.path_for(user_key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;

        debug!("Saved form v{} to {}", metadata.version, path.display());
        Ok(())
    }

    fn load(&self, user_key: &str) -> Result<Option<StoredForm>> {
        let path = self.path_for(user_key);
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&text)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{Record, Section, SectionName};
    use crate::persistence::Change;

    #[test]
    fn test_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("forms"));

        let form = FormState::new().with_section(
            SectionName::Assets,
            Section::new().with_list(
                "cashAccounts",
                vec![Record::new().with("institution", "First Federal").with("currentAmount", "100.50")],
            ),
        );
        let meta = SaveMetadata::now(1, Change::List {
            section: SectionName::Assets,
            list: "cashAccounts".to_string(),
            len: 1,
        });
        store.save("pat@example.com", &form, &meta).unwrap();

        let loaded = store.load("pat@example.com").unwrap().unwrap();
        assert_eq!(loaded.form, form);
        assert_eq!(loaded.metadata, meta);
        assert!(store.load("nobody").unwrap().is_none());
    }

    #[test]
    fn test_path_for_sanitizes_key() {
        let store = JsonFileStore::new("/tmp/forms");
        assert_eq!(store.path_for("pat@example.com"), Path::new("/tmp/forms/pat_example.com.json"));
        assert_eq!(store.path_for("../../etc/passwd"), Path::new("/tmp/forms/_.._etc_passwd.json"));
        assert_eq!(store.path_for(""), Path::new("/tmp/forms/_.json"));
    }
}
