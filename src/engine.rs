//! Form engine: the single owner of a user's form state
//!
//! All writes go through `&mut self`, so each one is derived from the state
//! left by the previous write. Each applied write replaces the touched
//! section with a new version, bumps that section's version counter and
//! hands the full form to the persistence sink.

use chrono::Utc;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::aggregation::{summarize_section, FormSummary, SectionTotals, TotalsCache};
use crate::error::{FormError, Result};
use crate::form::{record_at, FieldValue, FormState, Record, RecordList, Scalar, Section, SectionName};
use crate::persistence::{Change, PersistenceSink, SaveMetadata};
use crate::records;
use crate::session::Session;
use crate::templates::template_for;

/// Engine behaviour switches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Save after every applied write; when off, call [`FormEngine::flush`]
    pub autosave: bool,
    /// Reuse section totals until the section changes
    pub cache_totals: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            autosave: true,
            cache_totals: true,
        }
    }
}

impl EngineConfig {
    /// No caching, explicit saves only (batch tools)
    pub fn read_only() -> Self {
        Self {
            autosave: false,
            cache_totals: false,
        }
    }
}

pub struct FormEngine<S: PersistenceSink> {
    session: Session,
    sink: S,
    config: EngineConfig,
    state: FormState,
    /// Applied writes since the form was created
    version: u64,
    section_versions: BTreeMap<SectionName, u64>,
    /// Unsaved changes exist
    dirty: bool,
    cache: RefCell<TotalsCache>,
}

impl<S: PersistenceSink> FormEngine<S> {
    /// Load the session user's form, or start an empty one
    ///
    /// An expired session is refused before anything is loaded.
    pub fn open(session: Session, sink: S, config: EngineConfig) -> Result<Self> {
        if session.is_expired(Utc::now()) {
            return Err(FormError::SessionExpired(session.user_key().to_string()));
        }
        let stored = sink.load(session.user_key())?;

        let mut engine = Self {
            session,
            sink,
            config,
            state: FormState::new(),
            version: 0,
            section_versions: BTreeMap::new(),
            dirty: false,
            cache: RefCell::new(TotalsCache::new()),
        };

        match stored {
            Some(stored) => {
                info!(
                    "Loaded form v{} for {} (saved {})",
                    stored.metadata.version,
                    engine.session.user_key(),
                    stored.metadata.saved_at
                );
                engine.state = stored.form;
                engine.version = stored.metadata.version;
            }
            None => {
                info!("No saved form for {}, starting empty", engine.session.user_key());
                engine.persist(Change::Initial);
            }
        }

        Ok(engine)
    }

    // ---- Reads ----

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Read-only copy for exporters; later writes do not affect it
    pub fn snapshot(&self) -> FormState {
        self.state.clone()
    }

    pub fn section(&self, section: SectionName) -> &Section {
        self.state.section(section)
    }

    pub fn field(&self, section: SectionName, field: &str) -> Option<&Scalar> {
        self.section(section).scalar(field)
    }

    pub fn list(&self, section: SectionName, list: &str) -> Option<&RecordList> {
        self.section(section).list(list)
    }

    pub fn record(&self, section: SectionName, list: &str, index: usize) -> Option<&Record> {
        record_at(&self.state, section, list, index)
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn section_version(&self, section: SectionName) -> u64 {
        self.section_versions.get(&section).copied().unwrap_or(0)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Cache hit and miss counts
    pub fn cache_stats(&self) -> (u64, u64) {
        let cache = self.cache.borrow();
        (cache.hits, cache.misses)
    }

    // ---- Totals ----

    pub fn totals(&self, section: SectionName) -> SectionTotals {
        if !self.config.cache_totals {
            return summarize_section(&self.state, section);
        }
        let version = self.section_version(section);
        self.cache
            .borrow_mut()
            .get_or_compute(section, version, || summarize_section(&self.state, section))
    }

    pub fn summary(&self) -> FormSummary {
        FormSummary {
            income: self.totals(SectionName::Income),
            assets: self.totals(SectionName::Assets),
            liabilities: self.totals(SectionName::Liabilities),
            expenses: self.totals(SectionName::Expenses),
        }
    }

    // ---- Writes ----

    /// Set a scalar field of a section
    pub fn set_field(&mut self, section: SectionName, field: &str, value: impl Into<Scalar>) -> Result<()> {
        self.ensure_active()?;
        let mut next = self.section(section).clone();
        next.insert(field, FieldValue::Scalar(value.into()));
        self.commit(
            section,
            next,
            Change::Field {
                section,
                field: field.to_string(),
            },
        );
        Ok(())
    }

    /// Replace a whole record list
    pub fn set_list(&mut self, section: SectionName, list: &str, new_list: RecordList) -> Result<RecordList> {
        self.ensure_active()?;
        let mut next = self.section(section).clone();
        next.insert(list, FieldValue::List(new_list.clone()));
        self.commit(
            section,
            next,
            Change::List {
                section,
                list: list.to_string(),
                len: new_list.len(),
            },
        );
        Ok(new_list)
    }

    /// Append a copy of `template`; an absent list starts empty
    pub fn append(&mut self, section: SectionName, list: &str, template: &Record) -> Result<RecordList> {
        let next = records::append(self.list(section, list).map(Vec::as_slice), template);
        debug!("Append to {}.{} -> {} records", section, list, next.len());
        self.set_list(section, list, next)
    }

    /// Append the registry's blank record for this list
    pub fn append_from_registry(&mut self, section: SectionName, list: &str) -> Result<RecordList> {
        let template = template_for(section, list).ok_or_else(|| FormError::UnknownList {
            section,
            list: list.to_string(),
        })?;
        self.append(section, list, &template)
    }

    /// Remove the record at `index`
    ///
    /// An out-of-range index changes nothing: it is logged, nothing is saved
    /// and the current list comes back as-is.
    pub fn remove(&mut self, section: SectionName, list: &str, index: usize) -> Result<RecordList> {
        self.ensure_active()?;
        let current = self.list(section, list).cloned().unwrap_or_default();
        match records::remove(&current, index) {
            Ok(next) => {
                debug!("Remove {}.{}[{}] -> {} records", section, list, index, next.len());
                self.set_list(section, list, next)
            }
            Err(err) => {
                warn!("Ignoring remove: {}", err.at(section, list));
                Ok(current)
            }
        }
    }

    /// Set one field of the record at `index`
    ///
    /// An out-of-range index is returned as an error and nothing changes.
    pub fn update_field(
        &mut self,
        section: SectionName,
        list: &str,
        index: usize,
        field: &str,
        value: impl Into<Scalar>,
    ) -> Result<RecordList> {
        let current = self.list(section, list).map(Vec::as_slice).unwrap_or_default();
        let next = records::update_field(current, index, field, value.into())
            .map_err(|err| err.at(section, list))?;
        self.set_list(section, list, next)
    }

    /// Reset a section to empty; the section itself stays in the form
    pub fn clear_section(&mut self, section: SectionName) -> Result<()> {
        self.ensure_active()?;
        self.commit(section, Section::new(), Change::SectionCleared { section });
        Ok(())
    }

    /// Replace the whole form (import)
    pub fn replace_state(&mut self, form: FormState) -> Result<()> {
        self.ensure_active()?;
        self.state = form;
        for section in SectionName::ALL {
            *self.section_versions.entry(section).or_insert(0) += 1;
        }
        self.version += 1;
        self.touch_session();
        self.persist(Change::Import);
        Ok(())
    }

    /// Save now regardless of autosave; errors are returned, not just logged
    pub fn flush(&mut self) -> Result<()> {
        self.ensure_active()?;
        let meta = SaveMetadata::now(self.version, Change::Flush);
        self.sink.save(self.session.user_key(), &self.state, &meta)?;
        self.dirty = false;
        Ok(())
    }

    /// Continue with a fresh login for the same user
    ///
    /// Unsaved edits made before the old session expired are kept and go out
    /// with the next save.
    pub fn resume(&mut self, session: Session) -> Result<()> {
        if session.user_key() != self.session.user_key() {
            return Err(FormError::Auth(format!(
                "session for {} cannot resume the form of {}",
                session.user_key(),
                self.session.user_key()
            )));
        }
        info!("Resumed session for {}", session.user_key());
        self.session = session;
        Ok(())
    }

    fn ensure_active(&self) -> Result<()> {
        if self.session.is_expired(Utc::now()) {
            warn!("Rejecting write: session for {} has expired", self.session.user_key());
            return Err(FormError::SessionExpired(self.session.user_key().to_string()));
        }
        Ok(())
    }

    fn commit(&mut self, section: SectionName, next: Section, change: Change) {
        self.state.replace_section(section, next);
        *self.section_versions.entry(section).or_insert(0) += 1;
        self.version += 1;
        self.touch_session();
        self.persist(change);
    }

    fn touch_session(&mut self) {
        self.session.touch(Utc::now());
    }

    fn persist(&mut self, change: Change) {
        if !self.config.autosave {
            self.dirty = true;
            return;
        }

        let meta = SaveMetadata::now(self.version, change);
        match self.sink.save(self.session.user_key(), &self.state, &meta) {
            Ok(()) => self.dirty = false,
            Err(e) => {
                warn!("Failed to save form for {}: {}", self.session.user_key(), e);
                self.dirty = true;
            }
        }
    }
}
