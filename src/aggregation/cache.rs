//! Version-keyed cache of section totals
//!
//! Every write to a section bumps that section's version. An entry is only
//! served when its recorded version equals the section's current version, so
//! a stale total is never observable; a mismatch is just a miss.

use std::collections::HashMap;

use super::summary::SectionTotals;
use crate::form::SectionName;

#[derive(Debug, Clone)]
struct CachedTotals {
    version: u64,
    totals: SectionTotals,
}

/// Cache manager for per-section totals
#[derive(Debug, Default)]
pub struct TotalsCache {
    entries: HashMap<SectionName, CachedTotals>,

    /// Statistics
    pub hits: u64,
    pub misses: u64,
}

impl TotalsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Totals computed at exactly `version`, if cached
    pub fn get(&mut self, section: SectionName, version: u64) -> Option<SectionTotals> {
        match self.entries.get(&section) {
            Some(entry) if entry.version == version => {
                self.hits += 1;
                Some(entry.totals.clone())
            }
            _ => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn insert(&mut self, version: u64, totals: SectionTotals) {
        self.entries
            .insert(totals.section, CachedTotals { version, totals });
    }

    /// Cached value, or compute and remember it
    pub fn get_or_compute(
        &mut self,
        section: SectionName,
        version: u64,
        compute: impl FnOnce() -> SectionTotals,
    ) -> SectionTotals {
        if let Some(totals) = self.get(section, version) {
            return totals;
        }
        let totals = compute();
        self.insert(version, totals.clone());
        totals
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
