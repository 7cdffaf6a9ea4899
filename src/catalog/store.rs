use std::collections::HashMap;

use super::entry::{CatalogEntry, Occurrence};

/// Translations of one locale, keyed by untranslated text.
pub type TranslationMap = HashMap<String, String>;

/// The set of messages for one locale in one catalog directory.
///
/// A catalog built from a fresh scan has an empty `locale`; it becomes a
/// real locale's catalog once merged against that locale's file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub locale: String,
    entries: HashMap<String, CatalogEntry>,
}

impl Catalog {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            entries: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&CatalogEntry> {
        self.entries.get(key)
    }

    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }

    /// Insert or replace an entry wholesale. Empty keys are dropped.
    pub fn insert(&mut self, entry: CatalogEntry) {
        if entry.key.is_empty() {
            return;
        }
        self.entries.insert(entry.key.clone(), entry);
    }

    /// Record one extracted use of `key`.
    ///
    /// Repeated keys accumulate: occurrences and comments are unioned and the
    /// flags are OR-ed. Returns `false` when the key is empty and nothing was
    /// recorded.
    pub fn add_entry(
        &mut self,
        key: &str,
        comments: &[String],
        occurrence: Occurrence,
        is_format_string: bool,
        is_docstring: bool,
    ) -> bool {
        if key.is_empty() {
            return false;
        }
        let entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| CatalogEntry::new(key));
        entry.add_occurrence(occurrence);
        entry.add_comments(comments.iter().cloned());
        entry.is_format_string |= is_format_string;
        entry.is_docstring |= is_docstring;
        true
    }

    /// Combine a fresh extraction with the catalog previously saved to disk.
    ///
    /// Every key of `fresh` is kept with its new metadata. A non-empty
    /// translation already present in `existing` is carried over, otherwise
    /// the translation is left empty. Keys only present in `existing` are
    /// dropped, so the result mirrors exactly what the sources reference.
    pub fn merge(existing: &Catalog, fresh: Catalog) -> Catalog {
        let mut merged = Catalog::new(existing.locale.clone());
        for (key, mut entry) in fresh.entries {
            entry.translation = existing
                .entries
                .get(&key)
                .filter(|old| old.is_translated())
                .map(|old| old.translation.clone())
                .unwrap_or_default();
            merged.entries.insert(key, entry);
        }
        merged
    }

    /// Entries in file order: by first occurrence, then by key. Entries
    /// without any occurrence go last.
    pub fn sorted_entries(&self) -> Vec<&CatalogEntry> {
        let mut sorted: Vec<_> = self.entries.values().collect();
        sorted.sort_by(|a, b| {
            match (a.first_occurrence(), b.first_occurrence()) {
                (Some(x), Some(y)) => x.cmp(y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            }
            .then_with(|| a.key.cmp(&b.key))
        });
        sorted
    }

    /// Lookup map for the runtime: only translated entries.
    pub fn translations(&self) -> TranslationMap {
        self.entries
            .values()
            .filter(|entry| entry.is_translated())
            .map(|entry| (entry.key.clone(), entry.translation.clone()))
            .collect()
    }
}
