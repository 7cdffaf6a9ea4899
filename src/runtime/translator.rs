//! Runtime lookups against one catalog directory.
//!
//! Translators are shared per directory: [`Translator::new`] consults a
//! process-wide registry keyed by the resolved directory path, so every
//! component pointing at the same `locales/` folder reads the same loaded
//! catalogs. Lookups never fail; a missing translation resolves to the
//! untranslated key.

use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
    sync::{Arc, LazyLock, Mutex, PoisonError, RwLock},
};

use crate::catalog::{CATALOG_EXTENSION, TranslationMap, read_catalog};
use crate::error::Error;
use crate::locale::{self, BASE_LOCALE, RECOGNIZED_LOCALES, RESERVED_BASE_STEM};
use crate::runtime::context::current_locale;
use crate::runtime::invocation::{Invocation, LocaleSource, invocation_locale};
use crate::runtime::string::TranslatedString;

/// Loaded catalogs of one directory: locale → key → translation.
pub type Translations = HashMap<String, TranslationMap>;

static TRANSLATORS: LazyLock<Mutex<HashMap<PathBuf, Arc<Translator>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

#[derive(Debug)]
pub struct Translator {
    name: String,
    catalog_dir: PathBuf,
    /// Replaced wholesale on reload; readers hold their own `Arc`.
    translations: RwLock<Arc<Translations>>,
}

impl Translator {
    /// Get the translator serving `catalog_dir`, loading it on first use.
    ///
    /// `name` only labels the instance in logs; two calls with different
    /// names but the same directory return the same translator.
    pub fn new(name: impl Into<String>, catalog_dir: impl AsRef<Path>) -> Arc<Self> {
        let catalog_dir = resolve_dir(catalog_dir.as_ref());
        let mut registry = TRANSLATORS.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(existing) = registry.get(&catalog_dir) {
            return Arc::clone(existing);
        }

        let name = name.into();
        tracing::debug!(name = %name, dir = %catalog_dir.display(), "loading catalogs");
        let translator = Arc::new(Self {
            translations: RwLock::new(Arc::new(load_translations(&catalog_dir))),
            name,
            catalog_dir: catalog_dir.clone(),
        });
        registry.insert(catalog_dir, Arc::clone(&translator));
        translator
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn catalog_dir(&self) -> &Path {
        &self.catalog_dir
    }

    /// Loaded locales in sorted order.
    pub fn locales(&self) -> Vec<String> {
        let mut locales: Vec<String> = self.snapshot().keys().cloned().collect();
        locales.sort();
        locales
    }

    fn snapshot(&self) -> Arc<Translations> {
        Arc::clone(
            &self
                .translations
                .read()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }

    /// Translate `key` into `locale`, or return `key` unchanged.
    pub fn resolve(&self, key: &str, locale: &str) -> String {
        self.snapshot()
            .get(locale)
            .and_then(|messages| messages.get(key))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// Every loaded locale's rendering of `key`, plus the base locale.
    pub fn resolve_all(&self, key: &str) -> BTreeMap<String, String> {
        let mut all = BTreeMap::from([(BASE_LOCALE.to_string(), key.to_string())]);
        for (locale, messages) in self.snapshot().iter() {
            let text = messages.get(key).cloned().unwrap_or_else(|| key.to_string());
            all.insert(locale.clone(), text);
        }
        all
    }

    /// Translate `key` into the ambient locale of the current operation.
    pub fn tr(&self, key: &str) -> TranslatedString {
        self.tr_in(key, &current_locale())
    }

    /// Translate `key` into an explicit locale.
    pub fn tr_in(&self, key: &str, locale: &str) -> TranslatedString {
        TranslatedString::new(self.resolve(key, locale), self.resolve_all(key))
    }

    /// Translate `key` for the user or guild behind `invocation`.
    pub fn tr_for<I>(&self, invocation: &I, key: &str, source: LocaleSource) -> TranslatedString
    where
        I: Invocation + ?Sized,
    {
        self.tr_in(key, &invocation_locale(invocation, source))
    }

    /// Re-read the catalog directory and publish the result atomically.
    pub fn reload(&self) {
        let fresh = Arc::new(load_translations(&self.catalog_dir));
        *self
            .translations
            .write()
            .unwrap_or_else(PoisonError::into_inner) = fresh;
    }
}

/// Reload every registered translator.
pub fn reload_all() {
    tracing::info!("reloading locales");
    let translators: Vec<Arc<Translator>> = TRANSLATORS
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .values()
        .cloned()
        .collect();
    for translator in translators {
        translator.reload();
    }
}

/// Registry key for a directory.
///
/// The nearest existing ancestor is canonicalized and the missing
/// components are appended, so the key stays the same once the directory
/// is created.
fn resolve_dir(dir: &Path) -> PathBuf {
    let absolute = std::path::absolute(dir).unwrap_or_else(|_| dir.to_path_buf());
    let mut existing = absolute.as_path();
    let mut missing = Vec::new();
    loop {
        if let Ok(canonical) = fs::canonicalize(existing) {
            return missing
                .iter()
                .rev()
                .fold(canonical, |path, part| path.join(part));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => return absolute,
        }
    }
}

/// Read every `<locale>.po` in `catalog_dir`.
///
/// When the directory exists, every recognized locale gets an entry (empty
/// if it has no file) so per-locale maps cover all locales. Files whose
/// stem is not a recognized locale are skipped with a warning, except the
/// reserved `base` stem.
pub fn load_translations(catalog_dir: &Path) -> Translations {
    if !catalog_dir.is_dir() {
        return Translations::new();
    }

    let mut translations: Translations = RECOGNIZED_LOCALES
        .iter()
        .map(|locale| (locale.to_string(), TranslationMap::new()))
        .collect();

    let entries = match fs::read_dir(catalog_dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(dir = %catalog_dir.display(), error = %e, "cannot read catalog directory");
            return translations;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        let is_catalog_file = path.is_file()
            && path.extension().and_then(|e| e.to_str()) == Some(CATALOG_EXTENSION);

        if is_catalog_file && locale::is_recognized(&stem) {
            match read_catalog(&path, &stem) {
                Ok(catalog) => {
                    translations.insert(stem, catalog.translations());
                }
                Err(e) => tracing::warn!(error = ?e, "skipping catalog"),
            }
        } else if stem != RESERVED_BASE_STEM {
            let error = Error::UnrecognizedCatalogFilename(path);
            tracing::warn!(%error, "skipping file");
        }
    }

    translations
}
