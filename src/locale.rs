//! Recognized locale tags.
//!
//! Catalog files, locale overrides and the process-wide default are all
//! checked against this fixed allow-list. The set matches the locales a
//! chat platform accepts for localized command metadata.

use crate::error::Error;

/// Locale of the untranslated source text.
pub const BASE_LOCALE: &str = "zh-TW";

/// Sentinel accepted wherever a list of target locales is expected.
pub const ALL_LOCALES: &str = "all";

/// Catalog stem reserved for a future source-language baseline file.
pub const RESERVED_BASE_STEM: &str = "base";

pub const RECOGNIZED_LOCALES: &[&str] = &[
    "id", "da", "de", "en-GB", "en-US", "es-ES", "es-419", "fr", "hr", "it", "lt", "hu", "nl",
    "no", "pl", "pt-BR", "ro", "fi", "sv-SE", "vi", "tr", "cs", "el", "bg", "ru", "uk", "hi",
    "th", "zh-CN", "ja", "zh-TW", "ko",
];

pub fn is_recognized(locale: &str) -> bool {
    RECOGNIZED_LOCALES.contains(&locale)
}

/// Validate a locale tag, returning it as an owned string.
pub fn validate(locale: &str) -> Result<String, Error> {
    if is_recognized(locale) {
        Ok(locale.to_string())
    } else {
        Err(Error::InvalidLocale(locale.to_string()))
    }
}

/// Parse a comma separated locale list such as `en-US,ja`.
///
/// The `all` sentinel expands to every recognized locale. Duplicates are
/// dropped while keeping the first occurrence order.
pub fn parse_locale_list(list: &str) -> Result<Vec<String>, Error> {
    let mut locales: Vec<String> = Vec::new();
    for part in list.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        if part == ALL_LOCALES {
            return Ok(all_locales());
        }
        let locale = validate(part)?;
        if !locales.contains(&locale) {
            locales.push(locale);
        }
    }
    Ok(locales)
}

pub fn all_locales() -> Vec<String> {
    RECOGNIZED_LOCALES.iter().map(|s| s.to_string()).collect()
}
