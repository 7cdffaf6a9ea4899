//! Request-time side of the engine.
//!
//! - `context`: ambient per-operation locale and the process default
//! - `translator`: per-directory catalog lookups with a shared registry
//! - `invocation`: deriving a request's locale and scoping handlers to it
//! - `string`: resolved strings carrying every locale's variant

pub mod context;
pub mod invocation;
pub mod string;
pub mod translator;

pub use context::{current_locale, default_locale, set_default_locale, sync_with_locale, with_locale};
pub use invocation::{Invocation, LocaleSource, Localizations, invocation_locale, localized};
pub use string::TranslatedString;
pub use translator::{Translations, Translator, load_translations, reload_all};
