//! Lingo - PO catalog engine for localized command handlers
//!
//! Lingo keeps per-directory translation catalogs in a GNU gettext PO
//! subset, resolves messages to the locale of the request being handled,
//! and regenerates its catalogs by scanning TypeScript/JavaScript sources
//! for translatable literals.
//!
//! The extractor serves handlers written in TypeScript/JavaScript that call
//! `_("...")`; catalogs for Rust callers of [`runtime::Translator`] are
//! maintained by hand, since `lingo extract` does not scan Rust sources.
//!
//! ## Module Structure
//!
//! - `catalog`: Catalog entries, merge, and the PO codec
//! - `runtime`: Translators, ambient locale, and invocation glue
//! - `extract`: Source scanning and the extraction pipeline
//! - `locale`: Recognized locale tags
//! - `config`: Configuration file loading and parsing
//! - `cli`: Command-line interface layer
//! - `error`: Library error type

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod locale;
pub mod runtime;

pub use error::Error;
