//! Translation catalogs: in-memory store, merge, and the PO text codec.
//!
//! - `entry`: a single message with its source occurrences and flags
//! - `store`: one locale's catalog, entry accumulation and merge
//! - `codec`: parse and write the on-disk catalog format

pub mod codec;
pub mod entry;
pub mod store;

pub use codec::{parse, read_catalog, render, write_catalog};
pub use entry::{CatalogEntry, Occurrence};
pub use store::{Catalog, TranslationMap};

use std::path::{Path, PathBuf};

/// Extension of catalog files.
pub const CATALOG_EXTENSION: &str = "po";

/// Path of the catalog for `locale` inside `catalog_dir`.
pub fn catalog_path(catalog_dir: &Path, locale: &str) -> PathBuf {
    catalog_dir.join(format!("{}.{}", locale, CATALOG_EXTENSION))
}
