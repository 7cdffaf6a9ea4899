use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the catalog, runtime and extraction layers.
///
/// Only [`Error::InvalidLocale`] and [`Error::CatalogDirectoryUnset`] are
/// ever returned to callers. The catalog variants describe problems that
/// are recovered locally and surface as log events.
#[derive(Debug, Error)]
pub enum Error {
    #[error("locale {0:?} is not a recognized locale tag")]
    InvalidLocale(String),

    #[error("line {line}: {reason}")]
    MalformedCatalogLine { line: usize, reason: &'static str },

    #[error("unexpected file in catalog directory: {}", .0.display())]
    UnrecognizedCatalogFilename(PathBuf),

    #[error("no catalog directory could be established for {}", .0.display())]
    CatalogDirectoryUnset(PathBuf),
}
