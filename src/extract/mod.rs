//! Offline side of the engine: turning source files into catalogs.
//!
//! - `files`: which files to scan
//! - `parser`: swc parsing with comments kept
//! - `comments`: per-line comment index and documentation blocks
//! - `text`: literal normalization and format detection
//! - `scanner`: the AST visitor finding messages
//! - `pipeline`: routing, merging and writing per output directory

pub mod comments;
pub mod files;
pub mod parser;
pub mod pipeline;
pub mod scanner;
pub mod text;

pub use files::{FileSet, collect_files};
pub use pipeline::{
    CatalogReport, DEFAULT_CATALOG_DIR, ExtractOptions, ExtractReport, FileFailure, extract,
    output_dir,
};
pub use scanner::{FileScan, ScanIssue, ScanRules, ScannedEntry, scan_source};
