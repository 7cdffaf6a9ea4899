//! Extraction run: scan files in parallel, route their messages to the
//! catalog directory next to each file, then merge and write one catalog
//! per target locale.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
};

use anyhow::{Context, Result};
use rayon::prelude::*;
use swc_common::SourceMap;

use crate::catalog::{Catalog, Occurrence, catalog_path, read_catalog, write_catalog};
use crate::error::Error;
use crate::extract::parser::parse_source;
use crate::extract::scanner::{ScanIssue, ScanRules, scan_source};

/// Directory name of catalogs, relative to the scanned source file.
pub const DEFAULT_CATALOG_DIR: &str = "locales";

#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Locales to write a catalog for.
    pub locales: Vec<String>,
    /// Catalog directory relative to each source file's directory.
    pub catalog_dir: String,
    /// Discard existing translations instead of merging them.
    pub overwrite: bool,
    pub rules: ScanRules,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            locales: Vec::new(),
            catalog_dir: DEFAULT_CATALOG_DIR.to_string(),
            overwrite: false,
            rules: ScanRules::default(),
        }
    }
}

/// Outcome for one catalog directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogReport {
    pub dir: PathBuf,
    /// Distinct messages extracted for this directory.
    pub entries: usize,
    /// Locales whose catalog was written.
    pub written: Vec<String>,
}

/// A source file that contributed nothing because it could not be
/// processed, or a catalog file that could not be read or written.
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: anyhow::Error,
}

#[derive(Debug, Default)]
pub struct ExtractReport {
    pub files_scanned: usize,
    pub catalogs: Vec<CatalogReport>,
    pub issues: Vec<ScanIssue>,
    pub failures: Vec<FileFailure>,
}

impl ExtractReport {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Where the catalogs for `file` live: `<file's directory>/<catalog_dir>`.
pub fn output_dir(file: &Path, catalog_dir: &str) -> Result<PathBuf, Error> {
    if catalog_dir.trim().is_empty() {
        return Err(Error::CatalogDirectoryUnset(file.to_path_buf()));
    }
    match file.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Ok(Path::new(".").join(catalog_dir)),
        Some(parent) => Ok(parent.join(catalog_dir)),
        None => Err(Error::CatalogDirectoryUnset(file.to_path_buf())),
    }
}

/// Run extraction over `files`.
///
/// Unreadable or unparsable files, files without an output directory and
/// catalogs that cannot be read or written are collected as failures; call
/// sites with an unsupported shape are collected as issues. None of them
/// stops the run.
pub fn extract(files: &[PathBuf], options: &ExtractOptions) -> ExtractReport {
    let mut report = ExtractReport::default();

    let mut catalogs: BTreeMap<PathBuf, Mutex<Catalog>> = BTreeMap::new();
    let mut routed: Vec<(&PathBuf, PathBuf)> = Vec::new();
    for file in files {
        match output_dir(file, &options.catalog_dir) {
            Ok(dir) => {
                catalogs.entry(dir.clone()).or_default();
                routed.push((file, dir));
            }
            Err(e) => report.failures.push(FileFailure {
                path: file.clone(),
                error: e.into(),
            }),
        }
    }

    let outcomes: Vec<_> = routed
        .par_iter()
        .map(|(file, dir)| {
            let outcome = scan_into(file, &catalogs[dir], &options.rules);
            ((*file).clone(), outcome)
        })
        .collect();

    for (path, outcome) in outcomes {
        match outcome {
            Ok(issues) => {
                report.files_scanned += 1;
                report.issues.extend(issues);
            }
            Err(error) => report.failures.push(FileFailure { path, error }),
        }
    }
    report
        .issues
        .sort_by(|a, b| (&a.file_path, a.line).cmp(&(&b.file_path, b.line)));

    for (dir, catalog) in catalogs {
        let fresh = catalog.into_inner().unwrap_or_else(PoisonError::into_inner);
        let written = write_locales(&dir, &fresh, options, &mut report.failures);
        report.catalogs.push(CatalogReport {
            dir,
            entries: fresh.len(),
            written,
        });
    }

    report
}

/// Scan one file and record its messages in `catalog`.
fn scan_into(file: &Path, catalog: &Mutex<Catalog>, rules: &ScanRules) -> Result<Vec<ScanIssue>> {
    let file_str = file.to_string_lossy();
    let code = fs::read_to_string(file)
        .with_context(|| format!("Failed to read file: {}", file.display()))?;
    let source_map = Arc::new(SourceMap::default());
    let parsed = parse_source(code, &file_str, source_map)?;
    let scan = scan_source(&parsed, &file_str, rules);

    tracing::debug!(
        file = %file.display(),
        entries = scan.entries.len(),
        issues = scan.issues.len(),
        "scanned"
    );

    // Occurrences are relative to the directory the catalog serves.
    let reference = file
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| file_str.to_string());

    let mut catalog = catalog.lock().unwrap_or_else(PoisonError::into_inner);
    for entry in &scan.entries {
        catalog.add_entry(
            &entry.literal,
            &entry.comments,
            Occurrence::new(reference.clone(), entry.line),
            entry.is_format,
            entry.is_docstring,
        );
    }

    Ok(scan.issues)
}

/// Merge `fresh` into each target locale's catalog in `dir` and write it.
///
/// A locale whose catalog fails is recorded in `failures` and the remaining
/// locales are still written.
fn write_locales(
    dir: &Path,
    fresh: &Catalog,
    options: &ExtractOptions,
    failures: &mut Vec<FileFailure>,
) -> Vec<String> {
    let mut written = Vec::new();
    for locale in &options.locales {
        let path = catalog_path(dir, locale);
        match write_locale(&path, locale, fresh, options.overwrite) {
            Ok(true) => written.push(locale.clone()),
            Ok(false) => {}
            Err(error) => failures.push(FileFailure { path, error }),
        }
    }
    written
}

fn write_locale(path: &Path, locale: &str, fresh: &Catalog, overwrite: bool) -> Result<bool> {
    let existing = if !overwrite && path.is_file() {
        read_catalog(path, locale)?
    } else {
        Catalog::new(locale.to_string())
    };

    let merged = Catalog::merge(&existing, fresh.clone());
    let written = write_catalog(&merged, path)?;
    if written {
        tracing::debug!(path = %path.display(), entries = merged.len(), "wrote catalog");
    }
    Ok(written)
}
