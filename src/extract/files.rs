use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use glob::Pattern;
use walkdir::WalkDir;

/// Extensions the scanner can parse.
pub const SCANNABLE_EXTENSIONS: &[&str] = &["ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs"];

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Files selected for extraction.
#[derive(Debug, Default)]
pub struct FileSet {
    pub files: BTreeSet<PathBuf>,
    /// Inputs that do not exist.
    pub missing: Vec<PathBuf>,
    /// Directory entries that could not be read.
    pub skipped_count: usize,
}

/// Expand `inputs` into the source files to scan.
///
/// Files are taken as given, whatever their extension. Directories yield
/// their scannable files: only direct children unless `recursive`. Paths
/// matching an exclude entry are dropped; an entry with wildcards is a glob
/// matched against the whole path, any other entry is a path prefix.
pub fn collect_files(inputs: &[PathBuf], excludes: &[String], recursive: bool) -> FileSet {
    let mut result = FileSet::default();

    let mut literal_excludes: Vec<PathBuf> = Vec::new();
    let mut glob_excludes: Vec<Pattern> = Vec::new();
    for p in excludes {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_excludes.push(pattern),
                Err(e) => tracing::warn!(pattern = %p, error = %e, "ignoring invalid exclude pattern"),
            }
        } else {
            literal_excludes.push(PathBuf::from(p));
        }
    }

    let is_excluded = |path: &Path| {
        let path_str = path.to_string_lossy();
        literal_excludes.iter().any(|prefix| path.starts_with(prefix))
            || glob_excludes.iter().any(|p| p.matches(&path_str))
    };

    for input in inputs {
        if input.is_file() {
            if !is_excluded(input) {
                result.files.insert(input.clone());
            }
            continue;
        }
        if !input.is_dir() {
            tracing::warn!(path = %input.display(), "input path does not exist");
            result.missing.push(input.clone());
            continue;
        }

        let mut walker = WalkDir::new(input).sort_by_file_name();
        if !recursive {
            walker = walker.max_depth(1);
        }
        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    result.skipped_count += 1;
                    tracing::warn!(error = %e, "cannot access path");
                    continue;
                }
            };
            let path = entry.path();
            if is_excluded(path) {
                continue;
            }
            if entry.file_type().is_file() && is_scannable_file(path) {
                result.files.insert(path.to_path_buf());
            }
        }
    }

    result
}

pub fn is_scannable_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| SCANNABLE_EXTENSIONS.contains(&e))
}
