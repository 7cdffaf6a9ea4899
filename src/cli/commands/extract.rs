use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow, bail};

use super::super::args::ExtractArgs;
use super::super::exit_status::ExitStatus;
use super::super::report::print_extract;
use crate::config::{ConfigLoadResult, load_config};
use crate::extract::{ExtractOptions, FileFailure, collect_files, extract as run_extraction};
use crate::locale::parse_locale_list;

pub fn extract(args: ExtractArgs) -> Result<ExitStatus> {
    let cwd = env::current_dir().context("Failed to read the working directory")?;
    let ConfigLoadResult { config, path } = load_config(&cwd)?;

    // Config entries are relative to the directory holding the config file.
    let config_dir = path
        .as_deref()
        .and_then(Path::parent)
        .filter(|dir| *dir != cwd.as_path());
    let from_config = |entry: &String| match config_dir {
        Some(dir) => dir.join(entry),
        None => PathBuf::from(entry),
    };

    let inputs: Vec<PathBuf> = if args.paths.is_empty() {
        config.includes.iter().map(from_config).collect()
    } else {
        args.paths.clone()
    };

    let mut excludes: Vec<String> = config
        .excludes
        .iter()
        .map(|entry| {
            if entry.contains('*') || entry.contains('?') {
                entry.clone()
            } else {
                from_config(entry).to_string_lossy().to_string()
            }
        })
        .collect();
    excludes.extend(args.excludes.iter().cloned());

    let locales = match &args.locales {
        Some(list) => parse_locale_list(list).context("Invalid --locales")?,
        None => config.target_locales()?,
    };
    if locales.is_empty() {
        bail!("No target locales given");
    }

    let recursive = args.recursive || config.recursive;
    let files = collect_files(&inputs, &excludes, recursive);
    tracing::debug!(
        files = files.files.len(),
        skipped = files.skipped_count,
        recursive,
        "collected source files"
    );

    let options = ExtractOptions {
        locales,
        catalog_dir: config.catalog_dir.clone(),
        overwrite: args.overwrite,
        rules: config.scan_rules(),
    };
    let files_to_scan: Vec<PathBuf> = files.files.into_iter().collect();
    let mut report = run_extraction(&files_to_scan, &options);
    report
        .failures
        .extend(files.missing.into_iter().map(|path| FileFailure {
            error: anyhow!("No such file or directory"),
            path,
        }));

    print_extract(&report);

    if report.has_failures() {
        Ok(ExitStatus::Failure)
    } else {
        Ok(ExitStatus::Success)
    }
}
