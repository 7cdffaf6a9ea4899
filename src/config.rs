use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::extract::{DEFAULT_CATALOG_DIR, ScanRules};
use crate::locale;

pub const CONFIG_FILE_NAME: &str = ".lingorc.json";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Files or directories scanned when no path is given on the command line.
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    #[serde(default = "default_excludes")]
    pub excludes: Vec<String>,
    #[serde(default = "default_recursive")]
    pub recursive: bool,
    /// Target locales; `"all"` stands for every recognized locale.
    #[serde(default = "default_locales")]
    pub locales: Vec<String>,
    #[serde(default = "default_catalog_dir")]
    pub catalog_dir: String,
    #[serde(default = "default_entry_points")]
    pub entry_points: Vec<String>,
    #[serde(default = "default_markers")]
    pub markers: Vec<String>,
    #[serde(default = "default_marker_fields")]
    pub marker_fields: Vec<String>,
}

fn default_includes() -> Vec<String> {
    vec![".".to_string()]
}

fn default_excludes() -> Vec<String> {
    vec!["**/node_modules/**".to_string()]
}

fn default_recursive() -> bool {
    false
}

fn default_locales() -> Vec<String> {
    vec![locale::ALL_LOCALES.to_string()]
}

fn default_catalog_dir() -> String {
    DEFAULT_CATALOG_DIR.to_string()
}

fn default_entry_points() -> Vec<String> {
    ScanRules::default().entry_points
}

fn default_markers() -> Vec<String> {
    ScanRules::default().markers
}

fn default_marker_fields() -> Vec<String> {
    ScanRules::default().marker_fields
}

impl Default for Config {
    fn default() -> Self {
        Self {
            includes: default_includes(),
            excludes: default_excludes(),
            recursive: default_recursive(),
            locales: default_locales(),
            catalog_dir: default_catalog_dir(),
            entry_points: default_entry_points(),
            markers: default_markers(),
            marker_fields: default_marker_fields(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Rejects invalid exclude globs, unrecognized locales, an empty catalog
    /// directory and an empty entry-point list.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.excludes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'excludes': \"{}\"", pattern)
                })?;
            }
        }

        self.target_locales().context("Invalid entry in 'locales'")?;

        if self.catalog_dir.trim().is_empty() {
            bail!("'catalogDir' must not be empty");
        }
        if self.entry_points.is_empty() {
            bail!("'entryPoints' must name at least one function");
        }

        Ok(())
    }

    /// The configured locales with `"all"` expanded, deduplicated.
    pub fn target_locales(&self) -> Result<Vec<String>, crate::Error> {
        locale::parse_locale_list(&self.locales.join(","))
    }

    pub fn scan_rules(&self) -> ScanRules {
        ScanRules {
            entry_points: self.entry_points.clone(),
            markers: self.markers.clone(),
            marker_fields: self.marker_fields.clone(),
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Where the configuration was read from, `None` when using defaults.
    pub path: Option<PathBuf>,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            config
                .validate()
                .with_context(|| format!("Invalid config file: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
