//! Configuration loading and parsing.
//!
//! Parses `scribe.toml` (or an override path provided by the binary). Every
//! field has a default so a missing file, a missing section or an unparsable
//! file all yield a usable `Config`; unknown fields are ignored so older
//! binaries tolerate newer files.
//!
//! ```toml
//! [document]
//! untitled_title = "Untitled"
//!
//! [files]
//! normalize_line_endings = false
//! reuse_open_tabs = false
//!
//! [log]
//! filter = "info"
//! file = "scribe.log"
//! ```

use anyhow::{Context, Result};
use core_model::RegistryOptions;
use serde::Deserialize;
use std::{fs, io::ErrorKind, path::PathBuf};
use tracing::{debug, warn};

pub const CONFIG_FILE_NAME: &str = "scribe.toml";

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct DocumentConfig {
    #[serde(default = "DocumentConfig::default_untitled_title")]
    pub untitled_title: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            untitled_title: Self::default_untitled_title(),
        }
    }
}

impl DocumentConfig {
    fn default_untitled_title() -> String {
        "Untitled".to_string()
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct FilesConfig {
    /// Convert CRLF / CR to LF on open and restore the original style on save.
    /// Files mixing several styles are always loaded verbatim.
    #[serde(default = "FilesConfig::default_normalize_line_endings")]
    pub normalize_line_endings: bool,
    /// Opening a path that is already open activates the existing tab.
    #[serde(default)]
    pub reuse_open_tabs: bool,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            normalize_line_endings: Self::default_normalize_line_endings(),
            reuse_open_tabs: false,
        }
    }
}

impl FilesConfig {
    const fn default_normalize_line_endings() -> bool {
        false
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "LogConfig::default_filter")]
    pub filter: String,
    #[serde(default = "LogConfig::default_file")]
    pub file: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: Self::default_filter(),
            file: Self::default_file(),
        }
    }
}

impl LogConfig {
    fn default_filter() -> String {
        "info".to_string()
    }
    fn default_file() -> PathBuf {
        PathBuf::from("scribe.log")
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub document: DocumentConfig,
    #[serde(default)]
    pub files: FilesConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>,     // original file string (optional)
    pub source: Option<PathBuf>, // path the raw text came from
    pub file: ConfigFile,        // parsed (or default) data
}

impl Config {
    /// Parse TOML text. Unlike `load_from`, errors are returned to the caller.
    pub fn parse(content: &str) -> Result<Self> {
        let file = toml::from_str::<ConfigFile>(content).context("invalid scribe configuration")?;
        Ok(Self {
            raw: Some(content.to_string()),
            source: None,
            file,
        })
    }

    pub fn registry_options(&self) -> RegistryOptions {
        RegistryOptions {
            untitled_title: self.file.document.untitled_title.clone(),
            reuse_open_tabs: self.file.files.reuse_open_tabs,
            normalize_line_endings: self.file.files.normalize_line_endings,
        }
    }
}

/// Config path following platform conventions: working directory first, then
/// the user config dir (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("scribe").join(CONFIG_FILE_NAME);
    }
    local
}

/// Load configuration from `path` (or the discovered location). Missing or
/// unparsable files fall back to defaults; other read failures are errors.
pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(target: "config", path = %path.display(), "config_missing_using_defaults");
            return Ok(Config::default());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("reading config {}", path.display()));
        }
    };
    match Config::parse(&content) {
        Ok(mut cfg) => {
            debug!(target: "config", path = %path.display(), "config_loaded");
            cfg.source = Some(path);
            Ok(cfg)
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %format!("{e:#}"), "config_parse_failed_using_defaults");
            Ok(Config::default())
        }
    }
}
