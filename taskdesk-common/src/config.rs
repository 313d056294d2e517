//! Configuration loading and root folder resolution
//!
//! Every setting resolves in the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing TOML file is not an error: the service logs a warning and
//! starts with defaults. A TOML file that exists but cannot be parsed is.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV: &str = "TASKDESK_ROOT_FOLDER";

/// Database file name inside the root folder
pub const DATABASE_FILE_NAME: &str = "taskdesk.db";

/// Compiled defaults used when no other source provides a value
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub root_folder: PathBuf,
    pub port: u16,
    pub log_level: String,
    pub enrichment_base_url: String,
}

impl CompiledDefaults {
    /// Defaults for the platform this binary was compiled for
    pub fn for_current_platform() -> Self {
        let root_folder = dirs::data_local_dir()
            .map(|d| d.join("taskdesk"))
            .unwrap_or_else(|| PathBuf::from("./taskdesk_data"));

        Self {
            root_folder,
            port: 5780,
            log_level: "info".to_string(),
            enrichment_base_url: "http://127.0.0.1:8000".to_string(),
        }
    }
}

/// Bootstrap configuration loaded from TOML file
///
/// Cannot change while the service is running.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Root folder holding the database file
    #[serde(default)]
    pub root_folder: Option<PathBuf>,

    /// HTTP listen port
    #[serde(default)]
    pub port: Option<u16>,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub enrichment: EnrichmentConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default log level (trace, debug, info, warn, error); RUST_LOG wins
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Enrichment service section of the TOML file
#[derive(Debug, Clone, Deserialize)]
pub struct EnrichmentConfig {
    /// Base URL of the enrichment service, e.g. `http://127.0.0.1:8000`
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default = "default_classify_path")]
    pub classify_path: String,

    #[serde(default = "default_parse_path")]
    pub parse_path: String,

    /// Per-request timeout; absent means the transport default
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            classify_path: default_classify_path(),
            parse_path: default_parse_path(),
            timeout_ms: None,
        }
    }
}

fn default_log_level() -> String {
    CompiledDefaults::for_current_platform().log_level
}

fn default_classify_path() -> String {
    "/classify".to_string()
}

fn default_parse_path() -> String {
    "/parse".to_string()
}

impl TomlConfig {
    /// Load TOML configuration from `path`
    ///
    /// Returns defaults if the file does not exist. Does not log; the caller
    /// reports the outcome once tracing is up.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Parse TOML configuration from a string
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid TOML: {}", e)))
    }
}

/// Default configuration file path (`<config dir>/taskdesk/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("taskdesk").join("config.toml"))
}

/// Resolves the root folder from CLI argument, environment, TOML and defaults
pub struct RootFolderResolver {
    module_name: String,
    cli_arg: Option<PathBuf>,
    toml_root: Option<PathBuf>,
}

impl RootFolderResolver {
    pub fn new(module_name: &str) -> Self {
        Self {
            module_name: module_name.to_string(),
            cli_arg: None,
            toml_root: None,
        }
    }

    /// Root folder given on the command line
    pub fn with_cli_arg(mut self, path: Option<PathBuf>) -> Self {
        self.cli_arg = path;
        self
    }

    /// Root folder given in the TOML config file
    pub fn with_toml_root(mut self, path: Option<PathBuf>) -> Self {
        self.toml_root = path;
        self
    }

    /// Resolve the root folder
    pub fn resolve(&self) -> PathBuf {
        if let Some(path) = &self.cli_arg {
            info!("[{}] Root folder from command line: {}", self.module_name, path.display());
            return path.clone();
        }

        if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
            if !path.trim().is_empty() {
                info!("[{}] Root folder from {}: {}", self.module_name, ROOT_FOLDER_ENV, path);
                return PathBuf::from(path);
            }
        }

        if let Some(path) = &self.toml_root {
            info!("[{}] Root folder from config file: {}", self.module_name, path.display());
            return path.clone();
        }

        let default = CompiledDefaults::for_current_platform().root_folder;
        info!("[{}] Root folder (default): {}", self.module_name, default.display());
        default
    }
}

/// Creates the root folder and locates the database file inside it
pub struct RootFolderInitializer {
    root_folder: PathBuf,
}

impl RootFolderInitializer {
    pub fn new(root_folder: PathBuf) -> Self {
        Self { root_folder }
    }

    /// Create the root folder if missing (idempotent)
    pub fn ensure_directory_exists(&self) -> Result<()> {
        if !self.root_folder.exists() {
            std::fs::create_dir_all(&self.root_folder)?;
            info!("Created root folder: {}", self.root_folder.display());
        }
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        self.root_folder.join(DATABASE_FILE_NAME)
    }

    pub fn database_exists(&self) -> bool {
        self.database_path().exists()
    }
}

/// Fully resolved enrichment client settings
#[derive(Debug, Clone)]
pub struct EnrichmentSettings {
    pub base_url: String,
    pub classify_path: String,
    pub parse_path: String,
    pub timeout: Option<Duration>,
}

impl EnrichmentSettings {
    /// Merge the command-line/environment URL with the TOML section
    pub fn resolve(cli_url: Option<String>, toml: &EnrichmentConfig) -> Self {
        let base_url = cli_url
            .filter(|url| !url.trim().is_empty())
            .or_else(|| toml.base_url.clone())
            .unwrap_or_else(|| CompiledDefaults::for_current_platform().enrichment_base_url);

        Self {
            base_url,
            classify_path: toml.classify_path.clone(),
            parse_path: toml.parse_path.clone(),
            timeout: toml.timeout_ms.map(Duration::from_millis),
        }
    }
}
