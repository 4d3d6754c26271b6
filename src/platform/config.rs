// LeadSift - platform/config.rs
//
// Config directory resolution and config.toml loading with startup
// validation. Every value is checked against the named limits in
// util::constants; bad values warn and fall back to defaults.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Resolved platform paths for LeadSift configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/leadsift/ or %APPDATA%\LeadSift\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to the current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Default location of `config.toml`.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored so older binaries accept newer files.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[output]` section.
    pub output: OutputSection,
    /// `[filters]` section.
    pub filters: FiltersSection,
    /// `[contacts]` section.
    pub contacts: ContactsSection,
    /// `[discovery]` section.
    pub discovery: DiscoverySection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[output]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// CSV output path.
    pub csv: Option<String>,
    /// JSONL output path.
    pub jsonl: Option<String>,
}

/// `[filters]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct FiltersSection {
    pub profiles_only: Option<bool>,
    pub include_platforms: Option<Vec<String>>,
    /// Platform name to follower floor, e.g. `instagram = 5000`.
    pub min_followers: Option<HashMap<String, i64>>,
    pub verified_only: Option<bool>,
    pub keywords_any: Option<Vec<String>>,
}

/// `[contacts]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ContactsSection {
    /// Fill empty phones from numbers found in the bio.
    pub mine_from_bio: Option<bool>,
}

/// `[discovery]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct DiscoverySection {
    /// Include glob patterns.
    pub include_patterns: Option<Vec<String>>,
    /// Descend into subdirectories.
    pub recursive: Option<bool>,
    /// Maximum input files per run.
    pub max_files: Option<usize>,
    /// Per-file size cap in bytes.
    pub max_file_size_bytes: Option<u64>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// These are file-level defaults; command-line flags are merged on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    // -- Output --
    pub out_csv: Option<PathBuf>,
    pub out_jsonl: Option<PathBuf>,

    // -- Filters --
    pub profiles_only: bool,
    /// Lower-cased platform ids.
    pub include_platforms: Vec<String>,
    /// Lower-cased platform id to floor.
    pub min_followers: HashMap<String, u64>,
    pub verified_only: bool,
    pub keywords_any: Vec<String>,

    // -- Contacts --
    pub mine_from_bio: bool,

    // -- Discovery --
    pub include_patterns: Vec<String>,
    pub recursive: bool,
    pub max_files: usize,
    pub max_file_size: u64,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            out_csv: None,
            out_jsonl: None,
            profiles_only: false,
            include_platforms: Vec::new(),
            min_followers: HashMap::new(),
            verified_only: false,
            keywords_any: Vec::new(),
            mine_from_bio: false,
            include_patterns: constants::DEFAULT_INCLUDE_PATTERNS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            recursive: false,
            max_files: constants::DEFAULT_MAX_FILES,
            max_file_size: constants::DEFAULT_MAX_FILE_SIZE,
            log_level: None,
        }
    }
}

const VALID_LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Load and validate the config file at `config_path`.
///
/// Returns `AppConfig` with validated values and a list of non-fatal
/// problems. A missing file yields defaults with no warnings unless
/// `explicit` is set (the user named the file with `--config`). An
/// unreadable or unparseable file yields defaults plus one warning.
pub fn load_config(config_path: &Path, explicit: bool) -> (AppConfig, Vec<ConfigError>) {
    let mut warnings: Vec<ConfigError> = Vec::new();

    if !explicit && !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(e) => {
            warnings.push(ConfigError::Io {
                path: config_path.to_path_buf(),
                source: e,
            });
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            warnings.push(ConfigError::TomlParse {
                path: config_path.to_path_buf(),
                source: e,
            });
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");
    let config = validate(raw, &mut warnings);

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}

/// Validate each field against named constants, accumulating all problems.
fn validate(raw: RawConfig, warnings: &mut Vec<ConfigError>) -> AppConfig {
    let mut config = AppConfig::default();

    // -- Output paths --
    config.out_csv = non_empty_path("output.csv", raw.output.csv, warnings);
    config.out_jsonl = non_empty_path("output.jsonl", raw.output.jsonl, warnings);

    // -- Filters --
    let filters = raw.filters;
    config.profiles_only = filters.profiles_only.unwrap_or(false);
    config.verified_only = filters.verified_only.unwrap_or(false);
    config.include_platforms = clean_list(filters.include_platforms.unwrap_or_default())
        .into_iter()
        .map(|p| p.to_lowercase())
        .collect();
    config.keywords_any = clean_list(filters.keywords_any.unwrap_or_default());

    if let Some(floors) = filters.min_followers {
        for (platform, floor) in floors {
            let platform = platform.trim().to_lowercase();
            if platform.is_empty() {
                continue;
            }
            match u64::try_from(floor) {
                Ok(floor) => {
                    config.min_followers.insert(platform, floor);
                }
                Err(_) => warnings.push(ConfigError::ValueOutOfRange {
                    field: format!("filters.min_followers.{platform}"),
                    value: floor.to_string(),
                    expected: "a follower count of 0 or more".to_string(),
                }),
            }
        }
    }

    // -- Contacts --
    config.mine_from_bio = raw.contacts.mine_from_bio.unwrap_or(false);

    // -- Discovery --
    if let Some(patterns) = raw.discovery.include_patterns {
        let patterns = clean_list(patterns);
        if patterns.is_empty() {
            warnings.push(ConfigError::ValueOutOfRange {
                field: "discovery.include_patterns".to_string(),
                value: "[]".to_string(),
                expected: format!(
                    "at least one glob pattern. Using default {:?}",
                    constants::DEFAULT_INCLUDE_PATTERNS
                ),
            });
        } else {
            config.include_patterns = patterns;
        }
    }

    config.recursive = raw.discovery.recursive.unwrap_or(false);

    if let Some(files) = raw.discovery.max_files {
        if (constants::MIN_MAX_FILES..=constants::ABSOLUTE_MAX_FILES).contains(&files) {
            config.max_files = files;
        } else {
            warnings.push(ConfigError::ValueOutOfRange {
                field: "discovery.max_files".to_string(),
                value: files.to_string(),
                expected: format!(
                    "{}-{}. Using default ({})",
                    constants::MIN_MAX_FILES,
                    constants::ABSOLUTE_MAX_FILES,
                    constants::DEFAULT_MAX_FILES,
                ),
            });
        }
    }

    if let Some(size) = raw.discovery.max_file_size_bytes {
        if (constants::MIN_MAX_FILE_SIZE..=constants::ABSOLUTE_MAX_FILE_SIZE).contains(&size) {
            config.max_file_size = size;
        } else {
            warnings.push(ConfigError::ValueOutOfRange {
                field: "discovery.max_file_size_bytes".to_string(),
                value: size.to_string(),
                expected: format!(
                    "{}-{}. Using default ({})",
                    constants::MIN_MAX_FILE_SIZE,
                    constants::ABSOLUTE_MAX_FILE_SIZE,
                    constants::DEFAULT_MAX_FILE_SIZE,
                ),
            });
        }
    }

    // -- Logging: level --
    if let Some(level) = raw.logging.level {
        let lowered = level.trim().to_lowercase();
        if VALID_LOG_LEVELS.contains(&lowered.as_str()) {
            config.log_level = Some(lowered);
        } else {
            warnings.push(ConfigError::ValueOutOfRange {
                field: "logging.level".to_string(),
                value: level,
                expected: format!(
                    "one of {}. Using default ({})",
                    VALID_LOG_LEVELS.join(", "),
                    constants::DEFAULT_LOG_LEVEL
                ),
            });
        }
    }

    config
}

fn non_empty_path(
    field: &str,
    value: Option<String>,
    warnings: &mut Vec<ConfigError>,
) -> Option<PathBuf> {
    let value = value?;
    if value.trim().is_empty() {
        warnings.push(ConfigError::ValueOutOfRange {
            field: field.to_string(),
            value,
            expected: "a non-empty file path".to_string(),
        });
        return None;
    }
    Some(PathBuf::from(value.trim()))
}

/// Trim entries and drop empties.
fn clean_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
