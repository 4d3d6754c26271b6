// LeadSift - core/discovery.rs
//
// Input file discovery: scraper output files inside the input folder.
//
// Architecture note: this module uses `walkdir` for directory traversal as an
// OS abstraction (similar to using std::path::Path). It reads only directory
// entries, never file contents; reading is owned by the app layer.
//
// Per-entry I/O errors are non-fatal and collected as warnings. Only an
// invalid root or an invalid include pattern fails discovery.

use crate::util::constants;
use crate::util::error::DiscoveryError;
use std::path::{Path, PathBuf};

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for a discovery operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryConfig {
    /// Filename glob patterns; a file is picked up if it matches any.
    pub include_patterns: Vec<String>,

    /// Descend into subdirectories (up to `RECURSIVE_MAX_DEPTH`).
    /// Off by default: only files directly inside the folder are read.
    pub recursive: bool,

    /// Maximum number of files returned. Extra files are dropped (in path
    /// order) with a warning.
    pub max_files: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            include_patterns: constants::DEFAULT_INCLUDE_PATTERNS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            recursive: false,
            max_files: constants::DEFAULT_MAX_FILES,
        }
    }
}

// =============================================================================
// Discovery
// =============================================================================

/// Discover input files under `root`, sorted by path.
///
/// Returns the accepted files and any non-fatal warnings (unreadable
/// entries, truncation to `max_files`).
///
/// # Errors
/// `RootNotFound` / `NotADirectory` for a bad root, `InvalidPattern` for a
/// malformed include glob.
pub fn discover_files(
    root: &Path,
    config: &DiscoveryConfig,
) -> Result<(Vec<PathBuf>, Vec<String>), DiscoveryError> {
    // fs::metadata rather than Path::is_dir so a non-directory root is
    // reported as such instead of as missing.
    match std::fs::metadata(root) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            return Err(DiscoveryError::NotADirectory {
                path: root.to_path_buf(),
            })
        }
        Err(_) => {
            return Err(DiscoveryError::RootNotFound {
                path: root.to_path_buf(),
            })
        }
    }

    let include_pats = compile_patterns(&config.include_patterns)?;
    let max_depth = if config.recursive {
        constants::RECURSIVE_MAX_DEPTH
    } else {
        1
    };
    let max_files = config
        .max_files
        .clamp(constants::MIN_MAX_FILES, constants::ABSOLUTE_MAX_FILES);

    tracing::debug!(
        root = %root.display(),
        max_depth,
        max_files,
        include = ?config.include_patterns,
        "Discovery starting"
    );

    let mut files: Vec<PathBuf> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    let walker = walkdir::WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(true)
        .sort_by_file_name();

    for entry_result in walker {
        let entry = match entry_result {
            Ok(e) => e,
            Err(e) if e.depth() == 0 => {
                return Err(DiscoveryError::Traversal {
                    path: root.to_path_buf(),
                    source: e,
                });
            }
            Err(e) => {
                let path_str = e
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "<unknown>".to_string());
                let msg = format!("Cannot access '{path_str}': {e}");
                tracing::debug!(warning = %msg, "Discovery warning");
                warnings.push(msg);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let file_name = match path.file_name().and_then(|n| n.to_str()) {
            Some(n) => n,
            None => {
                warnings.push(format!("Skipping '{}': non-UTF-8 filename", path.display()));
                continue;
            }
        };

        if !is_included(file_name, &include_pats) {
            tracing::trace!(file = file_name, "Not matched by include patterns");
            continue;
        }

        files.push(path.to_path_buf());
    }

    files.sort();
    let total_found = files.len();
    if total_found > max_files {
        files.truncate(max_files);
        warnings.push(format!(
            "{total_found} input files were found but the limit is {max_files}. \
             Only the first {max_files} (by path) will be read. \
             Raise [discovery] max_files in config.toml if you need more."
        ));
        tracing::info!(total_found, limit = max_files, "File list truncated");
    }

    tracing::debug!(
        total_found,
        files = files.len(),
        warnings = warnings.len(),
        "Discovery complete"
    );

    Ok((files, warnings))
}

// =============================================================================
// Glob helpers
// =============================================================================

/// Compile include pattern strings into `glob::Pattern` objects.
fn compile_patterns(patterns: &[String]) -> Result<Vec<glob::Pattern>, DiscoveryError> {
    patterns
        .iter()
        .map(|p| {
            glob::Pattern::new(p).map_err(|source| DiscoveryError::InvalidPattern {
                pattern: p.clone(),
                source,
            })
        })
        .collect()
}

/// Wildcards never match a leading `.`, so hidden files need a literal dot.
const MATCH_OPTIONS: glob::MatchOptions = glob::MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: true,
};

/// Returns true if `file_name` matches at least one include pattern.
/// An empty include list means "include all" (returns true).
fn is_included(file_name: &str, include_pats: &[glob::Pattern]) -> bool {
    if include_pats.is_empty() {
        return true;
    }
    include_pats
        .iter()
        .any(|p| p.matches_with(file_name, MATCH_OPTIONS))
}

// =============================================================================
// Tests
// =============================================================================
