// LeadSift - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; every variant keeps the path it
// concerns and, where one exists, the underlying cause.
//
// Recovery policy:
//   - LoadError is always recovered per file (the file is skipped).
//   - DiscoveryError is fatal only for an invalid include pattern; an
//     unusable input folder is reported and the run continues with no files.
//   - ExportError and output I/O errors are fatal for the run.
//   - ConfigError is downgraded to a warning by the config loader.
//
// Only the fatal kinds convert into LeadSiftError.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all LeadSift operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum LeadSiftError {
    /// Input file discovery failed.
    Discovery(DiscoveryError),

    /// Export operation failed.
    Export(ExportError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for LeadSiftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Discovery(e) => write!(f, "Discovery error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for LeadSiftError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Discovery(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Discovery errors
// ---------------------------------------------------------------------------

/// Errors related to input file discovery.
#[derive(Debug)]
pub enum DiscoveryError {
    /// The input folder does not exist or is not accessible.
    RootNotFound { path: PathBuf },

    /// The input path is not a directory.
    NotADirectory { path: PathBuf },

    /// An include glob pattern is malformed.
    InvalidPattern {
        pattern: String,
        source: glob::PatternError,
    },

    /// Walkdir traversal error on the root itself.
    Traversal {
        path: PathBuf,
        source: walkdir::Error,
    },
}

impl fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootNotFound { path } => {
                write!(f, "Input folder '{}' does not exist", path.display())
            }
            Self::NotADirectory { path } => {
                write!(f, "Input path '{}' is not a directory", path.display())
            }
            Self::InvalidPattern { pattern, source } => {
                write!(f, "Invalid include pattern '{pattern}': {source}")
            }
            Self::Traversal { path, source } => {
                write!(f, "Error traversing '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for DiscoveryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidPattern { source, .. } => Some(source),
            Self::Traversal { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<DiscoveryError> for LeadSiftError {
    fn from(e: DiscoveryError) -> Self {
        Self::Discovery(e)
    }
}

// ---------------------------------------------------------------------------
// Load errors
// ---------------------------------------------------------------------------

/// Errors related to reading and decoding one scraper output file.
#[derive(Debug)]
pub enum LoadError {
    /// I/O error while reading the file.
    Io { file: PathBuf, source: io::Error },

    /// File content is not valid UTF-8.
    InvalidEncoding {
        file: PathBuf,
        source: std::string::FromUtf8Error,
    },

    /// JSON decoding failed. `line` is set for newline-delimited files.
    Json {
        file: PathBuf,
        line: Option<usize>,
        source: serde_json::Error,
    },

    /// File exceeds the configured size cap.
    TooLarge { file: PathBuf, size: u64, max_size: u64 },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { file, source } => {
                write!(f, "'{}': I/O error: {source}", file.display())
            }
            Self::InvalidEncoding { file, source } => {
                write!(f, "'{}': invalid UTF-8 encoding: {source}", file.display())
            }
            Self::Json {
                file,
                line: Some(line),
                source,
            } => write!(f, "'{}' line {line}: invalid JSON: {source}", file.display()),
            Self::Json {
                file,
                line: None,
                source,
            } => write!(f, "'{}': invalid JSON: {source}", file.display()),
            Self::TooLarge {
                file,
                size,
                max_size,
            } => write!(
                f,
                "'{}' is {size} bytes, exceeds maximum of {max_size} bytes",
                file.display()
            ),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::InvalidEncoding { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::TooLarge { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSONL export error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for LeadSiftError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for LeadSift results.
pub type Result<T> = std::result::Result<T, LeadSiftError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_fatal_errors_keep_their_cause() {
        let err: LeadSiftError = DiscoveryError::InvalidPattern {
            pattern: "[".to_string(),
            source: glob::Pattern::new("[").unwrap_err(),
        }
        .into();
        assert!(err.to_string().starts_with("Discovery error: Invalid include pattern '['"));
        let cause = err.source().unwrap();
        assert!(cause.downcast_ref::<DiscoveryError>().is_some());

        let err: LeadSiftError = ExportError::Io {
            path: PathBuf::from("leads.csv"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        }
        .into();
        assert!(matches!(err, LeadSiftError::Export(ExportError::Io { .. })));
    }

    #[test]
    fn test_io_error_names_operation_and_path() {
        let err = LeadSiftError::Io {
            path: PathBuf::from("out/leads.jsonl"),
            operation: "create",
            source: io::Error::new(io::ErrorKind::NotFound, "missing dir"),
        };
        let msg = err.to_string();
        assert!(msg.contains("create"), "{msg}");
        assert!(msg.contains("out/leads.jsonl"), "{msg}");
    }
}
