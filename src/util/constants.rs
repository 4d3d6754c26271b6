// LeadSift - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.
// Field alias chains live next to the code that walks them (core::normalize,
// core::contact); everything tunable lives here.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LeadSift";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "LeadSift";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Discovery limits
// =============================================================================

/// Default include glob patterns for scraper output discovery.
pub const DEFAULT_INCLUDE_PATTERNS: &[&str] = &["*.json"];

/// Maximum directory recursion depth when `--recursive` is set.
/// Without it only files directly inside the input folder are considered.
pub const RECURSIVE_MAX_DEPTH: usize = 10;

/// Maximum number of input files picked up in a single run.
pub const DEFAULT_MAX_FILES: usize = 5_000;

/// Minimum sensible value for the max-files limit.
pub const MIN_MAX_FILES: usize = 1;

/// Hard upper bound on max files (prevents configuration mistakes).
pub const ABSOLUTE_MAX_FILES: usize = 100_000;

// =============================================================================
// Loading limits
// =============================================================================

/// Input files larger than this are skipped with a warning. The whole
/// dataset is held in memory for one run, so a stray multi-GB dump would
/// otherwise take the process down.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 512 * 1024 * 1024; // 512 MB

/// Smallest configurable per-file size cap.
pub const MIN_MAX_FILE_SIZE: u64 = 1024; // 1 KB

/// Largest configurable per-file size cap.
pub const ABSOLUTE_MAX_FILE_SIZE: u64 = 8 * 1024 * 1024 * 1024; // 8 GB

// =============================================================================
// Output defaults
// =============================================================================

/// Default CSV output path.
pub const DEFAULT_OUT_CSV: &str = "leads.csv";

/// Default JSONL output path.
pub const DEFAULT_OUT_JSONL: &str = "leads.jsonl";

/// Fixed CSV column order. The JSONL schema uses the same field names.
pub const CSV_COLUMNS: &[&str] = &[
    "social_media",
    "platform",
    "handle",
    "display_name",
    "canonical_url",
    "followers_int",
    "bio",
    "verified_bool",
    "business_bool",
    "location",
    "website",
    "email",
    "phone",
    "external_links",
    "linkedin_1",
    "linkedin_2",
    "linkedin_3",
    "source_file",
];

/// Separator used when flattening `external_links` into a single CSV cell.
pub const EXTERNAL_LINKS_SEPARATOR: &str = ";";

/// Separator used when flattening a nested location object.
pub const LOCATION_PART_SEPARATOR: &str = ", ";

// =============================================================================
// Logging
// =============================================================================

/// Default log level. Kept at `warn` so stdout carries only the per-file
/// skip warnings and the final summary line unless the user opts in.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Maximum length of a bio or line included in debug output.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
