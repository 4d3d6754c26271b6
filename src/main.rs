// LeadSift - main.rs
//
// Command-line entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading and logging initialisation
// 3. Merging CLI flags over config values
// 4. Running the pipeline and reporting the outcome on stdout

use clap::Parser;
use leadsift::app::pipeline::{self, PipelineEvent, PipelineOptions};
use leadsift::core::discovery::DiscoveryConfig;
use leadsift::core::filter::{self, FilterConfig};
use leadsift::platform::config::{self, AppConfig, PlatformPaths};
use leadsift::util;
use std::path::PathBuf;

/// LeadSift - normalise social-media scraper output into lead lists.
///
/// Reads every JSON / NDJSON file in INPUT_FOLDER, normalises each record
/// into a Lead, drops duplicates, applies the filters and writes the
/// survivors to a CSV and a JSONL file.
#[derive(Parser, Debug)]
#[command(name = "leadsift", version, about)]
struct Cli {
    /// Folder containing scraper output files (*.json).
    input_folder: PathBuf,

    /// CSV output path [default: leads.csv].
    #[arg(long = "out-csv")]
    out_csv: Option<PathBuf>,

    /// JSONL output path [default: leads.jsonl].
    #[arg(long = "out-jsonl")]
    out_jsonl: Option<PathBuf>,

    /// Drop records that are neither a handle nor a profile page URL.
    #[arg(long = "profiles-only")]
    profiles_only: bool,

    /// Comma-separated platform allow-list, e.g. "instagram,youtube".
    #[arg(long = "include-platforms")]
    include_platforms: Option<String>,

    /// Comma-separated per-platform follower floors, e.g. "instagram:5000,twitter:2k".
    #[arg(long = "min-followers")]
    min_followers: Option<String>,

    /// Keep verified accounts only.
    #[arg(long = "verified-only")]
    verified_only: bool,

    /// Comma-separated keywords; a lead must mention at least one.
    #[arg(long = "keywords-any")]
    keywords_any: Option<String>,

    /// Fill missing phone numbers from numbers found in the bio.
    #[arg(long = "mine-contacts-from-bio")]
    mine_contacts_from_bio: bool,

    /// Also read files in subdirectories of the input folder.
    #[arg(short = 'r', long = "recursive")]
    recursive: bool,

    /// Path to config.toml (defaults to the platform config directory).
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Config is read before logging so its level can seed the filter.
    let (config_path, explicit) = match cli.config {
        Some(ref path) => (path.clone(), true),
        None => (PlatformPaths::resolve().config_file(), false),
    };
    let (app_config, config_warnings) = config::load_config(&config_path, explicit);

    util::logging::init(cli.debug, app_config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        config = %config_path.display(),
        "LeadSift starting"
    );

    for warning in &config_warnings {
        tracing::warn!(error = %warning, "Config warning");
        eprintln!("⚠️ {warning}. Using defaults for that setting.");
    }

    let options = build_options(&cli, &app_config);

    let result = pipeline::run(&options, &mut |event| match event {
        PipelineEvent::DiscoveryWarning(msg) => println!("⚠️ {msg}"),
        PipelineEvent::FileSkipped { path, error } => {
            println!("⚠️ Skipping {}: {error}", path.display());
        }
    });

    match result {
        Ok(summary) => {
            println!(
                "✅ {} leads → {} and {}",
                summary.leads_exported,
                options.out_csv.display(),
                options.out_jsonl.display()
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Run failed");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Merge CLI flags over config values.
///
/// Toggles are OR-ed, explicit paths win, and a non-empty CLI list replaces
/// the corresponding config list.
fn build_options(cli: &Cli, config: &AppConfig) -> PipelineOptions {
    let out_csv = cli
        .out_csv
        .clone()
        .or_else(|| config.out_csv.clone())
        .unwrap_or_else(|| PathBuf::from(util::constants::DEFAULT_OUT_CSV));
    let out_jsonl = cli
        .out_jsonl
        .clone()
        .or_else(|| config.out_jsonl.clone())
        .unwrap_or_else(|| PathBuf::from(util::constants::DEFAULT_OUT_JSONL));

    let mut filter = FilterConfig {
        profiles_only: cli.profiles_only || config.profiles_only,
        include_platforms: config.include_platforms.iter().cloned().collect(),
        min_followers: config.min_followers.clone(),
        verified_only: cli.verified_only || config.verified_only,
        keywords_any: config.keywords_any.clone(),
    };

    if let Some(raw) = cli.include_platforms.as_deref() {
        let platforms = filter::parse_platform_list(raw);
        if !platforms.is_empty() {
            filter.include_platforms = platforms;
        }
    }
    if let Some(raw) = cli.min_followers.as_deref() {
        let floors = filter::parse_min_followers(raw);
        if !floors.is_empty() {
            filter.min_followers = floors;
        }
    }
    if let Some(raw) = cli.keywords_any.as_deref() {
        let keywords = filter::parse_keyword_list(raw);
        if !keywords.is_empty() {
            filter.keywords_any = keywords;
        }
    }

    PipelineOptions {
        input_folder: cli.input_folder.clone(),
        out_csv,
        out_jsonl,
        discovery: DiscoveryConfig {
            include_patterns: config.include_patterns.clone(),
            recursive: cli.recursive || config.recursive,
            max_files: config.max_files,
        },
        filter,
        mine_contacts: cli.mine_contacts_from_bio || config.mine_from_bio,
        max_file_size: config.max_file_size,
    }
}
