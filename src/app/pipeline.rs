// LeadSift - app/pipeline.rs
//
// One normalisation run: discover -> load -> normalise -> (mine phones)
// -> dedupe -> filter -> export.
//
// Sequential and synchronous. A missing input folder and per-file
// read/decode failures are non-fatal: they are reported through the event
// callback and contribute nothing. Invalid include patterns and output
// failures abort the run.

use crate::core::dedup;
use crate::core::discovery::{self, DiscoveryConfig};
use crate::core::export;
use crate::core::filter::{self, FilterConfig};
use crate::core::ingest;
use crate::core::model::{Lead, RunSummary};
use crate::core::normalize;
use crate::platform::fs;
use crate::util::error::{DiscoveryError, LeadSiftError, LoadError, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Everything a run needs, fully merged from CLI and config.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Folder containing scraper output files.
    pub input_folder: PathBuf,
    pub out_csv: PathBuf,
    pub out_jsonl: PathBuf,
    pub discovery: DiscoveryConfig,
    pub filter: FilterConfig,
    /// Fill empty phones from numbers in the bio.
    pub mine_contacts: bool,
    /// Per-file size cap in bytes.
    pub max_file_size: u64,
}

/// Non-fatal conditions reported while the run progresses.
#[derive(Debug)]
pub enum PipelineEvent {
    /// Discovery could not read an entry, or truncated the file list.
    DiscoveryWarning(String),
    /// An input file was unreadable or malformed and was skipped.
    FileSkipped { path: PathBuf, error: LoadError },
}

/// Execute a full run, reporting non-fatal events to `on_event`.
pub fn run(
    options: &PipelineOptions,
    on_event: &mut dyn FnMut(PipelineEvent),
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    // Phase 1: discovery. An unusable input folder contributes no files;
    // only a malformed include pattern stops the run.
    let (files, warnings) =
        match discovery::discover_files(&options.input_folder, &options.discovery) {
            Ok(found) => found,
            Err(e @ DiscoveryError::InvalidPattern { .. }) => return Err(e.into()),
            Err(e) => {
                tracing::warn!(error = %e, "No input files read");
                (Vec::new(), vec![e.to_string()])
            }
        };
    summary.files_discovered = files.len();
    for warning in warnings {
        on_event(PipelineEvent::DiscoveryWarning(warning));
    }
    tracing::info!(
        folder = %options.input_folder.display(),
        files = files.len(),
        "Input files discovered"
    );

    // Phase 2: load and normalise, file by file
    let mut leads: Vec<Lead> = Vec::new();
    for path in &files {
        let decoded = match load_file(path, options.max_file_size) {
            Ok(d) => d,
            Err(error) => {
                tracing::warn!(file = %path.display(), error = %error, "Skipping input file");
                summary.files_skipped += 1;
                on_event(PipelineEvent::FileSkipped {
                    path: path.clone(),
                    error,
                });
                continue;
            }
        };

        summary.files_loaded += 1;
        summary.records_read += decoded.records.len();
        summary.records_skipped += decoded.skipped_values;

        let source_file = source_file_name(path);
        tracing::debug!(
            file = %source_file,
            records = decoded.records.len(),
            "File decoded"
        );

        for record in &decoded.records {
            let mut lead = normalize::normalize_record(record, &source_file);
            if options.mine_contacts && normalize::fill_phone_from_bio(&mut lead) {
                summary.phones_mined += 1;
            }
            leads.push(lead);
        }
    }

    // Phase 3: dedupe, then filter
    let (leads, dropped) = dedup::dedupe(leads);
    summary.duplicates_dropped = dropped;

    let (leads, rejected) = filter::apply_filters(leads, &options.filter);
    summary.filtered_out = rejected;

    // Phase 4: export. Both files are always written, even when empty.
    let csv_file = create_output(&options.out_csv)?;
    export::export_csv(&leads, BufWriter::new(csv_file), &options.out_csv)?;

    let jsonl_file = create_output(&options.out_jsonl)?;
    summary.leads_exported =
        export::export_jsonl(&leads, BufWriter::new(jsonl_file), &options.out_jsonl)?;

    tracing::info!(
        files_loaded = summary.files_loaded,
        files_skipped = summary.files_skipped,
        records = summary.records_read,
        phones_mined = summary.phones_mined,
        duplicates = summary.duplicates_dropped,
        filtered_out = summary.filtered_out,
        exported = summary.leads_exported,
        "Run complete"
    );

    Ok(summary)
}

fn load_file(
    path: &Path,
    max_file_size: u64,
) -> std::result::Result<ingest::DecodedFile, LoadError> {
    let content = fs::read_input_file(path, max_file_size)?;
    ingest::decode_records(&content, path)
}

/// Base name recorded on each Lead for provenance.
fn source_file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn create_output(path: &Path) -> Result<File> {
    File::create(path).map_err(|source| LeadSiftError::Io {
        path: path.to_path_buf(),
        operation: "create",
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::constants;
    use std::fs as stdfs;

    fn options_for(dir: &Path) -> PipelineOptions {
        let input = dir.join("in");
        stdfs::create_dir(&input).unwrap();
        PipelineOptions {
            input_folder: input,
            out_csv: dir.join("leads.csv"),
            out_jsonl: dir.join("leads.jsonl"),
            discovery: DiscoveryConfig::default(),
            filter: FilterConfig::default(),
            mine_contacts: false,
            max_file_size: constants::DEFAULT_MAX_FILE_SIZE,
        }
    }

    fn run_collecting(options: &PipelineOptions) -> (Result<RunSummary>, Vec<PipelineEvent>) {
        let mut events = Vec::new();
        let result = run(options, &mut |e| events.push(e));
        (result, events)
    }

    #[test]
    fn test_malformed_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let options = options_for(dir.path());
        stdfs::write(
            options.input_folder.join("good.json"),
            r#"[{"username": "ravi", "platform": "instagram"}]"#,
        )
        .unwrap();
        stdfs::write(options.input_folder.join("bad.json"), "{\"username\": \"x\"\nnot json").unwrap();

        let (result, events) = run_collecting(&options);
        let summary = result.unwrap();
        assert_eq!(summary.files_discovered, 2);
        assert_eq!(summary.files_loaded, 1);
        assert_eq!(summary.files_skipped, 1);
        assert_eq!(summary.leads_exported, 1);

        assert_eq!(events.len(), 1);
        match &events[0] {
            PipelineEvent::FileSkipped { path, .. } => {
                assert!(path.ends_with("bad.json"));
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_mining_counts_only_when_enabled() {
        let dir = tempfile::tempdir().unwrap();
        let mut options = options_for(dir.path());
        stdfs::write(
            options.input_folder.join("ig.json"),
            "{\"username\": \"a\", \"bio\": \"Call 9876543210\"}\n\
             {\"username\": \"b\", \"bio\": \"Call 9876543211\", \"phone\": \"+1 555 0100\"}\n",
        )
        .unwrap();

        let summary = run_collecting(&options).0.unwrap();
        assert_eq!(summary.phones_mined, 0);

        options.mine_contacts = true;
        let summary = run_collecting(&options).0.unwrap();
        assert_eq!(summary.phones_mined, 1);

        let jsonl = stdfs::read_to_string(&options.out_jsonl).unwrap();
        let phones: Vec<String> = jsonl
            .lines()
            .map(|l| serde_json::from_str::<serde_json::Value>(l).unwrap()["phone"].to_string())
            .collect();
        assert_eq!(phones, vec!["\"9876543210\"", "\"+1 555 0100\""]);
    }

    #[test]
    fn test_missing_input_folder_writes_empty_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let mut options = options_for(dir.path());
        options.input_folder = dir.path().join("absent");

        let (result, events) = run_collecting(&options);
        let summary = result.unwrap();
        assert_eq!(summary.files_discovered, 0);
        assert_eq!(summary.leads_exported, 0);

        assert_eq!(events.len(), 1);
        match &events[0] {
            PipelineEvent::DiscoveryWarning(msg) => {
                assert!(msg.contains("does not exist"), "warning: {msg}");
            }
            other => panic!("unexpected event {other:?}"),
        }

        let csv = stdfs::read_to_string(&options.out_csv).unwrap();
        assert_eq!(csv.lines().count(), 1);
        assert!(csv.starts_with("social_media,"));
        assert_eq!(stdfs::read_to_string(&options.out_jsonl).unwrap(), "");
    }

    #[test]
    fn test_input_path_that_is_a_file_writes_empty_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let mut options = options_for(dir.path());
        let file = dir.path().join("single.json");
        stdfs::write(&file, "[]").unwrap();
        options.input_folder = file;

        let (result, events) = run_collecting(&options);
        assert_eq!(result.unwrap().leads_exported, 0);
        assert!(matches!(events[0], PipelineEvent::DiscoveryWarning(_)));
        assert!(options.out_csv.exists() && options.out_jsonl.exists());
    }

    #[test]
    fn test_invalid_include_pattern_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut options = options_for(dir.path());
        options.discovery.include_patterns = vec!["[".to_string()];
        let (result, _) = run_collecting(&options);
        assert!(matches!(
            result,
            Err(LeadSiftError::Discovery(DiscoveryError::InvalidPattern { .. }))
        ));
        assert!(!options.out_csv.exists());
    }

    #[test]
    fn test_unwritable_output_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut options = options_for(dir.path());
        options.out_csv = dir.path().join("no_such_dir").join("leads.csv");
        let (result, _) = run_collecting(&options);
        match result {
            Err(LeadSiftError::Io { operation, .. }) => assert_eq!(operation, "create"),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn test_source_file_name_is_base_name() {
        assert_eq!(source_file_name(Path::new("/data/scrapes/ig.json")), "ig.json");
    }
}
