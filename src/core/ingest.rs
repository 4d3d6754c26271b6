// LeadSift - core/ingest.rs
//
// Decodes one scraper output file's content into raw records.
// Core layer: accepts the content as a string; the app layer does the
// reading. Either the whole file decodes or none of it is used.

use crate::core::model::RawRecord;
use crate::util::constants;
use crate::util::error::LoadError;
use serde_json::Value;
use std::path::Path;

/// Records decoded from one file.
#[derive(Debug, Default)]
pub struct DecodedFile {
    /// Object records, in file order.
    pub records: Vec<RawRecord>,

    /// Top-level values that were not JSON objects (skipped).
    pub skipped_values: usize,
}

/// Decode `content` as either a JSON array of records or newline-delimited
/// JSON, choosing by whether the trimmed content starts with `[`.
///
/// A UTF-8 byte-order mark is ignored. Empty content yields no records.
/// Any JSON syntax error fails the whole file; for NDJSON the error carries
/// the 1-based line number.
pub fn decode_records(content: &str, file: &Path) -> Result<DecodedFile, LoadError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Ok(DecodedFile::default());
    }

    let values: Vec<Value> = if trimmed.starts_with('[') {
        serde_json::from_str(trimmed).map_err(|source| LoadError::Json {
            file: file.to_path_buf(),
            line: None,
            source,
        })?
    } else {
        let mut values = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let value = serde_json::from_str(line).map_err(|source| LoadError::Json {
                file: file.to_path_buf(),
                line: Some(idx + 1),
                source,
            })?;
            values.push(value);
        }
        values
    };

    let mut decoded = DecodedFile::default();
    for (idx, value) in values.into_iter().enumerate() {
        match value {
            Value::Object(record) => decoded.records.push(record),
            other => {
                let preview: String = other
                    .to_string()
                    .chars()
                    .take(constants::DEBUG_MAX_LINE_PREVIEW)
                    .collect();
                tracing::debug!(
                    file = %file.display(),
                    index = idx,
                    preview = %preview,
                    "Skipping non-object record"
                );
                decoded.skipped_values += 1;
            }
        }
    }

    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn decode(content: &str) -> Result<DecodedFile, LoadError> {
        decode_records(content, &PathBuf::from("test.json"))
    }

    #[test]
    fn test_json_array() {
        let decoded = decode(r#"  [{"username": "a"}, {"username": "b"}]  "#).unwrap();
        assert_eq!(decoded.records.len(), 2);
        assert_eq!(decoded.records[1]["username"], "b");
    }

    #[test]
    fn test_ndjson_with_blank_lines() {
        let decoded = decode("{\"username\": \"a\"}\n\n  {\"username\": \"b\"}\n").unwrap();
        assert_eq!(decoded.records.len(), 2);
    }

    #[test]
    fn test_empty_and_bom() {
        assert!(decode("").unwrap().records.is_empty());
        assert!(decode("  \n ").unwrap().records.is_empty());
        let decoded = decode("\u{feff}[{\"a\": 1}]").unwrap();
        assert_eq!(decoded.records.len(), 1);
    }

    #[test]
    fn test_ndjson_error_reports_line() {
        let err = decode("{\"a\": 1}\n{broken\n{\"b\": 2}").unwrap_err();
        match err {
            LoadError::Json { line, .. } => assert_eq!(line, Some(2)),
            other => panic!("expected Json error, got {other:?}"),
        }
    }

    #[test]
    fn test_array_error_has_no_line() {
        let err = decode("[{\"a\": 1},").unwrap_err();
        assert!(matches!(err, LoadError::Json { line: None, .. }));
    }

    #[test]
    fn test_non_objects_are_counted_not_fatal() {
        let decoded = decode(r#"[{"a": 1}, 42, "text", null, {"b": 2}]"#).unwrap();
        assert_eq!(decoded.records.len(), 2);
        assert_eq!(decoded.skipped_values, 3);
    }
}
