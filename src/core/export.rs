// LeadSift - core/export.rs
//
// CSV and JSONL export of filtered leads.
// Core layer: writes to any Write trait object; the app layer opens files.

use crate::core::model::Lead;
use crate::util::constants;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Export leads to CSV with the fixed column order in
/// `constants::CSV_COLUMNS`. `external_links` is `;`-joined; booleans are
/// written as `true`/`false`. A header row is always written.
pub fn export_csv<W: Write>(
    leads: &[Lead],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let csv_err = |source: csv::Error| ExportError::Csv {
        path: export_path.to_path_buf(),
        source,
    };

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(constants::CSV_COLUMNS)
        .map_err(csv_err)?;

    let mut count = 0;
    for lead in leads {
        let followers = lead.followers_int.to_string();
        let links = lead
            .external_links
            .join(constants::EXTERNAL_LINKS_SEPARATOR);

        csv_writer
            .write_record([
                lead.social_media.as_str(),
                lead.platform.as_str(),
                lead.handle.as_str(),
                lead.display_name.as_str(),
                lead.canonical_url.as_str(),
                followers.as_str(),
                lead.bio.as_str(),
                bool_cell(lead.verified_bool),
                bool_cell(lead.business_bool),
                lead.location.as_str(),
                lead.website.as_str(),
                lead.email.as_str(),
                lead.phone.as_str(),
                links.as_str(),
                lead.linkedin_1.as_str(),
                lead.linkedin_2.as_str(),
                lead.linkedin_3.as_str(),
                lead.source_file.as_str(),
            ])
            .map_err(csv_err)?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

fn bool_cell(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Export leads as JSON Lines: one object per Lead per line, with
/// `external_links` kept as an array. No leads means an empty file.
pub fn export_jsonl<W: Write>(
    leads: &[Lead],
    mut writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let io_err = |source: std::io::Error| ExportError::Io {
        path: export_path.to_path_buf(),
        source,
    };

    for lead in leads {
        serde_json::to_writer(&mut writer, lead).map_err(|e| ExportError::Json {
            path: export_path.to_path_buf(),
            source: e,
        })?;
        writer.write_all(b"\n").map_err(io_err)?;
    }
    writer.flush().map_err(io_err)?;

    Ok(leads.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn make_lead(handle: &str, links: &[&str]) -> Lead {
        Lead {
            social_media: "instagram".to_string(),
            platform: "instagram".to_string(),
            handle: handle.to_string(),
            canonical_url: format!("https://instagram.com/{handle}"),
            followers_int: 10_000,
            bio: "Travel, food \"and\" more".to_string(),
            verified_bool: true,
            external_links: links.iter().map(|s| s.to_string()).collect(),
            source_file: "ig.json".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_csv_export() {
        let leads = vec![
            make_lead("one", &["https://a.com", "https://b.com"]),
            make_lead("two", &[]),
        ];
        let mut buf = Vec::new();
        let count = export_csv(&leads, &mut buf, &PathBuf::from("out.csv")).unwrap();
        assert_eq!(count, 2);

        let output = String::from_utf8(buf).unwrap();
        let mut lines = output.lines();
        assert_eq!(
            lines.next().unwrap(),
            "social_media,platform,handle,display_name,canonical_url,followers_int,bio,\
             verified_bool,business_bool,location,website,email,phone,external_links,\
             linkedin_1,linkedin_2,linkedin_3,source_file"
        );
        let first = lines.next().unwrap();
        assert!(first.starts_with("instagram,instagram,one,,https://instagram.com/one,10000,"));
        assert!(first.contains("https://a.com;https://b.com"));
        assert!(first.contains(",true,false,"));
        assert!(first.ends_with(",,,,ig.json"));
    }

    #[test]
    fn test_csv_header_only_when_empty() {
        let mut buf = Vec::new();
        let count = export_csv(&[], &mut buf, &PathBuf::from("out.csv")).unwrap();
        assert_eq!(count, 0);
        let output = String::from_utf8(buf).unwrap();
        assert_eq!(output.lines().count(), 1);
        assert!(output.starts_with("social_media,"));
    }

    #[test]
    fn test_csv_roundtrips_through_reader() {
        let leads = vec![make_lead("quoted", &["https://a.com"])];
        let mut buf = Vec::new();
        export_csv(&leads, &mut buf, &PathBuf::from("out.csv")).unwrap();

        let mut reader = csv::Reader::from_reader(buf.as_slice());
        let headers = reader.headers().unwrap().clone();
        let row = reader.records().next().unwrap().unwrap();
        let bio_idx = headers.iter().position(|h| h == "bio").unwrap();
        assert_eq!(&row[bio_idx], "Travel, food \"and\" more");
    }

    #[test]
    fn test_jsonl_export() {
        let leads = vec![
            make_lead("one", &["https://a.com"]),
            make_lead("two", &[]),
        ];
        let mut buf = Vec::new();
        let count = export_jsonl(&leads, &mut buf, &PathBuf::from("out.jsonl")).unwrap();
        assert_eq!(count, 2);

        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["handle"], "one");
        assert_eq!(first["external_links"], serde_json::json!(["https://a.com"]));
        assert_eq!(first["verified_bool"], true);
        assert_eq!(first["linkedin_3"], "");
    }

    #[test]
    fn test_jsonl_empty() {
        let mut buf = Vec::new();
        let count = export_jsonl(&[], &mut buf, &PathBuf::from("out.jsonl")).unwrap();
        assert_eq!(count, 0);
        assert!(buf.is_empty());
    }
}
