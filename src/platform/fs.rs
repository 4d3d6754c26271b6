// LeadSift - platform/fs.rs
//
// Filesystem reads for scraper output files.
// Keeps the core decoder free of I/O so it can be tested on plain strings.

use crate::util::error::LoadError;
use std::path::Path;

/// Read the full content of an input file as UTF-8.
///
/// Files larger than `max_size` bytes are rejected before reading. Invalid
/// UTF-8 rejects the whole file; there is no lossy fallback.
pub fn read_input_file(path: &Path, max_size: u64) -> Result<String, LoadError> {
    let io_err = |source: std::io::Error| LoadError::Io {
        file: path.to_path_buf(),
        source,
    };

    let size = std::fs::metadata(path).map_err(io_err)?.len();
    if size > max_size {
        return Err(LoadError::TooLarge {
            file: path.to_path_buf(),
            size,
            max_size,
        });
    }

    let bytes = std::fs::read(path).map_err(io_err)?;
    String::from_utf8(bytes).map_err(|source| LoadError::InvalidEncoding {
        file: path.to_path_buf(),
        source,
    })
}
