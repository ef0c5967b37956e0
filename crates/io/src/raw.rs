//! Raw sales file ingestion.
//!
//! Two layouts are accepted:
//!
//! - pipe-delimited, one record per line (`T001|2024-12-01|P101|...`)
//! - vertical, one field per line, each record starting at its transaction ID
//!
//! Layout is detected from the share of lines containing `|`.

use std::fmt;
use std::io::Read;
use std::path::Path;

use crate::error::IoError;
use crate::RECORD_FIELDS;

/// One raw record: exactly eight fields, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord(pub [String; 8]);

impl RawRecord {
    fn from_fields<S: AsRef<str>>(fields: &[S]) -> Option<Self> {
        let owned: Vec<String> = fields.iter().map(|f| f.as_ref().to_string()).collect();
        <[String; 8]>::try_from(owned).ok().map(Self)
    }

    pub fn fields(&self) -> &[String; 8] {
        &self.0
    }
}

impl fmt::Display for RawRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("|"))
    }
}

/// Read file and convert to UTF-8 if needed (falls back to Windows-1252).
pub fn read_file_as_utf8(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let mut file = std::fs::File::open(path).map_err(|e| IoError::read(path, e))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|e| IoError::read(path, e))?;

    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            let bytes = e.into_bytes();
            log::info!("{} is not UTF-8, decoding as Windows-1252", path.display());
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

/// Read a raw sales file from disk and split it into records.
pub fn read_sales_data(path: &Path) -> Result<Vec<RawRecord>, IoError> {
    let text = read_file_as_utf8(path)?;
    let records = split_raw_records(&text);
    log::info!("{}: {} raw records", path.display(), records.len());
    Ok(records)
}

fn is_header_line(line: &str) -> bool {
    RECORD_FIELDS.contains(&line) || line == RECORD_FIELDS.join("|")
}

/// Split decoded file text into 8-field records.
///
/// Blank lines and header lines are dropped first. Incomplete records are
/// dropped silently.
pub fn split_raw_records(text: &str) -> Vec<RawRecord> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !is_header_line(line))
        .collect();

    let pipe_lines = lines.iter().filter(|line| line.contains('|')).count();
    if pipe_lines >= (lines.len() / 2).max(1) {
        split_pipe_lines(&lines)
    } else {
        split_vertical(&lines)
    }
}

fn split_pipe_lines(lines: &[&str]) -> Vec<RawRecord> {
    let mut records = Vec::new();
    let mut dropped = 0usize;
    for line in lines.iter().filter(|line| line.contains('|')) {
        let parts: Vec<&str> = line.split('|').collect();
        let record = match parts.len() {
            8 => RawRecord::from_fields(&parts[..]),
            n if n > 8 => {
                // Extra pipes inside the product name: keep the outer columns fixed.
                let name = parts[3..n - 4].join("|");
                let repaired = [
                    parts[0],
                    parts[1],
                    parts[2],
                    name.as_str(),
                    parts[n - 4],
                    parts[n - 3],
                    parts[n - 2],
                    parts[n - 1],
                ];
                RawRecord::from_fields(&repaired[..])
            }
            _ => None,
        };
        match record {
            Some(r) => records.push(r),
            None => dropped += 1,
        }
    }
    if dropped > 0 {
        log::debug!("dropped {dropped} pipe lines with fewer than 8 fields");
    }
    records
}

fn split_vertical(lines: &[&str]) -> Vec<RawRecord> {
    let mut records = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        if lines[i].starts_with(['T', 'X']) {
            let end = (i + 8).min(lines.len());
            if let Some(record) = RawRecord::from_fields(&lines[i..end]) {
                records.push(record);
            }
            i = end;
        } else {
            i += 1;
        }
    }
    records
}
