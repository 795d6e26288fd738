//! Rendering of the final tables and fan-out to their destinations.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::error::{RebuildError, Result};
use crate::key::format_hex_id;
use crate::merge::{AssignedNumbers, OuiTable, SigTable};

/// `XX-XX-XX<TAB>vendor` per line, ascending by prefix.
pub fn render_oui_table(table: &OuiTable) -> String {
    let mut out = String::new();
    for (key, vendor) in table.iter() {
        let vendor = vendor.trim();
        if vendor.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{}\t{}", key.hyphenated(), vendor);
    }
    out
}

/// Comment block written ahead of the Bluetooth tables.
#[derive(Debug, Clone)]
pub struct ProvenanceHeader {
    pub title: String,
    pub sources: Vec<String>,
    pub updated: NaiveDate,
}

impl ProvenanceHeader {
    pub fn new(title: impl Into<String>, sources: Vec<String>, updated: NaiveDate) -> Self {
        Self {
            title: title.into(),
            sources,
            updated,
        }
    }

    fn render_into(&self, out: &mut String) {
        let _ = writeln!(out, "# {}", self.title);
        let _ = writeln!(out, "# Source: {}", self.sources.join(", "));
        let _ = writeln!(out, "# Updated: {}", self.updated.format("%Y-%m-%d"));
    }
}

/// `0x<hex> <name>` per line after the header (company and service files).
pub fn render_sig_table(header: &ProvenanceHeader, table: &SigTable) -> String {
    let mut out = String::new();
    header.render_into(&mut out);
    for (id, name) in table {
        let _ = writeln!(out, "{} {}", format_hex_id(*id), name);
    }
    out
}

/// `0x<hex> <kind> <name>` per line after the header.
pub fn render_assigned_table(header: &ProvenanceHeader, assigned: &AssignedNumbers) -> String {
    let mut out = String::new();
    header.render_into(&mut out);
    for (id, kind, name) in assigned.iter() {
        let _ = writeln!(out, "{} {} {}", format_hex_id(id), kind, name);
    }
    out
}

pub fn content_digest(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

/// Where a rendered table goes, and whether the run depends on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub path: PathBuf,
    pub required: bool,
}

impl Destination {
    pub fn required(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            required: true,
        }
    }

    pub fn best_effort(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            required: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct WriteReport {
    /// Hex SHA-256 of the bytes written to every destination.
    pub digest: String,
    pub written: Vec<PathBuf>,
    /// Best-effort destinations that failed, with the error text.
    pub skipped: Vec<(PathBuf, String)>,
}

/// Writes `content` to every destination in order.
///
/// A failing required destination stops the fan-out; files already written
/// stay in place.
pub fn write_to_destinations(content: &str, destinations: &[Destination]) -> Result<WriteReport> {
    let mut report = WriteReport {
        digest: content_digest(content),
        ..WriteReport::default()
    };
    for dest in destinations {
        match write_atomically(&dest.path, content.as_bytes()) {
            Ok(()) => {
                info!(path = %dest.path.display(), digest = %report.digest, "wrote table");
                report.written.push(dest.path.clone());
            }
            Err(source) if dest.required => {
                return Err(RebuildError::Write {
                    path: dest.path.clone(),
                    source,
                });
            }
            Err(e) => {
                warn!(path = %dest.path.display(), error = %e, "skipping best-effort destination");
                report.skipped.push((dest.path.clone(), e.to_string()));
            }
        }
    }
    Ok(report)
}

/// Writes through a sibling temp file so readers never see a partial table.
fn write_atomically(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::InvalidInput, "destination has no file name"))?;
    let tmp = path.with_file_name(format!(".{}.tmp", file_name));
    fs::write(&tmp, bytes)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    Ok(())
}
