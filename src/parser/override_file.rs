use super::{OuiRecord, RecordParser};
use crate::key::normalize_oui_key;

/// Parses the historical combined OUI file kept in the repository.
///
/// Lines are `<prefix><whitespace><vendor>`. Older merges stored
/// `SHORT<TAB>Full Vendor` as the vendor; the full name after the last tab
/// is kept in that case.
#[derive(Debug, Default, Clone, Copy)]
pub struct OverrideFileParser;

impl OverrideFileParser {
    fn parse_line(line: &str) -> Option<OuiRecord> {
        let (token, rest) = line.split_once(|c: char| c.is_whitespace())?;
        let key = normalize_oui_key(token)?;
        let blob = rest.trim();
        let vendor = match blob.rsplit_once('\t') {
            Some((_, full)) => full.trim(),
            None => blob,
        };
        if vendor.is_empty() {
            return None;
        }
        Some(OuiRecord {
            key,
            vendor: vendor.to_string(),
        })
    }
}

impl RecordParser for OverrideFileParser {
    type Record = OuiRecord;

    fn parse(&self, text: &str) -> Vec<OuiRecord> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(Self::parse_line)
            .collect()
    }
}
