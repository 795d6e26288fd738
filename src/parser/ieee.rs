use once_cell::sync::Lazy;
use regex::Regex;

use super::{OuiRecord, RecordParser};
use crate::key::normalize_oui_key;

static HEX_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^([0-9A-F]{2}-[0-9A-F]{2}-[0-9A-F]{2})\s+\(hex\)\s+(.+)$")
        .expect("static regex")
});

static BASE16_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^([0-9A-F]{6})\s+\(base\s+16\)\s+(.+)$").expect("static regex")
});

/// Parses the IEEE `oui.txt` registry.
///
/// The registry lists each assignment twice, once as `XX-XX-XX (hex)` and
/// once as `XXXXXX (base 16)`; both shapes are accepted and the later line
/// simply rewrites the same key.
#[derive(Debug, Default, Clone, Copy)]
pub struct IeeeRegistryParser;

impl IeeeRegistryParser {
    fn parse_line(line: &str) -> Option<OuiRecord> {
        let caps = HEX_LINE
            .captures(line)
            .or_else(|| BASE16_LINE.captures(line))?;
        let key = normalize_oui_key(&caps[1])?;
        let vendor = caps[2].trim();
        if vendor.is_empty() {
            return None;
        }
        Some(OuiRecord {
            key,
            vendor: vendor.to_string(),
        })
    }
}

impl RecordParser for IeeeRegistryParser {
    type Record = OuiRecord;

    fn parse(&self, text: &str) -> Vec<OuiRecord> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter_map(Self::parse_line)
            .collect()
    }
}
