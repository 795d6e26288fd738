//! Identifier normalization for both registries.
//!
//! OUI prefixes are stored as six uppercase hex digits and rendered in the
//! hyphenated `XX-XX-XX` form. Bluetooth SIG identifiers are plain integers
//! parsed from hex literals.

use std::fmt;

const OUI_DIGITS: usize = 6;

/// A normalized 24-bit MAC vendor prefix, e.g. `001A2B`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OuiKey(String);

impl OuiKey {
    /// Compact form without separators.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hyphenated form used in the output table.
    pub fn hyphenated(&self) -> String {
        format!("{}-{}-{}", &self.0[0..2], &self.0[2..4], &self.0[4..6])
    }
}

impl fmt::Display for OuiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hyphenated())
    }
}

/// Strips everything that is not a hex digit and keeps the first six digits.
///
/// Returns `None` when fewer than six hex digits remain; callers skip the
/// record rather than treating it as an error.
pub fn normalize_oui_key(token: &str) -> Option<OuiKey> {
    let digits: String = token
        .chars()
        .filter(|c| c.is_ascii_hexdigit())
        .map(|c| c.to_ascii_uppercase())
        .take(OUI_DIGITS)
        .collect();
    if digits.len() < OUI_DIGITS {
        return None;
    }
    Some(OuiKey(digits))
}

/// Parses the digits of a `0x` literal (without the prefix).
pub fn parse_hex_literal(digits: &str) -> Option<u128> {
    if digits.is_empty() {
        return None;
    }
    u128::from_str_radix(digits, 16).ok()
}

/// Renders `0x` + uppercase hex padded to an even width of at least four digits.
pub fn format_hex_id(value: u128) -> String {
    let digits = format!("{:X}", value);
    let mut width = digits.len().max(4);
    if width % 2 == 1 {
        width += 1;
    }
    format!("0x{:0>width$}", digits, width = width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_any_separator_style() {
        for token in ["aa-bb-cc", "AA:BB:CC", "aabbcc", "AA.BB.CC.DD", "aa bb cc"] {
            let key = normalize_oui_key(token).unwrap();
            assert_eq!(key.as_str(), "AABBCC", "token {token:?}");
        }
    }

    #[test]
    fn short_tokens_have_no_key() {
        assert!(normalize_oui_key("AA-BB-C").is_none());
        assert!(normalize_oui_key("").is_none());
        assert!(normalize_oui_key("vendor").is_none());
    }

    #[test]
    fn hyphenated_display() {
        let key = normalize_oui_key("001a2b").unwrap();
        assert_eq!(key.hyphenated(), "00-1A-2B");
        assert_eq!(key.to_string(), "00-1A-2B");
    }

    #[test]
    fn keys_order_lexicographically() {
        let a = normalize_oui_key("00FFFF").unwrap();
        let b = normalize_oui_key("0A0000").unwrap();
        assert!(a < b);
    }

    #[test]
    fn hex_literals() {
        assert_eq!(parse_hex_literal("004C"), Some(0x4C));
        assert_eq!(parse_hex_literal("2a00"), Some(0x2A00));
        assert_eq!(parse_hex_literal(""), None);
        assert_eq!(parse_hex_literal(&"F".repeat(33)), None);
    }

    #[test]
    fn hex_ids_pad_to_even_width() {
        assert_eq!(format_hex_id(0x4C), "0x004C");
        assert_eq!(format_hex_id(0x2A00), "0x2A00");
        assert_eq!(format_hex_id(0x12345), "0x012345");
        assert_eq!(format_hex_id(0xFEEDFACE), "0xFEEDFACE");
    }
}
