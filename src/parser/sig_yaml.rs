//! Reader for the two line shapes used by the Bluetooth SIG registry YAML.
//!
//! ```yaml
//! company_identifiers:
//!   - value: 0x004C
//!     name: 'Apple, Inc.'
//! ```
//!
//! This is not a YAML parser. An identifier line arms the machine and the
//! next `name:` line commits the record.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{RecordParser, SigRecord};
use crate::key::parse_hex_literal;

static VALUE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*-\s*value:\s*0x([0-9A-Fa-f]+)\s*$").expect("static regex"));

static UUID_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*-\s*uuid:\s*0x([0-9A-Fa-f]+)\s*$").expect("static regex"));

static NAME_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*name:\s*(.+?)\s*$").expect("static regex"));

/// Which list-item key carries the identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigYamlField {
    /// `- value: 0x....` (company identifiers)
    Value,
    /// `- uuid: 0x....` (service, characteristic and descriptor UUIDs)
    Uuid,
}

impl SigYamlField {
    fn pattern(self) -> &'static Regex {
        match self {
            SigYamlField::Value => &*VALUE_LINE,
            SigYamlField::Uuid => &*UUID_LINE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Pending(u128),
}

enum Line<'a> {
    Id(u128),
    Name(&'a str),
    Other,
}

impl State {
    /// One transition. An identifier line always replaces the pending one,
    /// dropping a record that never got its name.
    fn step(self, line: Line<'_>) -> (State, Option<SigRecord>) {
        match (self, line) {
            (_, Line::Id(id)) => (State::Pending(id), None),
            (State::Pending(id), Line::Name(raw)) => {
                let name = decode_yaml_scalar(raw);
                let name = name.trim();
                let record = (!name.is_empty()).then(|| SigRecord {
                    id,
                    name: name.to_string(),
                });
                (State::Idle, record)
            }
            (State::Idle, Line::Name(_)) => (State::Idle, None),
            (state, Line::Other) => (state, None),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SigYamlParser {
    field: SigYamlField,
}

impl SigYamlParser {
    pub fn new(field: SigYamlField) -> Self {
        Self { field }
    }

    fn classify<'a>(&self, line: &'a str) -> Line<'a> {
        if let Some(caps) = self.field.pattern().captures(line) {
            // Oversized literals are malformed lines, not identifiers
            return match parse_hex_literal(caps.get(1).map_or("", |m| m.as_str())) {
                Some(id) => Line::Id(id),
                None => Line::Other,
            };
        }
        match NAME_LINE.captures(line).and_then(|caps| caps.get(1)) {
            Some(m) => Line::Name(m.as_str()),
            None => Line::Other,
        }
    }
}

impl RecordParser for SigYamlParser {
    type Record = SigRecord;

    fn parse(&self, text: &str) -> Vec<SigRecord> {
        let mut state = State::Idle;
        let mut out = Vec::new();
        for line in text.lines() {
            let (next, record) = state.step(self.classify(line));
            state = next;
            out.extend(record);
        }
        out
    }
}

/// Unquotes a YAML flow scalar.
///
/// Single-quoted scalars only escape `''`; double-quoted scalars use
/// backslash escapes. Unknown escapes are kept as written.
pub fn decode_yaml_scalar(raw: &str) -> String {
    let value = raw.trim();
    if value.len() >= 2 && value.starts_with('\'') && value.ends_with('\'') {
        return value[1..value.len() - 1].replace("''", "'");
    }
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        return unescape_double_quoted(&value[1..value.len() - 1]);
    }
    value.to_string()
}

fn unescape_double_quoted(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(esc) = chars.next() else {
            out.push('\\');
            break;
        };
        let simple = match esc {
            '\\' => Some('\\'),
            '"' => Some('"'),
            '\'' => Some('\''),
            'n' => Some('\n'),
            't' => Some('\t'),
            'r' => Some('\r'),
            '0' => Some('\0'),
            'a' => Some('\u{07}'),
            'b' => Some('\u{08}'),
            'f' => Some('\u{0C}'),
            'v' => Some('\u{0B}'),
            _ => None,
        };
        if let Some(decoded) = simple {
            out.push(decoded);
            continue;
        }
        let width = match esc {
            'x' => 2,
            'u' => 4,
            'U' => 8,
            _ => 0,
        };
        let digits: String = chars.clone().take(width).collect();
        let decoded = if width > 0
            && digits.len() == width
            && digits.chars().all(|d| d.is_ascii_hexdigit())
        {
            u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32)
        } else {
            None
        };
        match decoded {
            Some(ch) => {
                out.push(ch);
                for _ in 0..width {
                    chars.next();
                }
            }
            None => {
                out.push('\\');
                out.push(esc);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(field: SigYamlField, text: &str) -> Vec<(u128, String)> {
        SigYamlParser::new(field)
            .parse(text)
            .into_iter()
            .map(|r| (r.id, r.name))
            .collect()
    }

    #[test]
    fn company_record() {
        let text = "company_identifiers:\n  - value: 0x004C\n    name: 'Apple, Inc.'\n";
        assert_eq!(parse(SigYamlField::Value, text), vec![(0x4C, "Apple, Inc.".into())]);
    }

    #[test]
    fn uuid_record_with_extra_fields() {
        let text = "uuids:\n  - uuid: 0x1800\n    name: Generic Access\n    id: org.bluetooth.service.generic_access\n";
        assert_eq!(parse(SigYamlField::Uuid, text), vec![(0x1800, "Generic Access".into())]);
    }

    #[test]
    fn field_kind_is_respected() {
        let text = "  - uuid: 0x1800\n    name: Generic Access\n";
        assert!(parse(SigYamlField::Value, text).is_empty());
    }

    #[test]
    fn name_without_pending_identifier_is_ignored() {
        let text = "name: orphan\n  - value: 0x0001\n    name: Nokia\n    name: second\n";
        assert_eq!(parse(SigYamlField::Value, text), vec![(1, "Nokia".into())]);
    }

    #[test]
    fn new_identifier_discards_incomplete_record() {
        let text = "  - value: 0x0001\n  - value: 0x0002\n    name: Kept\n";
        assert_eq!(parse(SigYamlField::Value, text), vec![(2, "Kept".into())]);
    }

    #[test]
    fn empty_name_clears_pending() {
        let text = "  - value: 0x0001\n    name: ''\n    name: Late\n";
        assert!(parse(SigYamlField::Value, text).is_empty());
    }

    #[test]
    fn unrelated_lines_keep_pending_identifier() {
        let text = "  - value: 0x0001\n    # note\n    name: Kept\n";
        assert_eq!(parse(SigYamlField::Value, text), vec![(1, "Kept".into())]);
    }

    #[test]
    fn state_transitions() {
        let (s, r) = State::Idle.step(Line::Id(7));
        assert_eq!(s, State::Pending(7));
        assert!(r.is_none());
        let (s, r) = s.step(Line::Other);
        assert_eq!(s, State::Pending(7));
        assert!(r.is_none());
        let (s, r) = s.step(Line::Name("x"));
        assert_eq!(s, State::Idle);
        assert_eq!(r, Some(SigRecord { id: 7, name: "x".into() }));
        let (s, r) = s.step(Line::Name("y"));
        assert_eq!(s, State::Idle);
        assert!(r.is_none());
    }

    #[test]
    fn single_quoted_scalars() {
        assert_eq!(decode_yaml_scalar("'Apple, Inc.'"), "Apple, Inc.");
        assert_eq!(decode_yaml_scalar("'O''Reilly'"), "O'Reilly");
        assert_eq!(decode_yaml_scalar("'"), "'");
    }

    #[test]
    fn double_quoted_scalars() {
        assert_eq!(decode_yaml_scalar(r#""Say \"hi\"""#), "Say \"hi\"");
        assert_eq!(decode_yaml_scalar(r#""café""#), "café");
        assert_eq!(decode_yaml_scalar(r#""a\x41b""#), "aAb");
        assert_eq!(decode_yaml_scalar(r#""back\\slash""#), "back\\slash");
        assert_eq!(decode_yaml_scalar(r#""keep \q""#), "keep \\q");
    }

    #[test]
    fn plain_and_mismatched_scalars() {
        assert_eq!(decode_yaml_scalar("  Generic Access "), "Generic Access");
        assert_eq!(decode_yaml_scalar("'half\""), "'half\"");
    }
}
