//! Line-oriented extractors for the registry source formats.
//!
//! Every parser is tolerant: lines that do not match the grammar are skipped
//! and the number of returned records is the success count.

pub mod ieee;
pub mod override_file;
pub mod sig_yaml;

pub use ieee::IeeeRegistryParser;
pub use override_file::OverrideFileParser;
pub use sig_yaml::{decode_yaml_scalar, SigYamlField, SigYamlParser};

use crate::key::OuiKey;

/// One vendor assignment extracted from an OUI source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OuiRecord {
    pub key: OuiKey,
    pub vendor: String,
}

/// One `(identifier, name)` pair extracted from a Bluetooth SIG registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigRecord {
    pub id: u128,
    pub name: String,
}

pub trait RecordParser {
    type Record;

    fn parse(&self, text: &str) -> Vec<Self::Record>;
}
