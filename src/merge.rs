//! Folding parsed records into the keyed tables that get serialized.

use std::collections::BTreeMap;
use std::fmt;

use crate::key::OuiKey;
use crate::parser::{OuiRecord, SigRecord};

/// OUI prefix to vendor name. Later ingests overwrite earlier ones.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OuiTable {
    entries: BTreeMap<OuiKey, String>,
}

impl OuiTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts every record in order and returns how many were ingested.
    pub fn ingest<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = OuiRecord>,
    {
        let mut count = 0;
        for record in records {
            self.entries.insert(record.key, record.vendor);
            count += 1;
        }
        count
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &OuiKey) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&OuiKey, &str)> {
        self.entries.iter().map(|(k, v)| (k, v.as_str()))
    }
}

/// Numeric identifier to name, as parsed from one SIG registry.
/// Within one document a later record for the same identifier wins.
pub type SigTable = BTreeMap<u128, String>;

pub fn collect_sig_table<I>(records: I) -> SigTable
where
    I: IntoIterator<Item = SigRecord>,
{
    records.into_iter().map(|r| (r.id, r.name)).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignedKind {
    Service,
    Characteristic,
    Descriptor,
}

impl AssignedKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AssignedKind::Service => "service",
            AssignedKind::Characteristic => "characteristic",
            AssignedKind::Descriptor => "descriptor",
        }
    }
}

impl fmt::Display for AssignedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Services, characteristics and descriptors in one view.
///
/// The three registries are expected to be disjoint; when they are not, the
/// first kind in service, characteristic, descriptor order keeps the slot.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AssignedNumbers {
    entries: BTreeMap<u128, (AssignedKind, String)>,
}

impl AssignedNumbers {
    pub fn merge(services: &SigTable, characteristics: &SigTable, descriptors: &SigTable) -> Self {
        let mut merged = Self::default();
        merged.absorb(AssignedKind::Service, services);
        merged.absorb(AssignedKind::Characteristic, characteristics);
        merged.absorb(AssignedKind::Descriptor, descriptors);
        merged
    }

    fn absorb(&mut self, kind: AssignedKind, table: &SigTable) {
        for (id, name) in table {
            self.entries
                .entry(*id)
                .or_insert_with(|| (kind, name.clone()));
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: u128) -> Option<(AssignedKind, &str)> {
        self.entries.get(&id).map(|(kind, name)| (*kind, name.as_str()))
    }

    /// Entries in ascending numeric order.
    pub fn iter(&self) -> impl Iterator<Item = (u128, AssignedKind, &str)> {
        self.entries
            .iter()
            .map(|(id, (kind, name))| (*id, *kind, name.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::normalize_oui_key;

    fn rec(key: &str, vendor: &str) -> OuiRecord {
        OuiRecord {
            key: normalize_oui_key(key).unwrap(),
            vendor: vendor.to_string(),
        }
    }

    #[test]
    fn later_source_wins() {
        let mut table = OuiTable::new();
        assert_eq!(table.ingest(vec![rec("AABBCC", "Primary"), rec("112233", "Other")]), 2);
        assert_eq!(table.ingest(vec![rec("aa-bb-cc", "Override")]), 1);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(&normalize_oui_key("AABBCC").unwrap()), Some("Override"));
    }

    #[test]
    fn iteration_is_sorted_regardless_of_ingest_order() {
        let mut table = OuiTable::new();
        table.ingest(vec![rec("FF0000", "c"), rec("000001", "a"), rec("0A0000", "b")]);
        let keys: Vec<_> = table.iter().map(|(k, _)| k.as_str().to_string()).collect();
        assert_eq!(keys, vec!["000001", "0A0000", "FF0000"]);
    }

    #[test]
    fn assigned_numbers_first_kind_wins() {
        let services = SigTable::from([(0x1800, "Generic Access".to_string())]);
        let characteristics = SigTable::from([
            (0x1800, "Clash".to_string()),
            (0x2A00, "Device Name".to_string()),
        ]);
        let descriptors = SigTable::from([
            (0x2A00, "Clash".to_string()),
            (0x2902, "Client Characteristic Configuration".to_string()),
        ]);
        let merged = AssignedNumbers::merge(&services, &characteristics, &descriptors);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged.get(0x1800), Some((AssignedKind::Service, "Generic Access")));
        assert_eq!(merged.get(0x2A00), Some((AssignedKind::Characteristic, "Device Name")));
        assert_eq!(
            merged.get(0x2902),
            Some((AssignedKind::Descriptor, "Client Characteristic Configuration"))
        );
        let ids: Vec<u128> = merged.iter().map(|(id, _, _)| id).collect();
        assert_eq!(ids, vec![0x1800, 0x2902, 0x2A00]);
    }

    #[test]
    fn sig_table_later_duplicate_wins() {
        let table = collect_sig_table(vec![
            SigRecord { id: 1, name: "old".into() },
            SigRecord { id: 1, name: "new".into() },
        ]);
        assert_eq!(table.get(&1).map(String::as_str), Some("new"));
    }
}
