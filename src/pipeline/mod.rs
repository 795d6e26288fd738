// Rebuild pipelines: read or fetch, parse, merge, validate, write

pub mod ble;
pub mod oui;
