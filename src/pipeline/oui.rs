use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use crate::error::Result;
use crate::merge::OuiTable;
use crate::output::{render_oui_table, write_to_destinations, Destination, WriteReport};
use crate::parser::{IeeeRegistryParser, OuiRecord, OverrideFileParser, RecordParser};
use crate::validate::ensure_minimum;

/// Inputs and outputs of one OUI rebuild, with paths already resolved.
#[derive(Debug, Clone)]
pub struct OuiPipelineConfig {
    /// Ingested in order; later files overwrite earlier ones.
    pub ieee_sources: Vec<PathBuf>,
    /// Ingested last, so it wins over every IEEE source.
    pub override_file: PathBuf,
    pub destinations: Vec<Destination>,
    pub min_entries: usize,
}

#[derive(Debug, Clone)]
pub struct OuiSources {
    pub table: OuiTable,
    pub ieee_rows: usize,
    pub override_rows: usize,
}

#[derive(Debug, Clone)]
pub struct OuiRunSummary {
    pub entries: usize,
    pub ieee_rows: usize,
    pub override_rows: usize,
    pub report: WriteReport,
}

/// Reads every source into one table in priority order.
pub fn load_sources(config: &OuiPipelineConfig) -> Result<OuiSources> {
    let mut table = OuiTable::new();
    let mut ieee_rows = 0;
    for path in &config.ieee_sources {
        ieee_rows += ingest_file(path, &IeeeRegistryParser, &mut table)?;
    }
    let override_rows = ingest_file(&config.override_file, &OverrideFileParser, &mut table)?;
    Ok(OuiSources {
        table,
        ieee_rows,
        override_rows,
    })
}

#[instrument(skip_all)]
pub fn run(config: &OuiPipelineConfig) -> Result<OuiRunSummary> {
    let sources = load_sources(config)?;
    ensure_minimum("oui", sources.table.len(), config.min_entries)?;

    let content = render_oui_table(&sources.table);
    let report = write_to_destinations(&content, &config.destinations)?;
    info!(
        entries = sources.table.len(),
        ieee_rows = sources.ieee_rows,
        override_rows = sources.override_rows,
        "OUI rebuild complete"
    );
    Ok(OuiRunSummary {
        entries: sources.table.len(),
        ieee_rows: sources.ieee_rows,
        override_rows: sources.override_rows,
        report,
    })
}

/// A missing source contributes zero rows; any other read failure is fatal.
fn ingest_file<P>(path: &Path, parser: &P, table: &mut OuiTable) -> Result<usize>
where
    P: RecordParser<Record = OuiRecord>,
{
    if !path.exists() {
        warn!(path = %path.display(), "OUI source missing, skipping");
        return Ok(0);
    }
    let bytes = fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes);
    let rows = table.ingest(parser.parse(&text));
    info!(path = %path.display(), rows, "parsed OUI source");
    Ok(rows)
}
