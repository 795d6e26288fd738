use chrono::NaiveDate;
use tracing::{info, instrument};

use crate::app::ports::TextFetcher;
use crate::error::Result;
use crate::merge::{collect_sig_table, AssignedNumbers, SigTable};
use crate::output::{
    render_assigned_table, render_sig_table, write_to_destinations, Destination, ProvenanceHeader, WriteReport,
};
use crate::parser::{RecordParser, SigYamlField, SigYamlParser};
use crate::validate::ensure_minimum;

const COMPANY_TITLE: &str = "Bluetooth SIG Company Identifiers";
const ASSIGNED_TITLE: &str = "Bluetooth SIG Assigned Numbers (Services, Characteristics, Descriptors)";
const SERVICE_TITLE: &str = "Bluetooth SIG Service UUIDs";

#[derive(Debug, Clone)]
pub struct BleSources {
    pub company: String,
    pub service: String,
    pub characteristic: String,
    pub descriptor: String,
}

#[derive(Debug, Clone, Copy)]
pub struct BleThresholds {
    pub companies: usize,
    pub assigned: usize,
    pub services: usize,
}

#[derive(Debug, Clone)]
pub struct BlePipelineConfig {
    pub sources: BleSources,
    pub thresholds: BleThresholds,
    pub company_destinations: Vec<Destination>,
    pub assigned_destinations: Vec<Destination>,
    pub service_destinations: Vec<Destination>,
}

/// Parsed registries, before validation.
#[derive(Debug, Clone)]
pub struct BleRegistries {
    pub companies: SigTable,
    pub services: SigTable,
    pub characteristics: SigTable,
    pub descriptors: SigTable,
}

impl BleRegistries {
    pub fn assigned(&self) -> AssignedNumbers {
        AssignedNumbers::merge(&self.services, &self.characteristics, &self.descriptors)
    }
}

#[derive(Debug, Clone)]
pub struct BleRunSummary {
    pub companies: usize,
    pub assigned: usize,
    pub services: usize,
    pub characteristics: usize,
    pub descriptors: usize,
    pub company_report: WriteReport,
    pub assigned_report: WriteReport,
    pub service_report: WriteReport,
}

/// Fetches and parses all four registries. Any fetch failure aborts.
pub fn fetch_registries(sources: &BleSources, fetcher: &dyn TextFetcher) -> Result<BleRegistries> {
    let values = SigYamlParser::new(SigYamlField::Value);
    let uuids = SigYamlParser::new(SigYamlField::Uuid);
    let fetch = |url: &str, parser: &SigYamlParser| -> Result<SigTable> {
        let text = fetcher.fetch_text(url)?;
        let table = collect_sig_table(parser.parse(&text));
        info!(url, entries = table.len(), "parsed registry");
        Ok(table)
    };
    Ok(BleRegistries {
        companies: fetch(&sources.company, &values)?,
        services: fetch(&sources.service, &uuids)?,
        characteristics: fetch(&sources.characteristic, &uuids)?,
        descriptors: fetch(&sources.descriptor, &uuids)?,
    })
}

/// Full refresh. Every threshold is checked before the first file is written.
#[instrument(skip_all)]
pub fn run(config: &BlePipelineConfig, fetcher: &dyn TextFetcher, updated: NaiveDate) -> Result<BleRunSummary> {
    let registries = fetch_registries(&config.sources, fetcher)?;
    let assigned = registries.assigned();

    let limits = config.thresholds;
    ensure_minimum("company", registries.companies.len(), limits.companies)?;
    ensure_minimum("service", registries.services.len(), limits.services)?;
    ensure_minimum("assigned", assigned.len(), limits.assigned)?;

    let sources = &config.sources;
    let company = render_sig_table(
        &ProvenanceHeader::new(COMPANY_TITLE, vec![sources.company.clone()], updated),
        &registries.companies,
    );
    let assigned_text = render_assigned_table(
        &ProvenanceHeader::new(
            ASSIGNED_TITLE,
            vec![
                sources.service.clone(),
                sources.characteristic.clone(),
                sources.descriptor.clone(),
            ],
            updated,
        ),
        &assigned,
    );
    let service = render_sig_table(
        &ProvenanceHeader::new(SERVICE_TITLE, vec![sources.service.clone()], updated),
        &registries.services,
    );

    let company_report = write_to_destinations(&company, &config.company_destinations)?;
    let assigned_report = write_to_destinations(&assigned_text, &config.assigned_destinations)?;
    let service_report = write_to_destinations(&service, &config.service_destinations)?;

    info!(
        companies = registries.companies.len(),
        assigned = assigned.len(),
        "BLE metadata refresh complete"
    );
    Ok(BleRunSummary {
        companies: registries.companies.len(),
        assigned: assigned.len(),
        services: registries.services.len(),
        characteristics: registries.characteristics.len(),
        descriptors: registries.descriptors.len(),
        company_report,
        assigned_report,
        service_report,
    })
}
