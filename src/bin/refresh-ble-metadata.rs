use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use vendor_tables::config::Config;
use vendor_tables::infra::http_client::ReqwestFetcher;
use vendor_tables::logging;
use vendor_tables::pipeline::ble;

/// Refresh the Bluetooth SIG company and assigned-number tables.
#[derive(Parser, Debug)]
#[command(
    name = "refresh-ble-metadata",
    version,
    about = "Fetch Bluetooth SIG registries and rewrite the BLE lookup tables"
)]
struct Cli {
    /// Optional TOML config (defaults to vendor_tables.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn run(config: &Config) -> Result<()> {
    let plan = config.ble_pipeline();
    let fetcher = ReqwestFetcher::new(config.ble.user_agent.clone(), config.fetch_timeout())
        .context("failed to build HTTP client")?;
    let updated = chrono::Utc::now().date_naive();

    let summary = ble::run(&plan, &fetcher, updated)?;

    println!("OK: companies={}", summary.companies);
    println!(
        "OK: assigned={} (service={} characteristic={} descriptor={})",
        summary.assigned, summary.services, summary.characteristics, summary.descriptors
    );
    for report in [&summary.company_report, &summary.assigned_report, &summary.service_report] {
        for path in &report.written {
            println!("OK: wrote {}", path.display());
        }
    }
    Ok(())
}

fn main() {
    let args = Cli::parse();
    let result = Config::load(args.config.as_deref())
        .map_err(anyhow::Error::from)
        .and_then(|config| {
            logging::init_logging(config.log_dir().as_deref());
            run(&config)
        });
    if let Err(e) = result {
        eprintln!("refresh-ble-metadata failed: {:#}", e);
        std::process::exit(1);
    }
}
