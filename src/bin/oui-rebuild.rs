use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use vendor_tables::config::Config;
use vendor_tables::error::RebuildError;
use vendor_tables::logging;
use vendor_tables::pipeline::oui;

/// Rebuild the canonical OUI vendor table from the IEEE registry and the
/// historical combined override file.
#[derive(Parser, Debug)]
#[command(name = "oui-rebuild", version, about = "Rebuild the combined OUI vendor table")]
struct Cli {
    /// Optional TOML config (defaults to vendor_tables.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    let config = Config::load(args.config.as_deref())?;
    logging::init_logging(config.log_dir().as_deref());

    let plan = config.oui_pipeline();
    match oui::run(&plan) {
        Ok(summary) => {
            println!("OK: entries={}", summary.entries);
            for path in &summary.report.written {
                println!("OK: wrote {}", path.display());
            }
            for (path, reason) in &summary.report.skipped {
                println!("WARN: skipped {} ({})", path.display(), reason);
            }
            println!(
                "info: ieee_rows_parsed={} override_rows_parsed={}",
                summary.ieee_rows, summary.override_rows
            );
            println!("info: sha256={}", summary.report.digest);
            Ok(())
        }
        Err(RebuildError::InsufficientEntries { count, .. }) => {
            let sources: Vec<String> = plan
                .ieee_sources
                .iter()
                .map(|p| p.display().to_string())
                .collect();
            eprintln!(
                "OUI rebuild failed: too few entries ({}). Check sources: {}",
                count,
                sources.join(", ")
            );
            std::process::exit(1)
        }
        Err(e) => Err(e.into()),
    }
}
