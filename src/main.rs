//! satview - headless host for the satellite dataset engine
//!
//! Loads a TLE catalog, propagates it with SGP4 and reports on the resulting
//! dataset without a window.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};

use satview::data::{load_catalog_text, load_config, CatalogStats, EntrySummary};
use satview::propagation::Sgp4Propagator;
use satview::renderer::HeadlessHost;
use satview::ui::LogDisplay;
use satview::{EngineConfig, SatelliteEngine};

#[derive(Parser, Debug)]
#[command(name = "satview", about = "Satellite dataset engine")]
struct Cli {
    /// TLE catalog (3-line records, optionally .gz)
    catalog: PathBuf,
    /// Engine config JSON; missing fields use defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// Propagation instant (RFC 3339), defaults to now
    #[arg(long)]
    at: Option<String>,
    /// Override orbit samples per path
    #[arg(long)]
    resolution: Option<u32>,
    /// Color points near the reference planes
    #[arg(long)]
    debug_coloring: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the catalog and log dataset statistics
    Summary,
    /// Write every entry as JSON
    Export(ExportArgs),
    /// Click objects by name and log the notifications
    Select(SelectArgs),
}

#[derive(Args, Debug, Clone)]
struct ExportArgs {
    /// Output JSON file path
    #[arg(long, default_value = "out/entries.json")]
    output: PathBuf,
}

#[derive(Args, Debug, Clone)]
struct SelectArgs {
    /// Object names (TLE name lines)
    #[arg(required = true)]
    names: Vec<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    let at = match cli.at.as_deref() {
        Some(text) => DateTime::parse_from_rfc3339(text)
            .with_context(|| format!("Invalid --at instant: {}", text))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };

    let text = load_catalog_text(&cli.catalog)?;
    let mut engine = SatelliteEngine::new(config, Sgp4Propagator::new())?;
    let mut host = HeadlessHost::new();
    let report = engine.load(&text, at, &mut host)?;

    match cli.command {
        Command::Summary => {
            let stats = CatalogStats::from_store(engine.store(), &report);
            let frame = engine.tick(at);
            log::info!("Instant: {}", at.to_rfc3339());
            log::info!("{:#?}", stats);
            log::info!(
                "GMST {:.4} rad, Earth rotation {:.4} rad, axial tilt {:.4} rad",
                frame.gmst,
                frame.earth_rotation,
                frame.axial_tilt
            );
            for (id, err) in report.skipped.iter().chain(&report.without_orbit) {
                log::debug!("{}: {}", id, err);
            }
        }
        Command::Export(args) => {
            let summaries: Vec<EntrySummary> =
                engine.store().iter().map(|(_, entry)| entry.into()).collect();
            if let Some(parent) = args.output.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("Failed to create {:?}", parent))?;
                }
            }
            let json = serde_json::to_string_pretty(&summaries)?;
            std::fs::write(&args.output, json)
                .with_context(|| format!("Failed to write {:?}", args.output))?;
            log::info!("Wrote {} entries to {:?}", summaries.len(), args.output);
        }
        Command::Select(args) => {
            let mut display = LogDisplay::new();
            for name in &args.names {
                if !engine.toggle_click(name, &mut host, &mut display) {
                    return Err(anyhow!("no object named '{}' in the catalog", name));
                }
            }
            log::info!(
                "{} notifications, {} orbit paths visible",
                display.notifications(),
                host.visible_path_count()
            );
        }
    }

    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => EngineConfig::default(),
    };
    if let Some(resolution) = cli.resolution {
        config.orbit_resolution = resolution;
    }
    if cli.debug_coloring {
        config.debug_coloring = true;
    }
    config.validate()?;
    Ok(config)
}
