//! CLI entry point for the EV fleet battery-health dashboard.
//!
//! Provides subcommands for reporting KPIs and the health trend for a
//! climate / charging selection, exporting the raw tables, listing the
//! available categories, and checking the tables for consistency.

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use ev_fleet_health::FleetSession;
use ev_fleet_health::analysis::Selection;
use ev_fleet_health::config::DashboardConfig;
use ev_fleet_health::dataset::export::{
    DAILY_EXPORT_NAME, SUMMARY_EXPORT_NAME, export_table_to_path,
};
use ev_fleet_health::output::{
    log_kpis, log_summary, log_trend, print_json, print_pretty, write_json, write_trend_csv,
};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "ev_fleet_health")]
#[command(about = "Battery health dashboard for a simulated EV fleet", long_about = None)]
struct Cli {
    /// Summary CSV (one row per vehicle); overrides FLEET_SUMMARY_PATH
    #[arg(long, global = true, value_name = "FILE")]
    summary_file: Option<PathBuf>,

    /// Daily CSV (one row per vehicle per day); overrides FLEET_DAILY_PATH
    #[arg(long, global = true, value_name = "FILE")]
    daily_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute KPIs and the health trend for a climate / charging selection
    Report {
        /// Climate zone to include (repeatable; default: all)
        #[arg(long = "climate", value_name = "LABEL")]
        climates: Vec<String>,

        /// Charging type to include (repeatable; default: all)
        #[arg(long = "charging", value_name = "LABEL")]
        charging: Vec<String>,

        /// Select no climate zones
        #[arg(long, conflicts_with = "climates")]
        no_climate: bool,

        /// Select no charging types
        #[arg(long, conflicts_with = "charging")]
        no_charging: bool,

        /// Write the full view as JSON to this file
        #[arg(long, value_name = "FILE")]
        json: Option<PathBuf>,

        /// Write the trend series as CSV to this file
        #[arg(long, value_name = "FILE")]
        trend_csv: Option<PathBuf>,

        /// Write the summary table, sorted by battery health, as CSV to this file
        #[arg(long, value_name = "FILE")]
        summary_csv: Option<PathBuf>,

        /// Log every vehicle, sorted by battery health
        #[arg(long, default_value_t = false)]
        vehicles: bool,
    },
    /// Export the unfiltered tables verbatim
    Export {
        /// Directory used when no explicit file is given
        #[arg(short = 'd', long, default_value = "exports")]
        out_dir: PathBuf,

        /// Destination for the daily table
        #[arg(long, value_name = "FILE")]
        daily: Option<PathBuf>,

        /// Destination for the summary table
        #[arg(long, value_name = "FILE")]
        summary: Option<PathBuf>,
    },
    /// List the climate zones and charging types present in the daily table
    Categories,
    /// Check the tables for label/threshold mismatches, duplicates and out-of-range values
    Check,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let cli = Cli::parse();
    let config = DashboardConfig::from_env().with_overrides(cli.summary_file, cli.daily_file);

    // Logging setup: colored stderr + JSON rolling log file
    let log_dir = config
        .log_file_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = config
        .log_file_path
        .file_name()
        .unwrap_or(OsStr::new("ev_fleet_health.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    info!(
        summary = %config.summary_path.display(),
        daily = %config.daily_path.display(),
        "Loading fleet data"
    );
    let mut session = FleetSession::load(&config.summary_path, &config.daily_path)?;

    match cli.command {
        Commands::Report {
            climates,
            charging,
            no_climate,
            no_charging,
            json,
            trend_csv,
            summary_csv,
            vehicles,
        } => {
            let selection = build_selection(&session, climates, charging, no_climate, no_charging);
            session.set_selection(selection);

            let view = session.view();
            print_pretty(&view);
            log_kpis(&view.kpis);
            log_trend(&view.trend);
            if vehicles {
                log_summary(&view.summary_by_health);
            }

            match json {
                Some(path) => write_json(&path, &view)?,
                None => print_json(&view)?,
            }
            if let Some(path) = trend_csv {
                write_trend_csv(&path, &view.trend)?;
            }
            if let Some(path) = summary_csv {
                export_table_to_path(&session.sorted_summary(), &path)?;
            }
        }
        Commands::Export {
            out_dir,
            daily,
            summary,
        } => {
            let (daily, summary) = match (daily, summary) {
                (None, None) => (
                    Some(out_dir.join(DAILY_EXPORT_NAME)),
                    Some(out_dir.join(SUMMARY_EXPORT_NAME)),
                ),
                explicit => explicit,
            };

            if let Some(path) = daily {
                session.export_daily_to_path(&path)?;
            }
            if let Some(path) = summary {
                session.export_summary_to_path(&path)?;
            }
        }
        Commands::Categories => {
            info!(climates = ?session.climate_options(), "Climate zones");
            info!(charging = ?session.charging_options(), "Charging types");
        }
        Commands::Check => {
            let issues = session.check_integrity();
            if !issues.is_empty() {
                bail!("{} integrity issue(s) found", issues.len());
            }
            info!("No integrity issues found");
        }
    }

    Ok(())
}

/// Turns the CLI flags into a selection. A dimension with no labels given
/// selects every value present in the data unless its `--no-*` flag is set.
fn build_selection(
    session: &FleetSession,
    climates: Vec<String>,
    charging: Vec<String>,
    no_climate: bool,
    no_charging: bool,
) -> Selection {
    let climates = pick(climates, no_climate, session.climate_options(), "climate");
    let charging = pick(charging, no_charging, session.charging_options(), "charging");
    Selection::new(climates, charging)
}

fn pick(given: Vec<String>, none: bool, options: Vec<String>, dimension: &str) -> Vec<String> {
    if none {
        return Vec::new();
    }
    if given.is_empty() {
        return options;
    }

    for label in &given {
        if !options.contains(label) {
            warn!(dimension, label = %label, "Label not present in data, it will match nothing");
        }
    }
    given
}
