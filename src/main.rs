// POI Management System - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/poims --demo
// ```
//
// Or with your own catalog:
//
// ```console
// $ ./target/release/poims --config catalog.yaml --format json --top 5 --verbose
// ```

use anyhow::Context;
use clap::Parser;
use poims::system::{LoggingConfig, LoggingGuard, PoiManagementSystem};
use poims::types::{CatalogSource, CliArgs, ReportConfig, ReportFormat};
use std::process;
use tracing::{error, info};

const DEMO_CATALOG: &str = include_str!("../configs/sample.yaml");

fn main() {
    let args = CliArgs::parse();

    // Keep the guard alive for the whole run so buffered log lines are flushed
    let _logging = match init_logging(&args) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            process::exit(1);
        }
    };

    info!("Starting POI Management System");

    if let Err(e) = run(&args) {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }

    info!("POI Management System completed successfully");
}

/// Initialize logging based on CLI flags
fn init_logging(args: &CliArgs) -> Result<LoggingGuard, Box<dyn std::error::Error + Send + Sync>> {
    if !args.json_logs && args.log_dir.is_none() {
        if args.debug {
            return LoggingConfig::init_debug();
        }
        if args.verbose {
            return LoggingConfig::init_verbose();
        }
    }

    let level = if args.debug {
        tracing::Level::DEBUG
    } else if args.verbose {
        tracing::Level::INFO
    } else {
        // Default: only warnings about skipped or rejected input
        tracing::Level::WARN
    };

    let mut config = LoggingConfig::new().with_level(level);
    if args.json_logs {
        config = config.with_json_format().without_ansi();
    }
    if let Some(dir) = &args.log_dir {
        config = config.with_file_logging(dir.clone());
    }
    config.init()
}

/// Load the catalog and print the requested report
fn run(args: &CliArgs) -> anyhow::Result<()> {
    let config = ReportConfig::from_cli_args(args).context("Invalid command line configuration")?;
    info!(?config, "Configuration loaded and validated successfully");

    let system = load_system(&config.source);
    info!(
        pois = system.poi_count(),
        visitors = system.visitor_count(),
        "Catalog ready"
    );

    if config.validate_only {
        let validation = system.validation_report();
        match config.format {
            ReportFormat::Text => println!("{}", validation),
            ReportFormat::Json => println!(
                "{}",
                serde_json::to_string_pretty(&validation).context("Failed to serialize validation report")?
            ),
        }
        return Ok(());
    }

    let report = system.report(config.top_k, config.min_visits, config.min_types);
    match config.format {
        ReportFormat::Text => print!("{}", report.render_text()),
        ReportFormat::Json => println!("{}", report.to_json().context("Failed to serialize report")?),
    }
    Ok(())
}

/// Build the system from the configured catalog source
fn load_system(source: &CatalogSource) -> PoiManagementSystem {
    match source {
        CatalogSource::Empty => {
            eprintln!("No catalog given, starting with an empty system. Use --demo or --config <path>.");
            PoiManagementSystem::new()
        }
        CatalogSource::Demo => {
            eprintln!("Loading demo catalog...");
            PoiManagementSystem::from_yaml_str(DEMO_CATALOG)
        }
        CatalogSource::File(path) => {
            eprintln!("Loading catalog from {}...", path.display());
            PoiManagementSystem::from_config_path(path)
        }
    }
}
