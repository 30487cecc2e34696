//! datamover CLI - validate and inspect data-movement configurations.

use clap::{Parser, Subcommand};
use datamover::{ConfigError, IntegrationConfig};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, Level};
use tracing_subscriber::fmt::format::FmtSpan;

#[derive(Parser)]
#[command(name = "datamover")]
#[command(about = "Validate and inspect data-movement integration configurations")]
#[command(version)]
struct Cli {
    /// Path to configuration file (YAML or JSON)
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Output JSON result to stdout
    #[arg(long)]
    output_json: bool,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a configuration file and print a summary
    Validate,

    /// List integration sets and their integrations
    Show,

    /// Write a sample configuration file
    Init {
        /// Output path for the configuration file [default: config.yaml]
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

fn run() -> Result<(), ConfigError> {
    let cli = Cli::parse();

    // Handle init separately (doesn't need an existing config)
    if let Commands::Init { output, force } = &cli.command {
        let path = output
            .clone()
            .unwrap_or_else(|| PathBuf::from("config.yaml"));
        return write_sample_config(&path, *force);
    }

    setup_logging(&cli.verbosity, &cli.log_format).map_err(ConfigError::Invalid)?;

    // load() parses and validates in one step
    let config = IntegrationConfig::load(&cli.config)?;
    info!("Loaded configuration from {:?}", cli.config);

    match cli.command {
        Commands::Init { .. } => unreachable!(), // Handled above

        Commands::Validate => {
            if cli.output_json {
                let summary = serde_json::json!({
                    "name": config.name,
                    "integration_sets": config.integrations.len(),
                    "integrations": config.integration_count(),
                    "fingerprint": config.hash(),
                });
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("Configuration is valid");
                println!("  Name: {}", config.name);
                println!("  Integration sets: {}", config.integrations.len());
                println!("  Integrations: {}", config.integration_count());
                println!("  Fingerprint: {}", config.hash());
            }
        }

        Commands::Show => {
            if cli.output_json {
                println!("{}", config.to_json()?);
            } else {
                println!("{}", config.name);
                if !config.description.is_empty() {
                    println!("  {}", config.description);
                }
                for (set, integrations) in &config.integrations {
                    println!("\n[{}]", set);
                    for integration in integrations {
                        println!("  {}", integration);
                    }
                }
            }
        }
    }

    Ok(())
}

fn write_sample_config(path: &Path, force: bool) -> Result<(), ConfigError> {
    if path.exists() && !force {
        return Err(ConfigError::invalid(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    std::fs::write(path, SAMPLE_CONFIG)?;
    println!("Wrote sample configuration to {}", path.display());
    Ok(())
}

fn setup_logging(verbosity: &str, format: &str) -> Result<(), String> {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false);

    if format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# Example data-movement configuration.
#
# Each integration binds a logical name to a source endpoint and a
# destination endpoint. Integrations are grouped into named sets.
name: example-integrations
description: Copy the orders table into the reporting warehouse nightly

integrations:
  nightly:
    - name: orders to warehouse
      source:
        name: orders-db
        url: jdbc:postgresql://localhost:5432/orders
        driver: org.postgresql.Driver
        username: reader
        password: changeme
        fetch_size: 10000
      destination:
        name: warehouse
        url: jdbc:postgresql://warehouse.internal:5432/analytics
        driver: org.postgresql.Driver
        username: loader
        password: changeme
        batch_size: 20000
        write_mode: overwrite
"#;
