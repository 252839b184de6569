//! Contract compiler CLI.
//!
//! ## Usage
//!
//! ```bash
//! unrelated-contract-compiler \
//!     --errors exceptions.xml \
//!     --operations operations.xml \
//!     --services services.xml \
//!     --output coral-operations.json
//!
//! # Same inputs from a config file, failing on any warning
//! unrelated-contract-compiler --config build.yaml --deny-warnings
//! ```
//!
//! ## Exit Codes
//!
//! - 0: contract written (warnings may have been reported)
//! - 1: unreadable or malformed input, denied warnings, or write failure

mod config;

use clap::{Parser, ValueEnum};
use owo_colors::OwoColorize as _;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use unrelated_contract_compiler::{BuildReport, compile};

use config::{DuplicateStatusArg, LayoutArg, WarningsArg, resolve_config};

/// Compile XML error/operation/service descriptors into a mock-server API contract.
#[derive(Parser, Debug)]
#[command(name = "unrelated-contract-compiler")]
#[command(version)]
#[command(about, long_about = None)]
pub struct Cli {
    /// Build config file (YAML or JSON) listing inputs and settings
    #[arg(long, env = "CONTRACT_COMPILER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Error-definition descriptor (repeatable)
    #[arg(long = "errors", value_name = "FILE")]
    pub errors: Vec<PathBuf>,

    /// Operation-definition descriptor (repeatable)
    #[arg(long = "operations", value_name = "FILE")]
    pub operations: Vec<PathBuf>,

    /// Service-definition descriptor (repeatable)
    #[arg(long = "services", value_name = "FILE")]
    pub services: Vec<PathBuf>,

    /// `OpenAPI` document defining referenced schemas (repeatable)
    #[arg(long = "schemas", value_name = "FILE")]
    pub schemas: Vec<PathBuf>,

    /// Contract output path [default: coral-operations.json]
    #[arg(short, long, env = "CONTRACT_COMPILER_OUTPUT")]
    pub output: Option<PathBuf>,

    /// What to do with build warnings
    #[arg(long, value_enum)]
    pub warnings: Option<WarningsArg>,

    /// Treat warnings as failures (same as `--warnings fail`)
    #[arg(long)]
    pub deny_warnings: bool,

    /// Response kept when two errors of an operation share a status code
    #[arg(long, value_enum)]
    pub duplicate_status: Option<DuplicateStatusArg>,

    /// Emitted document shape
    #[arg(long, value_enum)]
    pub layout: Option<LayoutArg>,

    /// `info.title` for the openapi layout
    #[arg(long)]
    pub title: Option<String>,

    /// `info.version` for the openapi layout
    #[arg(long = "api-version")]
    pub api_version: Option<String>,

    /// Log level (overridden by `RUST_LOG`)
    #[arg(long, default_value = "info", env = "CONTRACT_COMPILER_LOG_LEVEL")]
    pub log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value = "text")]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

fn init_tracing(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn print_report(report: &BuildReport) {
    println!(
        "{} {} path(s) from {} service(s) -> {} ({})",
        "ok".green().bold(),
        report.paths,
        report.services,
        report.output.display(),
        report.digest.dimmed(),
    );
    if !report.warnings.is_empty() {
        println!(
            "{} {} warning(s):",
            "warn".yellow().bold(),
            report.warnings.len()
        );
        for w in &report.warnings {
            println!("  - {w}");
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<BuildReport> {
    let cfg = resolve_config(cli)?;
    tracing::debug!(
        errors = cfg.errors.len(),
        operations = cfg.operations.len(),
        services = cfg.services.len(),
        schemas = cfg.schemas.len(),
        output = %cfg.output.display(),
        "Resolved build config"
    );
    Ok(compile(&cfg)?)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.log_format);

    match run(&cli) {
        Ok(report) => {
            print_report(&report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
