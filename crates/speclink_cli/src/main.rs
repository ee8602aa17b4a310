//! SpecLink CLI - annotate specification citations in JSON test fixtures
//!
//! Usage: speclink [--root <dir>] [--json] [--verbose]
//!
//! Run from a CI step; stdout carries GitHub Actions workflow commands.

use clap::Parser;
use serde::Serialize;
use speclink_common::{SpecLinkError, EXIT_CONFIG_ERROR, EXIT_ERROR};
use speclink_config::Config;
use speclink_core::{scan_suite, ScanReport, SpecificationUrls};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "speclink",
    version,
    about = "SpecLink: annotate specification citations in JSON test fixtures"
)]
struct Cli {
    /// Repository root holding the tests directory and URL file
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Print the scan report as JSON instead of workflow commands
    #[arg(long)]
    json: bool,

    /// Enable verbose/debug logging
    #[arg(long)]
    verbose: bool,

    /// Write logs to stderr as JSON
    #[arg(long)]
    log_json: bool,
}

#[derive(Serialize)]
struct JsonOut<'a> {
    success: bool,
    #[serde(flatten)]
    report: &'a ScanReport,
}

fn main() {
    let cli = Cli::parse();

    speclink_common::telemetry::init_tracing(cli.verbose, cli.log_json);
    tracing::debug!("SpecLink started");

    if let Err(e) = run(&cli) {
        let (code, exit) = match e.downcast_ref::<SpecLinkError>() {
            Some(SpecLinkError::ConfigError(_)) => ("CONFIG_ERROR", EXIT_CONFIG_ERROR),
            _ => ("SCAN_FAILED", EXIT_ERROR),
        };
        if cli.json {
            print_json_error(&e, code);
        }
        eprintln!("Error: {}", e);
        std::process::exit(exit);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = Config::load(&cli.root)?;
    let urls = SpecificationUrls::load(&config.registry_path())?;
    let report = scan_suite(&config, &urls)?;

    if report.has_errors() {
        tracing::warn!(
            "{} malformed file(s), {} unsupported citation(s)",
            report.stats.malformed_files,
            report.stats.citations_unsupported
        );
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if cli.json {
        serde_json::to_writer_pretty(
            &mut out,
            &JsonOut {
                success: true,
                report: &report,
            },
        )?;
        writeln!(out)?;
    } else {
        report.write_commands(&mut out, &config.output.matcher_owner)?;
    }
    out.flush()?;
    Ok(())
}

/// Print error as JSON for tool integration
fn print_json_error(error: &anyhow::Error, code: &str) {
    let json_error = serde_json::json!({
        "success": false,
        "error": {
            "code": code,
            "message": error.to_string(),
        }
    });

    match serde_json::to_string_pretty(&json_error) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("Failed to encode error: {}", e),
    }
}
