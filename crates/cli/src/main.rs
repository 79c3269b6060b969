//! `dockcheck` — run challan-vs-sticker reconciliation from extraction JSON.

#[allow(dead_code)]
mod exit_codes;
mod export;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use dockcheck_recon::engine::load_input;
use dockcheck_recon::{ReconConfig, ReconError};

use exit_codes::{EXIT_INVALID_CONFIG, EXIT_RUNTIME, EXIT_SUCCESS, EXIT_VARIANCE};

#[derive(Parser)]
#[command(name = "dockcheck")]
#[command(about = "Warehouse inbound reconciliation: challan vs sticker scans")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile a challan extraction against sticker-scan extractions
    #[command(after_help = "\
Examples:
  dockcheck run challan.json stickers.json
  dockcheck run challan.json stickers.json --config recon.toml -o report.csv
  dockcheck run challan.json stickers.json --json > report.json")]
    Run {
        /// Challan extraction JSON (document header + line items)
        challan: PathBuf,

        /// Sticker-scan extraction JSON
        stickers: PathBuf,

        /// Reconciliation config TOML (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the CSV report here
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Print the full report as JSON to stdout
        #[arg(long)]
        json: bool,

        /// Suppress the human summary on stderr
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Validate a reconciliation config without running
    #[command(after_help = "\
Examples:
  dockcheck validate recon.toml")]
    Validate {
        /// Path to the config TOML
        config: PathBuf,
    },
}

#[derive(Debug)]
struct CliError {
    code: u8,
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn runtime(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_RUNTIME,
            message: msg.into(),
            hint: None,
        }
    }

    fn invalid_config(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_INVALID_CONFIG,
            message: msg.into(),
            hint: None,
        }
    }

    fn variance(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_VARIANCE,
            message: msg.into(),
            hint: None,
        }
    }

    fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            challan,
            stickers,
            config,
            output,
            json,
            quiet,
        } => cmd_run(challan, stickers, config, output, json, quiet),
        Commands::Validate { config } => cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("error: {}", e.message);
            if let Some(hint) = e.hint {
                eprintln!("hint: {hint}");
            }
            ExitCode::from(e.code)
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<ReconConfig, CliError> {
    match path {
        None => Ok(ReconConfig::default()),
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|e| {
                CliError::runtime(format!("cannot read config {}: {e}", path.display()))
            })?;
            ReconConfig::from_toml(&text).map_err(|e| CliError::invalid_config(e.to_string()))
        }
    }
}

fn cmd_run(
    challan_path: PathBuf,
    stickers_path: PathBuf,
    config_path: Option<PathBuf>,
    output: Option<PathBuf>,
    json: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let config = load_config(config_path.as_ref())?;

    let challan_json = std::fs::read_to_string(&challan_path).map_err(|e| {
        CliError::runtime(format!("cannot read {}: {e}", challan_path.display()))
    })?;
    let stickers_json = std::fs::read_to_string(&stickers_path).map_err(|e| {
        CliError::runtime(format!("cannot read {}: {e}", stickers_path.display()))
    })?;

    let input = load_input(&challan_json, &stickers_json).map_err(|e| {
        CliError::runtime(e.to_string())
            .with_hint("inputs must be extraction JSON: a challan document and a scans list")
    })?;

    let report = dockcheck_recon::run(&config, &input).map_err(|e| match e {
        ReconError::ConfigParse(_) | ReconError::ConfigValidation(_) => {
            CliError::invalid_config(e.to_string())
        }
        other => CliError::runtime(other.to_string()),
    })?;

    if let Some(ref path) = output {
        let extra = export::write_report(&report, &config.export, path)
            .map_err(|e| CliError::runtime(format!("cannot write report: {e}")))?;
        eprintln!("wrote {}", path.display());
        if let Some(summary_path) = extra {
            eprintln!("wrote {}", summary_path.display());
        }
    }

    if json {
        let json_str = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::runtime(format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
    }

    let s = &report.summary;
    if !quiet {
        eprintln!(
            "challan '{}': {} record(s) — {} matched, {} qty mismatch, {} missing, {} extra, {} unidentified, {} anomaly(ies)",
            report.meta.challan_number.as_deref().unwrap_or("?"),
            report.records.len(),
            s.matched_count,
            s.mismatch_count,
            s.missing_count,
            s.extra_count,
            s.unidentified_count,
            s.challan_anomalies + s.sticker_anomalies,
        );
    }

    let variances =
        s.mismatch_count + s.missing_count + s.extra_count + s.unidentified_count;
    let anomalies = s.challan_anomalies + s.sticker_anomalies;
    if variances > 0 || anomalies > 0 {
        return Err(CliError::variance("variances found"));
    }

    Ok(())
}

fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let text = std::fs::read_to_string(&config_path).map_err(|e| {
        CliError::runtime(format!("cannot read config {}: {e}", config_path.display()))
    })?;

    match ReconConfig::from_toml(&text) {
        Ok(config) => {
            eprintln!(
                "valid: fuzzy threshold {}, identity trust {}, qty tolerance {}, {} export column(s)",
                config.matching.fuzzy_match_threshold,
                config.matching.identity_trust_threshold,
                config.tolerance.quantity,
                config.export.columns.len(),
            );
            Ok(())
        }
        Err(e) => Err(CliError::invalid_config(e.to_string())),
    }
}
