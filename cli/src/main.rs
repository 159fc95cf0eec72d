use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};
use wallet_pass_extract::config::ReportConfig;
use wallet_pass_extract::discover::{build_wallet_report, collect_wallet_paths};
use wallet_pass_extract::output::{ReportTargets, write_reports};

#[derive(Debug, Parser)]
#[command(name = "wallet-pass-report")]
#[command(about = "Extract passes from wallet archives into JSON and CSV reports")]
struct Cli {
    /// Wallet files and/or directories containing wallet files.
    #[arg(default_value = ".")]
    inputs: Vec<PathBuf>,
    /// YAML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Extension of wallet files when scanning directories (default: ywe).
    #[arg(long)]
    extension: Option<String>,
    /// Directory for timestamp-named reports (default: current directory).
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Explicit JSON report path.
    #[arg(long)]
    json: Option<PathBuf>,
    /// Explicit CSV report path.
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Write reports without a UTF-8 byte-order mark.
    #[arg(long)]
    no_bom: bool,
    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(if cli.verbose { "debug" } else { "info" })
        .init();

    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let config = resolve_config(&cli)?;

    let wallets = collect_wallet_paths(&cli.inputs, &config.extension)
        .map_err(|err| format!("Failed to collect wallets: {err}"))?;
    if wallets.is_empty() {
        warn!(extension = %config.extension, "No wallet files found");
    }

    let (report, failures) = build_wallet_report(&wallets, &config.extract_options());
    for failure in &failures {
        eprintln!("{}: {}", failure.wallet.display(), failure.message);
    }
    info!(
        wallets = report.len(),
        passes = report.pass_count(),
        failed = failures.len(),
        "Extraction finished"
    );

    let targets = ReportTargets::timestamped(&config.output_dir)
        .override_json(cli.json)
        .override_csv(cli.csv);
    let outcome = write_reports(&report, &targets, config.encoding());

    for path in outcome.written() {
        println!("Creating report:\n\t{}", path.display());
    }
    for err in outcome.errors() {
        eprintln!("{err}");
    }

    if outcome.is_success() {
        Ok(())
    } else {
        Err("One or more reports could not be written".to_string())
    }
}

/// Loads the optional config file and applies command-line overrides.
fn resolve_config(cli: &Cli) -> Result<ReportConfig, String> {
    let mut config = match &cli.config {
        Some(path) => ReportConfig::from_file(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))?,
        None => ReportConfig::default(),
    };

    if let Some(extension) = &cli.extension {
        config.extension = extension.clone();
    }
    if let Some(output_dir) = &cli.output_dir {
        config.output_dir = output_dir.clone();
    }
    if cli.no_bom {
        config.bom = false;
    }
    Ok(config)
}
