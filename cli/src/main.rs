//! BioMTAKE CLI
//!
//! Runs contract transactions against a local, snapshot-backed ledger.
//!
//! ```sh
//! # Register a doctor and a device, then add a record
//! biomtake-cli invoke RegisterUser doc1 doctor "Dr A" a@x.com
//! biomtake-cli invoke CreateAsset HP1 PID1 doc1
//! biomtake-cli invoke AddHealthRecord R1 HP1 pat1 doc1 72 120/80 36.6 98.0 ok
//! biomtake-cli invoke GetHealthRecordsByPatient pat1
//!
//! # Validate config without running anything
//! biomtake-cli --check
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use biomtake::config::AppConfig;
use biomtake::runtime::{init_tracing, RuntimeHandle, RuntimeOptions};
use biomtake::{ErrorEnvelope, Function};

/// BioMTAKE: identities, sessions, IoMT devices and encrypted health records.
#[derive(Parser, Debug)]
#[command(
    name = "biomtake-cli",
    version,
    about = "Run BioMTAKE contract transactions against a local ledger",
    long_about = "Runs one named contract transaction per call against a \
                  snapshot-backed in-memory ledger and prints the JSON result.\n\n\
                  Default config: ~/.config/biomtake/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "BIOMTAKE_CONFIG")]
    config: Option<PathBuf>,

    /// Override the ledger snapshot file.
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit.
    #[arg(long)]
    check: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one transaction, e.g. `invoke GetUser doc1`.
    Invoke {
        function: String,
        /// Positional arguments, passed through as strings.
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// List transactions and their arguments.
    Functions,
    /// Write a default configuration file to the config path.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.clone().unwrap_or_else(biomtake::default_config_path);

    let mut config = match AppConfig::load_or_default(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load config from {}: {e}", config_path.display());
            return ExitCode::FAILURE;
        }
    };
    config.apply_env();

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(path) = &cli.snapshot {
        config.ledger.snapshot_path = Some(path.clone());
    }

    init_tracing(&config);
    info!(config = %config_path.display(), "Configuration loaded");

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        return match config.validate() {
            Ok(()) => {
                println!("Configuration is valid");
                println!("   Config file : {}", config_path.display());
                println!("   Snapshot    : {}", config.snapshot_path().display());
                println!("   Session TTL : {}h", config.security.session_ttl_hours);
                println!("   Log level   : {}", config.logging.level);
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!(error = %e, "Configuration is invalid");
                eprintln!("{e}");
                ExitCode::FAILURE
            }
        };
    }

    match cli.command {
        Some(Command::Invoke { function, args }) => invoke(config, &function, &args).await,
        Some(Command::Functions) => {
            for function in Function::ALL {
                let kind = if function.is_write() { "write" } else { "read" };
                println!("{:<28} {:<6} {}", function.as_str(), kind, function.params().join(" "));
            }
            ExitCode::SUCCESS
        }
        Some(Command::Init { force }) => init_config(&config_path, force),
        None => {
            eprintln!("Nothing to do; see --help");
            ExitCode::FAILURE
        }
    }
}

async fn invoke(config: AppConfig, function: &str, args: &[String]) -> ExitCode {
    let runtime = match RuntimeHandle::open(RuntimeOptions {
        config,
        persist: true,
    }) {
        Ok(runtime) => runtime,
        Err(e) => {
            error!(error = %e, "Failed to open ledger");
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.invoke(function, args).await {
        Ok(value) => {
            print_json(&value);
            ExitCode::SUCCESS
        }
        Err(e) => {
            print_json(&ErrorEnvelope::from(&e));
            ExitCode::FAILURE
        }
    }
}

fn init_config(path: &std::path::Path, force: bool) -> ExitCode {
    if path.exists() && !force {
        eprintln!("{} already exists; pass --force to overwrite", path.display());
        return ExitCode::FAILURE;
    }
    match AppConfig::default().save(path) {
        Ok(()) => {
            println!("Wrote {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("failed to render result: {e}"),
    }
}
