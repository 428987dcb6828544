use anyhow::Result;
use clap::{Parser, Subcommand};
use citrate_auditor::logging::{init_logging, LogConfig, LogFormat};
use citrate_auditor::{audit, metrics, AuditorConfig, CheckRequest};
use citrate_supply::RunnerDecision;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "citrate-auditor")]
#[command(about = "Audit Citrate supply accounting against a ledger snapshot")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Log output format (pretty, compact, json)
    #[arg(long, value_name = "FORMAT", global = true)]
    log_format: Option<String>,

    /// Print Prometheus metrics after the run
    #[arg(long, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run supply invariants against a JSON snapshot
    Check {
        /// Snapshot file
        #[arg(short, long, value_name = "FILE")]
        snapshot: PathBuf,

        /// Only run this route, e.g. "supply/total-supply"
        #[arg(long, value_name = "KEY")]
        route: Option<String>,

        /// Treat the snapshot as this block height and honour the check period
        #[arg(long, value_name = "N")]
        height: Option<u64>,
    },

    /// List registered invariant routes
    Routes,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AuditorConfig::from_file(path)?,
        None => AuditorConfig::default(),
    };

    let mut log_config = LogConfig::from_config(&config.logging);
    if let Some(format) = &cli.log_format {
        log_config.format = LogFormat::parse(format);
    }
    init_logging(&log_config)?;

    if cli.metrics {
        metrics::init_metrics()?;
    }

    let decision = match cli.command {
        Commands::Check {
            snapshot,
            route,
            height,
        } => {
            let loaded = audit::load_snapshot(&snapshot)?;
            let request = CheckRequest { route, height };
            let result = audit::run_check(&config, &loaded, &request)?;
            print!("{}", audit::format_audit(&result));
            result.decision
        }
        Commands::Routes => {
            let registry = audit::build_registry(&[])?;
            for key in registry.keys() {
                println!("{}", key);
            }
            RunnerDecision::Continue
        }
    };

    if cli.metrics {
        if let Some(rendered) = metrics::render() {
            print!("{}", rendered);
        }
    }

    if decision == RunnerDecision::Halt {
        error!("Supply invariants broken; exiting with failure");
        std::process::exit(1);
    }

    info!("Audit complete");
    Ok(())
}
