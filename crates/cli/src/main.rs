//! r2b2 CLI: a host for the r2b2 bid adapter.
//!
//! This tool provides commands for:
//! - Building the `OpenRTB` bid request for a set of ad units
//! - Interpreting a bid server response into normalized bids
//! - Emitting user-sync instructions for placements
//! - Validating configuration files

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod auction;
mod config;
mod error;

use error::CliError;
use r2b2_common::r2b2::R2b2Adapter;

#[derive(Parser)]
#[command(name = "r2b2cli")]
#[command(about = "Build r2b2 bid requests, interpret responses and emit user syncs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the TOML configuration file (defaults to the embedded config)
    #[arg(short, long, global = true, env = "R2B2_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the bid request for a JSON list of ad units
    Build {
        /// Path to the ad units JSON file
        #[arg(long, short)]
        ad_units: PathBuf,

        /// Mark the request as test traffic regardless of configuration
        #[arg(long)]
        debug: bool,
    },

    /// Interpret a bid server response against the original bids
    Interpret {
        /// Path to the raw response JSON file (`{"body": ...}`)
        #[arg(long, short)]
        response: PathBuf,

        /// Path to the original bids JSON file
        #[arg(long, short)]
        bids: PathBuf,
    },

    /// Emit user-sync instructions for placements
    Sync {
        /// Path to the placements JSON file, as returned by `build`
        #[arg(long, short)]
        placements: PathBuf,

        /// Whether iframe syncing is enabled
        #[arg(long)]
        iframe: bool,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate config and print the merged values
    Validate {
        /// Path to the TOML configuration file
        #[arg(long, short)]
        file: PathBuf,
    },
}

fn init_logger(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let result = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}  {} {}",
                chrono::Local::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply();

    if let Err(e) = result {
        eprintln!("Failed to initialize logger: {e}");
    }
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    if let Commands::Config { action } = &cli.command {
        return match action {
            ConfigAction::Validate { file } => config::validate(file.clone(), cli.verbose),
        };
    }

    let mut settings = config::load_settings(cli.config.as_deref(), cli.verbose)?;

    match cli.command {
        Commands::Build { ad_units, debug } => {
            settings.adapter.debug |= debug;
            let adapter = R2b2Adapter::from_settings(&settings);
            auction::run_build(&adapter, &ad_units)
        }
        Commands::Interpret { response, bids } => {
            let adapter = R2b2Adapter::from_settings(&settings);
            auction::run_interpret(&adapter, &response, &bids)
        }
        Commands::Sync { placements, iframe } => {
            let adapter = R2b2Adapter::from_settings(&settings);
            auction::run_sync(&adapter, &placements, iframe)
        }
        Commands::Config { .. } => Ok(()),
    }
}
