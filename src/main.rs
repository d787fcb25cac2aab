use clap::{Parser, Subcommand};
use secretpipe::{observability, validation, BuiltinFactory, Config, Orchestrator};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Something was wrong with the configuration document.
const EXIT_INVALID_CONFIG: u8 = 2;
/// The pipeline run itself failed.
const EXIT_RUN_FAILED: u8 = 4;

#[derive(Parser)]
#[command(name = "secretpipe")]
#[command(about = "Pulls secrets from vaults, transforms them, and writes them to sinks")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and run the pipeline described by a configuration file
    Run {
        /// Configuration file
        #[arg(short, long)]
        config: PathBuf,

        /// Substitute ${VAR} environment references before parsing
        #[arg(short, long)]
        env_subst: bool,
    },

    /// Validate a configuration file without running it
    Validate {
        /// Configuration file
        #[arg(short, long)]
        config: PathBuf,

        /// Substitute ${VAR} environment references before parsing
        #[arg(short, long)]
        env_subst: bool,
    },
}

fn load_and_validate(path: &Path, env_subst: bool, factory: &BuiltinFactory) -> Option<Config> {
    let config = match Config::from_file(path, env_subst) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("unable to read config from file {}: {}", path.display(), e);
            return None;
        }
    };

    if let Err(e) = validation::validate(&config, factory) {
        eprintln!("error validating configuration: {}", e);
        return None;
    }

    Some(config)
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env if present; only complain about real errors.
    if let Err(e) = dotenvy::dotenv() {
        if !e.to_string().contains("not found") {
            eprintln!("warning: error loading .env file: {}", e);
        }
    }

    let cli = Cli::parse();

    if let Err(e) = observability::init_tracing(cli.verbose) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    let factory = BuiltinFactory::new();

    match cli.command {
        Commands::Validate { config, env_subst } => {
            match load_and_validate(&config, env_subst, &factory) {
                Some(_) => {
                    info!(config = %config.display(), "configuration is valid");
                    ExitCode::SUCCESS
                }
                None => ExitCode::from(EXIT_INVALID_CONFIG),
            }
        }

        Commands::Run { config, env_subst } => {
            let Some(parsed) = load_and_validate(&config, env_subst, &factory) else {
                return ExitCode::from(EXIT_INVALID_CONFIG);
            };

            // Ctrl-C cancels in-flight port calls; the engine itself only
            // stops once the current port invocation honors the signal.
            let cancel = CancellationToken::new();
            let signal_cancel = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    signal_cancel.cancel();
                }
            });

            match Orchestrator::new().process_config(&cancel, &factory, &parsed).await {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("{}", e);
                    ExitCode::from(EXIT_RUN_FAILED)
                }
            }
        }
    }
}
