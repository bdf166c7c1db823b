use anyhow::Result;
use cconv::core::ConversionError;
use cconv::cli::convert::ConvertArgs;
use cconv::core::log::init_logging;
use clap::{CommandFactory, Parser, Subcommand};
use std::process::ExitCode;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for cconv::AppCommand {
    fn from(cmd: Commands) -> cconv::AppCommand {
        match cmd {
            Commands::List => cconv::AppCommand::List,
            Commands::Convert { amount, from, to } => {
                cconv::AppCommand::Convert(ConvertArgs { amount, from, to })
            }
            Commands::Refresh { force } => cconv::AppCommand::Refresh { force },
            Commands::Export => cconv::AppCommand::Export,
            Commands::Info => cconv::AppCommand::Info,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List all currencies with their rates
    List,
    /// Convert an amount between two currencies
    Convert {
        /// Whole amount to convert
        amount: String,
        /// Currency code to convert from
        from: String,
        /// Currency code to convert to
        to: String,
    },
    /// Re-fetch rates when the cached data is from before today (UTC)
    Refresh {
        /// Fetch even if the cached data is current
        #[arg(short, long)]
        force: bool,
    },
    /// Save the current rates to the data file
    Export,
    /// Show where the rates come from and when they were generated
    Info,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => cconv::cli::setup::setup(),
        Some(cmd) => cconv::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        // The convert command has already printed the message
        Err(e) if e.downcast_ref::<ConversionError>().is_some() => Ok(ExitCode::FAILURE),
        Err(e) => {
            tracing::error!(error = %e, "Application failed");
            Err(e)
        }
    }
}
