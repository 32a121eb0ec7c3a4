use anyhow::Result;
use clap::{Parser, Subcommand};
use fxconv::core::log::init_logging;

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

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an amount between the currencies of two countries
    Convert {
        /// Country to convert from
        from: String,
        /// Country to convert to
        to: String,
        /// Amount in the source currency
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Print the conversion record as JSON
        #[arg(long)]
        json: bool,
    },
    /// List countries, optionally only those starting with a prefix
    Countries { prefix: Option<String> },
}

impl From<Commands> for fxconv::AppCommand {
    fn from(cmd: Commands) -> fxconv::AppCommand {
        match cmd {
            Commands::Convert {
                from,
                to,
                amount,
                json,
            } => fxconv::AppCommand::Convert {
                from,
                to,
                amount,
                json,
            },
            Commands::Countries { prefix } => fxconv::AppCommand::Countries { prefix },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fxconv::cli::setup::setup(),
        Some(cmd) => fxconv::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => fxconv::run_command(fxconv::AppCommand::Session, cli.config_path.as_deref()).await,
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
