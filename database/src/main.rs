use clap::{Parser, Subcommand};
use std::error::Error;

mod commands;
mod config;
mod migration;

/// Schema management for the Root Network explorer: blocks, extrinsics,
/// events, EVM transactions and tokens
#[derive(Parser, Debug)]
#[command(name = "rootscan-database", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Create the explorer database if it does not exist yet
    Create {
        /// Database name, defaults to the one in DATABASE_URL
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Apply pending explorer migrations
    Migrate {
        /// Apply at most this many (all pending if not given)
        #[arg(short, long)]
        steps: Option<u32>,
    },
    /// Drop the explorer tables and re-apply every migration
    Reset,
    /// List applied and pending migrations
    Status,
}

async fn run(command: Commands) -> Result<(), Box<dyn Error>> {
    match command {
        Commands::Create { name } => commands::create::execute(name).await,
        Commands::Migrate { steps } => commands::migrate::execute(steps).await,
        Commands::Reset => commands::migrate::reset().await,
        Commands::Status => commands::migrate::status().await,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    tracing::debug!("Running {:?}", cli.command);
    run(cli.command).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subcommands() {
        let cli = Cli::try_parse_from(["rootscan-database", "migrate", "--steps", "1"]).unwrap();
        assert_eq!(cli.command, Commands::Migrate { steps: Some(1) });

        let cli = Cli::try_parse_from(["rootscan-database", "create", "-n", "rootscan_test"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Create {
                name: Some("rootscan_test".to_string())
            }
        );

        let cli = Cli::try_parse_from(["rootscan-database", "status"]).unwrap();
        assert_eq!(cli.command, Commands::Status);
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Cli::try_parse_from(["rootscan-database"]).is_err());
        assert!(Cli::try_parse_from(["rootscan-database", "migrate", "--steps", "all"]).is_err());
    }
}
