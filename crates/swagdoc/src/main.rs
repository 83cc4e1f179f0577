//! swagdoc CLI - serve Swagger UI for a directory of API definitions.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod settings;

#[derive(Parser)]
#[command(name = "swagdoc")]
#[command(about = "Serve Swagger UI for a directory of API definitions")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to swagdoc.toml config file
    #[arg(short, long, default_value = "swagdoc.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a docs directory with a sample definition and config file
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Serve Swagger UI over HTTP
    Serve(commands::serve::ServeArgs),

    /// List the API definitions the UI would offer
    List {
        /// Documentation directory (defaults to config or "docs")
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes).await?;
        }
        Commands::Serve(args) => {
            commands::serve::run(&cli.config, args).await?;
        }
        Commands::List { dir } => {
            commands::list::run(&cli.config, dir)?;
        }
    }

    Ok(())
}
