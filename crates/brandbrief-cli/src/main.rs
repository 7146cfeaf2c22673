use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod backend;
mod config;
mod generate_cmd;
mod server;
mod wizard_cmd;

#[derive(Parser)]
#[command(name = "brandbrief")]
#[command(
    about = "Brandbrief - one structured business profile, compiled into prompts for every content module",
    long_about = None
)]
struct Cli {
    /// Base directory for config and data (defaults to the platform dirs)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the profile and generation HTTP API
    Serve {
        /// Bind address, e.g. 127.0.0.1:8787
        #[arg(long)]
        bind: Option<String>,
        /// Accept this single bearer token for the local user instead of
        /// loading tokens.json
        #[arg(long)]
        auth_token: Option<String>,
        /// Generation model override
        #[arg(long)]
        model: Option<String>,
    },
    /// Run the interactive profile intake wizard
    Wizard,
    /// Run one content module against the saved profile
    Generate {
        /// Module identifier, e.g. reply-assistant
        #[arg(long)]
        module: String,
        /// Module input as a JSON object, e.g. '{"customerMessage": "..."}'
        #[arg(long)]
        input: Option<String>,
        /// Generation model override
        #[arg(long)]
        model: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let base_dir = cli.data_dir.as_deref();

    match cli.command {
        Commands::Serve {
            bind,
            auth_token,
            model,
        } => {
            server::run(
                bind.as_deref(),
                base_dir,
                auth_token.as_deref(),
                model.as_deref(),
            )
            .await
        }
        Commands::Wizard => wizard_cmd::run(base_dir).await,
        Commands::Generate {
            module,
            input,
            model,
        } => generate_cmd::run(base_dir, &module, input.as_deref(), model.as_deref()).await,
    }
}
