//! healthgate - inspect a running healthgate controller

mod api;
mod commands;
mod output;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;

#[derive(Parser)]
#[command(name = "healthgate")]
#[command(author, version, about = "Inspect the healthgate controller's status surface", long_about = None)]
struct Cli {
    /// Controller status server URL
    #[arg(short, long, env = "HEALTHGATE_SERVER", default_value = "http://localhost:8080")]
    server: String,

    /// Output format (table, json, yaml)
    #[arg(short, long, default_value = "table")]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the control loop's current status
    Status,
    /// Show the active threshold policy
    Thresholds,
    /// Check controller liveness and readiness
    Probe,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        generate_completions(shell);
        return Ok(());
    }

    let api_client = api::ApiClient::new(&cli.server)?;

    let result = match cli.command {
        Commands::Status => commands::status::handle_status_command(&api_client, &cli.output).await,
        Commands::Thresholds => {
            commands::thresholds::handle_thresholds_command(&api_client, &cli.output).await
        }
        Commands::Probe => commands::probe::handle_probe_command(&api_client, &cli.output).await,
        Commands::Completions { .. } => Ok(()),
    };

    if let Err(e) = result {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
    Ok(())
}
