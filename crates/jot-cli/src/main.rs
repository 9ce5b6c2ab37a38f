//! Jot CLI - capture notes to a remote notes service from the terminal
//!
//! Quick capture with minimal friction: `jot "my thought here"`.

mod cli;
mod commands;
mod error;

use clap::{CommandFactory, Parser};

use crate::cli::{Cli, Commands};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("jot=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let api_url = cli.api_url;

    match cli.command {
        Some(Commands::Add { content }) => commands::add::run_add(&content, api_url).await?,
        Some(Commands::List { limit, json }) => {
            commands::list::run_list(limit, json, api_url).await?;
        }
        Some(Commands::Delete { id }) => commands::delete::run_delete(&id, api_url).await?,
        Some(Commands::Completions { shell, output }) => {
            commands::completions::run_completions(shell, output.as_deref())?;
        }
        None => {
            // Quick capture mode: jot "my thought"
            if cli.note.is_empty() {
                Cli::command().print_help().map_err(CliError::Io)?;
                println!();
            } else {
                commands::add::run_add(&cli.note, api_url).await?;
            }
        }
    }

    Ok(())
}
