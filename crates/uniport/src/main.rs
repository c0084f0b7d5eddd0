// SPDX-FileCopyrightText: 2026 Uniport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Uniport - auto-login agent for a university portal.
//!
//! This binary is the configuration surface: it stores, inspects, and clears
//! the encrypted credential set the login agent consumes.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use uniport_config::{ConfigError, UniportConfig};

mod credentials;
mod status;

/// Uniport - auto-login agent for a university portal.
#[derive(Parser, Debug)]
#[command(name = "uniport", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the XDG hierarchy.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage the stored portal credentials.
    Credentials {
        #[command(subcommand)]
        action: CredentialsAction,
    },
    /// Show vault and storage status.
    Status {
        /// Output structured JSON for scripting.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
enum CredentialsAction {
    /// Prompt for and encrypt a new credential pair.
    Set,
    /// Show the stored credentials with masked previews.
    Show,
    /// Remove the stored credentials.
    Clear,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            uniport_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.agent.log_level);

    let result = match cli.command {
        Some(Commands::Credentials { action }) => match action {
            CredentialsAction::Set => credentials::run_set(&config).await,
            CredentialsAction::Show => credentials::run_show(&config).await,
            CredentialsAction::Clear => credentials::run_clear(&config).await,
        },
        Some(Commands::Status { json }) => status::run_status(&config, json).await,
        None => {
            println!("uniport: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("uniport: {e}");
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<UniportConfig, Vec<ConfigError>> {
    match path {
        Some(path) => uniport_config::load_and_validate_path(path),
        None => uniport_config::load_and_validate(),
    }
}

fn init_tracing(level: &str) {
    use tracing_subscriber::EnvFilter;

    // RUST_LOG wins over the configured level when set.
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
