//! `tryfi`: command-line client for TryFi pet trackers
//!
//! Subcommands:
//! - `status`: account summary (user, pets, collars, base stations)
//! - `pets` / `bases`: list pets or base stations
//! - `locate`: refresh and print one pet's location
//! - `led`, `led-color`, `lost-mode`: collar commands

use clap::{Parser, Subcommand};
use miette::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

/// Parse an on/off switch, accepting common spellings.
fn parse_switch(s: &str) -> Result<bool, String> {
    match s.to_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(format!("invalid switch '{}', expected on or off", s)),
    }
}

#[derive(Parser)]
#[command(name = "tryfi")]
#[command(about = "TryFi pet tracker client", long_about = None)]
struct Cli {
    /// Account email
    #[arg(long, env = "TRYFI_USERNAME", global = true)]
    username: Option<String>,

    /// Account password
    #[arg(long, env = "TRYFI_PASSWORD", global = true, hide_env_values = true)]
    password: Option<String>,

    /// API host, e.g. https://api.tryfi.com
    #[arg(long, env = "TRYFI_API_HOST", global = true)]
    api_host: Option<String>,

    /// Print records as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the account, its pets, collars and base stations
    Status,

    /// List pets with their collar state
    Pets,

    /// List base stations and the pets connected through them
    Bases,

    /// Refresh and show where a pet is
    Locate {
        /// Pet ID or name
        pet: String,
    },

    /// Switch a collar LED on or off
    Led {
        /// Pet ID or name
        pet: String,

        /// on or off
        #[arg(value_parser = parse_switch, action = clap::ArgAction::Set)]
        state: bool,
    },

    /// Change a collar LED colour
    LedColor {
        /// Pet ID or name
        pet: String,

        /// Colour code, see `pets` for the codes a collar supports
        code: i32,
    },

    /// Put a collar into or out of lost mode
    LostMode {
        /// Pet ID or name
        pet: String,

        /// on or off
        #[arg(value_parser = parse_switch, action = clap::ArgAction::Set)]
        state: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "tryfi=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let username = cli
        .username
        .ok_or_else(|| miette::miette!("missing --username (or TRYFI_USERNAME)"))?;
    let password = cli
        .password
        .ok_or_else(|| miette::miette!("missing --password (or TRYFI_PASSWORD)"))?;
    let config = match cli.api_host {
        Some(host) => tryfi::ClientConfig::with_host(host),
        None => tryfi::ClientConfig::default(),
    };

    let mut tryfi = tryfi::TryFi::connect(config, &username, &password)
        .await
        .map_err(|e| miette::miette!("{}", e))?;

    let output = commands::Output { json: cli.json };

    match cli.command {
        Commands::Status => commands::status(&tryfi, output),
        Commands::Pets => commands::pets(&tryfi, output),
        Commands::Bases => commands::bases(&tryfi, output),
        Commands::Locate { pet } => commands::locate(&mut tryfi, &pet, output).await,
        Commands::Led { pet, state } => commands::led(&mut tryfi, &pet, state, output).await,
        Commands::LedColor { pet, code } => {
            commands::led_color(&mut tryfi, &pet, code, output).await
        }
        Commands::LostMode { pet, state } => {
            commands::lost_mode(&mut tryfi, &pet, state, output).await
        }
    }
}
