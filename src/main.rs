//! steam-partner - Submit user stats to the Steam partner web API.
//!
//! # Configuration
//!
//! Create a `config.yaml` file with your settings:
//!
//! ```yaml
//! partner:
//!   url: "http://partner.steam-api.com/"
//!   key: "your-publisher-key"
//!   app_id: 480
//! ```
//!
//! Override any value using environment variables with the `STEAM_PARTNER_` prefix:
//!
//! ```bash
//! export STEAM_PARTNER_PARTNER__KEY="your-publisher-key"
//! ```
//!
//! # Usage
//!
//! ```bash
//! steam-partner --config config.yaml set-stats --steam-id 76561197960287930 --stat ACH_WIN_ONE_GAME=1
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - Controls logging level (default: `info`)

use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{error, info};

use steam_partner::config::Config;
use steam_partner::partner::{AchievementMode, PartnerConfig, SteamPartner};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file.
    #[arg(short, long)]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Store achievement values of a user.
    SetStats {
        /// 64-bit Steam id of the user.
        #[arg(long)]
        steam_id: u64,

        /// Achievement to store, as `name=value`. Can be repeated.
        #[arg(long = "stat", value_parser = parse_stat, required = true)]
        stats: Vec<(String, u32)>,

        /// Send every achievement instead of only the first one.
        #[arg(long)]
        all: bool,
    },
}

/// Parses a `name=value` achievement argument. The name may itself contain `=`.
fn parse_stat(raw: &str) -> Result<(String, u32), String> {
    let (name, value) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected name=value, got `{}`", raw))?;

    if name.is_empty() {
        return Err(format!("missing achievement name in `{}`", raw));
    }

    let value = value
        .parse::<u32>()
        .map_err(|e| format!("invalid value in `{}`: {}", raw, e))?;

    Ok((name.to_owned(), value))
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = Config::load(&args.config).context("failed to load config file")?;
    let mut partner_config = PartnerConfig::from(&config.partner);

    match args.command {
        Command::SetStats {
            steam_id,
            stats,
            all,
        } => {
            if all {
                partner_config.achievement_mode = AchievementMode::All;
            }

            let partner = SteamPartner::new(partner_config, None)?;
            let result = partner
                .set_partner_user_stats_for_game(steam_id, &stats)
                .await?;

            info!("stats stored for {}: {}", steam_id, result);
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Put logger at info level by default
    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    info!("Starting steam-partner {}...", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
