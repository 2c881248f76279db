mod commands;
mod location;
mod render;

use std::io::Stdout;

use clap::{Parser, Subcommand};
use nearby_core::{Coordinate, DiscoverySession, MemoryStorage};
use nearby_overpass::OverpassClient;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use crate::commands::{Command, HELP};
use crate::location::FixedLocation;
use crate::render::{TerminalList, TerminalMap};

#[derive(Debug, Parser)]
#[command(name = "nearby-cli")]
#[command(about = "Find places to eat and drink around a location")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search around a coordinate, then browse the results interactively
    Search {
        /// Latitude in decimal degrees (defaults to `NEARBY_LAT`)
        #[arg(long, allow_hyphen_values = true, requires = "lng")]
        lat: Option<f64>,

        /// Longitude in decimal degrees (defaults to `NEARBY_LNG`)
        #[arg(long, allow_hyphen_values = true, requires = "lat")]
        lng: Option<f64>,

        /// Print the results and exit instead of starting a session
        #[arg(long)]
        once: bool,
    },
    /// Print the effective configuration
    Config,
}

type CliSession = DiscoverySession<
    FixedLocation,
    OverpassClient,
    MemoryStorage,
    TerminalMap<Stdout>,
    TerminalList<Stdout>,
>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = nearby_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Search { lat, lng, once }) => {
            let origin = match (lat, lng) {
                (Some(lat), Some(lng)) => Some(Coordinate::new(lat, lng)?),
                _ => config.default_origin,
            };
            let client = OverpassClient::with_endpoint(
                &config.overpass_url,
                config.request_timeout_secs,
                &config.user_agent,
            )?;
            let mut session = DiscoverySession::new(
                FixedLocation::new(origin),
                client,
                MemoryStorage::default(),
                TerminalMap::new(std::io::stdout()),
                TerminalList::new(std::io::stdout()),
            );

            search(&mut session).await;
            if !once {
                run_interactive(&mut session).await?;
            }
            session.close();
        }
        Some(Commands::Config) => println!("{config:#?}"),
        None => println!("nearby-cli ready; try `nearby-cli search --lat <LAT> --lng <LNG>`"),
    }

    Ok(())
}

/// Runs one discovery pass and prints the resulting status. Failures are shown,
/// not propagated: every one of them is recoverable from the prompt.
async fn search(session: &mut CliSession) {
    if let Err(e) = session.discover().await {
        tracing::debug!(error = %e, "discovery did not complete");
    }
    println!("{}", session.status_line());
}

async fn run_interactive(session: &mut CliSession) -> anyhow::Result<()> {
    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(msg) => {
                println!("{msg}");
                continue;
            }
        };

        match command {
            Command::Select(id) => {
                if session.sync().store().get(&id).is_none() {
                    println!("no place with id {id} in the current results");
                } else {
                    session.select(&id);
                }
            }
            Command::Retry => {
                if let Err(e) = session.retry().await {
                    tracing::debug!(error = %e, "retry did not complete");
                }
                println!("{}", session.status_line());
            }
            Command::Refresh => search(session).await,
            Command::List => {
                for place in session.places() {
                    let marker = if place.is_selected() { '>' } else { ' ' };
                    println!("{marker} {} [id {}]", place.summary().name, place.id);
                }
                println!("{}", session.status_line());
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
        }
    }

    Ok(())
}
