mod args;
mod chat;

use anyhow::{Context, Result};
use args::{Cli, Commands};
use clap::Parser;
use colored::*;
use dialoguer::Input;
use pairlink::RoomId;
use pairlink::client::Handshake;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.connection.client_config();
    info!("Using signaling service at {}", config.signaling_url);
    let handshake = Handshake::from_config(config);

    let session = match cli.command {
        Commands::Create => {
            println!("{}", "Creating room...".cyan());
            handshake
                .start_offerer()
                .await
                .context("Failed to create room")?
        }
        Commands::Join { room_id } => {
            let room_id = match room_id {
                Some(id) => id,
                None => tokio::task::spawn_blocking(prompt_room_id)
                    .await
                    .context("Room ID prompt panicked")??,
            };
            let room_id = room_id.trim();
            if room_id.is_empty() {
                println!("Please enter a room ID to join.");
                return Ok(());
            }

            handshake
                .start_answerer(RoomId::from(room_id))
                .await
                .context("Failed to join room")?
        }
    };

    chat::run(session).await
}

fn prompt_room_id() -> Result<String> {
    let room_id: String = Input::new()
        .with_prompt("Room ID")
        .allow_empty(true)
        .interact_text()
        .context("Failed to read room ID")?;
    Ok(room_id)
}
