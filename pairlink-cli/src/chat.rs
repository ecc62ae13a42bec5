use anyhow::{Context, Result};
use colored::*;
use pairlink::client::{PeerSession, SessionEvent};
use pairlink::model::{Status, StatusColor};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

pub fn print_status(status: &Status) {
    let dot = match status.color {
        StatusColor::Green => "●".green(),
        StatusColor::Red => "●".red(),
        StatusColor::Gray => "●".bright_black(),
    };
    println!("{} {}", dot, status.message);
}

/// Relay session events to the terminal and stdin lines to the peer until
/// either side hangs up.
pub async fn run(mut session: PeerSession) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut channel_open = false;

    loop {
        tokio::select! {
            event = session.next_event() => match event {
                Some(SessionEvent::Status(status)) => print_status(&status),
                Some(SessionEvent::StateChanged(state)) => debug!("Connection state: {:?}", state),
                Some(SessionEvent::Connected) => {}
                Some(SessionEvent::ChannelOpen) => channel_open = true,
                Some(SessionEvent::Message(text)) => {
                    println!("{} {}", "Peer:".cyan().bold(), text);
                }
                Some(SessionEvent::Failed(reason)) => {
                    debug!("Handshake failed: {}", reason);
                    break;
                }
                Some(SessionEvent::ChannelClosed) => {
                    print_status(&Status::gray("Peer left the chat."));
                    break;
                }
                None => break,
            },

            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    break;
                };
                let text = line.trim_end();
                if text.is_empty() {
                    continue;
                }
                if !channel_open {
                    print_status(&Status::gray("Not connected yet."));
                    continue;
                }
                match session.send(text).await {
                    Ok(()) => println!("{} {}", "Me:".green().bold(), text),
                    Err(e) => print_status(&Status::red(format!("Failed to send: {}", e))),
                }
            }

            _ = tokio::signal::ctrl_c() => break,
        }
    }

    session.close().await.context("Failed to close session")
}
