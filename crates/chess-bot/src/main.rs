//! Chess Bot - plays chess games over a line-based chat transport.
//!
//! Reads `<chat> <user> <text>` lines from stdin, runs every chat's game
//! through a shared session manager and writes replies to stdout. Logs go to
//! stderr.

mod command;
mod config;
mod handler;
mod input;
mod render;

use chess_session::SessionManager;
use clap::Parser;
use config::{BotConfig, OutputFormat};
use handler::Handler;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tokio::signal;

/// Chess Bot - multi-game chess over chat messages.
#[derive(Parser)]
#[command(name = "chess-bot")]
#[command(about = "Plays chess games from chat messages read on stdin")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(long, default_value = "chess-bot.toml")]
    config: PathBuf,

    /// Override the configured output format
    #[arg(long, value_enum)]
    output: Option<OutputFormat>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut config = BotConfig::load(&args.config)?;
    if let Some(output) = args.output {
        config.output = output;
    }

    tracing_subscriber::fmt()
        .with_max_level(config.level()?)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting chess-bot");
    tracing::info!("Config: {:?}", args.config);
    tracing::info!("Output: {:?}", config.output);
    tracing::info!("Self-play allowed: {}", config.session.allow_self_play);

    let handler = Handler::new(SessionManager::new(config.session));
    let mut lines = input::spawn_line_reader(std::io::BufReader::new(std::io::stdin()));
    let mut stdout = tokio::io::stdout();

    loop {
        let line = tokio::select! {
            line = lines.recv() => line.transpose()?,
            _ = signal::ctrl_c() => {
                tracing::info!("Shutdown signal received");
                break;
            }
        };
        let Some(line) = line else {
            tracing::info!("End of input");
            break;
        };

        let Some(message) = command::parse_line(&line) else {
            continue;
        };
        tracing::debug!(
            "Message in {} from {}: {:?}",
            message.chat,
            message.user,
            message.command
        );

        if let Some(reply) = handler.handle(&message) {
            let mut out = render::render(&reply, config.output)?;
            out.push('\n');
            stdout.write_all(out.as_bytes()).await?;
            stdout.flush().await?;
        }
    }

    tracing::info!("{} game(s) still open at exit", handler.manager().len());
    Ok(())
}
