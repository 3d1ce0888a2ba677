//! arena-probe: connects to an arena game server as a player
//!
//! Logs every inbound frame and exits when the connection ends.
//!
//! Usage: arena-probe <ws-url> [player-number] [token]

use anyhow::{Context, Result, bail};
use arena_core::{FIELD_CENTER, PlayerNumber, PlayerSpecifications};
use arena_talk::{Channel, Lifecycle, TalkerConfig, Termination};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const PROTOCOL_VERSION: &str = "1.0";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        bail!("usage: {} <ws-url> [player-number] [token]", args[0]);
    }
    let url = &args[1];
    let specs = PlayerSpecifications {
        number: PlayerNumber::new(args.get(2).map_or("1", String::as_str)),
        initial_coords: FIELD_CENTER,
        token: args.get(3).cloned().unwrap_or_default(),
        protocol_version: PROTOCOL_VERSION.into(),
    };

    let config = TalkerConfig::from_env();
    info!(
        url = %url,
        number = %specs.number,
        format = ?config.frame_format,
        "Starting arena-probe"
    );

    let root = Lifecycle::new();
    let mut channel = Channel::new(config);
    let scope = channel
        .connect(url, &specs, &root)
        .await
        .with_context(|| format!("connecting to {}", url))?;

    let mut messages = channel.listen().context("inbound stream already taken")?;
    let mut interruptions = channel
        .listen_interruption()
        .context("interruption stream already taken")?;

    // Ctrl-C ends the root scope, which closes the connection locally
    let ctrl_c_root = root.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, hanging up");
            ctrl_c_root.cancel();
        }
    });

    let mut received = 0usize;
    while let Some(frame) = messages.recv().await {
        received += 1;
        info!(bytes = frame.len(), "{}", String::from_utf8_lossy(&frame));
    }

    let termination = scope.done().await;
    if let Ok(interruption) = interruptions.try_recv() {
        warn!(class = ?interruption.class(), "Server hung up: {}", interruption);
    }
    channel.close().await;

    info!(received, "Connection ended: {}", termination);
    if termination == Termination::Interrupted {
        bail!("connection interrupted");
    }
    Ok(())
}
