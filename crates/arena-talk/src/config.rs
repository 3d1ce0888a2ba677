//! Channel configuration

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

/// How outbound payloads are framed on the wire
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameFormat {
    /// UTF-8 text frames (what the game server speaks)
    #[default]
    Text,
    /// Raw binary frames
    Binary,
}

impl FromStr for FrameFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(FrameFormat::Text),
            "binary" => Ok(FrameFormat::Binary),
            other => Err(format!("unknown frame format: {}", other)),
        }
    }
}

/// Configuration for a [`Channel`](crate::Channel)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TalkerConfig {
    /// Handshake header carrying the player identity
    pub identity_header: String,
    /// Inbound frames buffered while the consumer is busy (at least 1)
    pub inbound_buffer: usize,
    /// Framing for outbound payloads
    pub frame_format: FrameFormat,
    /// Reason sent in the close frame when the bot hangs up
    pub close_reason: String,
    /// Largest inbound message accepted, in bytes
    pub max_message_size: Option<usize>,
}

impl Default for TalkerConfig {
    fn default() -> Self {
        Self {
            identity_header: "X-Player-Specs".into(),
            inbound_buffer: 16,
            frame_format: FrameFormat::Text,
            close_reason: "bye".into(),
            max_message_size: Some(64 * 1024 * 1024),
        }
    }
}

impl TalkerConfig {
    /// Defaults overlaid with `ARENA_INBOUND_BUFFER`, `ARENA_FRAME_FORMAT`
    /// and `ARENA_MAX_MESSAGE_SIZE` when they are set
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(value) = lookup("ARENA_INBOUND_BUFFER") {
            match value.trim().parse() {
                Ok(buffer) => self.inbound_buffer = buffer,
                Err(e) => warn!("Ignoring ARENA_INBOUND_BUFFER={}: {}", value, e),
            }
        }
        if let Some(value) = lookup("ARENA_FRAME_FORMAT") {
            match value.parse() {
                Ok(format) => self.frame_format = format,
                Err(e) => warn!("Ignoring ARENA_FRAME_FORMAT: {}", e),
            }
        }
        if let Some(value) = lookup("ARENA_MAX_MESSAGE_SIZE") {
            match value.trim().parse() {
                Ok(0) => self.max_message_size = None,
                Ok(size) => self.max_message_size = Some(size),
                Err(e) => warn!("Ignoring ARENA_MAX_MESSAGE_SIZE={}: {}", value, e),
            }
        }
        self
    }

    /// Capacity of the inbound message queue
    pub fn inbound_capacity(&self) -> usize {
        self.inbound_buffer.max(1)
    }
}
