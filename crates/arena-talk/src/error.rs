//! Error types for arena-talk

use thiserror::Error;
use tokio_tungstenite::tungstenite;

/// Result type for channel operations
pub type Result<T> = std::result::Result<T, TalkError>;

/// Channel error types
#[derive(Debug, Error)]
pub enum TalkError {
    /// Identity metadata can not be turned into a handshake header.
    /// Nothing was sent over the network.
    #[error("Handshake encoding error: {0}")]
    HandshakeEncoding(String),

    /// The transport could not be established
    #[error("Dial error: {0}")]
    Dial(#[source] TransportError),

    /// The channel has no active connection
    #[error("Not connected")]
    NotConnected,

    /// The channel already has an active connection
    #[error("Already connected")]
    AlreadyConnected,

    /// A write failed on an active connection; the connection is likely dying
    #[error("Transport write error: {0}")]
    TransportWrite(#[source] TransportError),
}

/// Failures reported by a transport
#[derive(Debug, Error)]
pub enum TransportError {
    /// WebSocket protocol or I/O failure
    #[error("WebSocket error: {0}")]
    WebSocket(#[source] Box<tungstenite::Error>),

    /// The peer is gone
    #[error("Connection closed")]
    Closed,

    /// The payload can not be carried by this transport
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Any other transport failure
    #[error("Transport error: {0}")]
    Other(String),
}

impl From<tungstenite::Error> for TransportError {
    fn from(err: tungstenite::Error) -> Self {
        TransportError::WebSocket(Box::new(err))
    }
}
