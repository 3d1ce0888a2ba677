//! Transport abstractions for the connection channel
//!
//! A transport is dialed once per connection and split into a reader half,
//! owned by the channel's background task, and a writer half, guarded by the
//! channel's write lock. Payloads are opaque bytes in both directions.

use crate::error::{TalkError, TransportError};
use async_trait::async_trait;
use serde::Serialize;
use std::fmt;

/// Something read from the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// One complete data frame
    Message(Vec<u8>),
    /// The peer sent a closure frame
    Closed { code: CloseCode, reason: String },
}

/// Status code carried by a closure frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CloseCode(pub u16);

impl CloseCode {
    pub const NORMAL: CloseCode = CloseCode(1000);
    pub const GOING_AWAY: CloseCode = CloseCode(1001);
    /// The close frame carried no status
    pub const NO_STATUS: CloseCode = CloseCode(1005);
    /// The connection dropped without a close frame
    pub const ABNORMAL: CloseCode = CloseCode(1006);

    pub fn class(self) -> CloseClass {
        match self {
            CloseCode::NORMAL => CloseClass::Normal,
            CloseCode::GOING_AWAY => CloseClass::GoingAway,
            CloseCode::ABNORMAL | CloseCode::NO_STATUS => CloseClass::Abnormal,
            _ => CloseClass::Other,
        }
    }
}

impl fmt::Display for CloseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Broad kind of a remote closure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CloseClass {
    Normal,
    GoingAway,
    Abnormal,
    Other,
}

/// Identity metadata encoded as a handshake header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handshake {
    /// Header name
    pub header: String,
    /// JSON-encoded identity
    pub value: String,
}

impl Handshake {
    /// Encode `identity` as JSON under `header`.
    ///
    /// Fails with [`TalkError::HandshakeEncoding`] when the identity does not
    /// serialize or the result is not a valid header value.
    pub fn encode<I>(header: &str, identity: &I) -> Result<Self, TalkError>
    where
        I: Serialize + ?Sized,
    {
        if header.is_empty() || !header.bytes().all(is_token_byte) {
            return Err(TalkError::HandshakeEncoding(format!(
                "invalid header name: {:?}",
                header
            )));
        }

        let value = serde_json::to_string(identity)
            .map_err(|e| TalkError::HandshakeEncoding(e.to_string()))?;

        if let Some(c) = value.chars().find(|c| !is_header_value_char(*c)) {
            return Err(TalkError::HandshakeEncoding(format!(
                "identity contains {:?}, which is not allowed in a header value",
                c
            )));
        }

        Ok(Self {
            header: header.to_string(),
            value,
        })
    }
}

fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}

fn is_header_value_char(c: char) -> bool {
    c == '\t' || (' '..='~').contains(&c)
}

/// Reader half of a transport
#[async_trait]
pub trait FrameReader: Send {
    /// Read the next frame. An error means the connection is unusable.
    async fn read_frame(&mut self) -> Result<Inbound, TransportError>;
}

/// Writer half of a transport
#[async_trait]
pub trait FrameWriter: Send {
    /// Write one complete frame
    async fn write_frame(&mut self, data: &[u8]) -> Result<(), TransportError>;

    /// Send a closure frame; no frames may be written afterwards
    async fn close(&mut self, code: CloseCode, reason: &str) -> Result<(), TransportError>;
}

/// Opens transports
#[async_trait]
pub trait Dialer: Send + Sync {
    /// Connect to `target`, presenting `handshake`, and split the connection
    async fn dial(
        &self,
        target: &str,
        handshake: &Handshake,
    ) -> Result<(Box<dyn FrameReader>, Box<dyn FrameWriter>), TransportError>;
}
