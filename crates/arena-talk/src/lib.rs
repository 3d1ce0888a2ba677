//! # arena-talk
//!
//! Connection channel between a bot and the arena game server.
//!
//! This crate provides:
//! - [`Channel`]: one persistent duplex connection from dial to teardown
//! - [`Lifecycle`]: cancellable scopes telling when a connection is dead
//! - Transport abstractions ([`Dialer`], [`FrameReader`], [`FrameWriter`])
//! - The WebSocket transport used to reach the game server

pub mod channel;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod transport;
pub mod ws;

#[cfg(test)]
mod testing;

pub use channel::{Channel, ChannelState, Interruption, Interruptions, Messages};
pub use config::{FrameFormat, TalkerConfig};
pub use error::{Result, TalkError, TransportError};
pub use lifecycle::{Lifecycle, Termination};
pub use transport::{CloseClass, CloseCode, Dialer, FrameReader, FrameWriter, Handshake, Inbound};
pub use ws::WsDialer;
