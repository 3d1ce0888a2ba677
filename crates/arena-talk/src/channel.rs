//! Connection channel between a bot and the game server
//!
//! A [`Channel`] owns one transport connection from dial to teardown. Inbound
//! payloads are pushed by a background reader task into a bounded queue
//! ([`Channel::listen`]); a connection that ends without the local side
//! asking for it is reported once on [`Channel::listen_interruption`].
//!
//! Local intent always suppresses the interruption: [`Channel::close`],
//! cancelling the parent scope, cancelling the returned scope and dropping
//! the channel are all local. Anything else is an interruption, including a
//! normal closure frame the bot never asked for.

use crate::config::TalkerConfig;
use crate::error::{Result, TalkError};
use crate::lifecycle::{Lifecycle, Termination};
use crate::transport::{
    CloseClass, CloseCode, Dialer, FrameReader, FrameWriter, Handshake, Inbound,
};
use crate::ws::WsDialer;
use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex as StdMutex, PoisonError};
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Inbound payloads, in arrival order
pub type Messages = mpsc::Receiver<Vec<u8>>;

/// Yields at most one [`Interruption`] per connection
pub type Interruptions = mpsc::Receiver<Interruption>;

/// Frames longer than this are cut in debug logs
const PREVIEW_CHARS: usize = 200;

/// A connection ended without the local side asking for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interruption {
    pub code: CloseCode,
    pub reason: String,
}

impl Interruption {
    pub fn class(&self) -> CloseClass {
        self.code.class()
    }
}

impl fmt::Display for Interruption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.reason.is_empty() {
            write!(f, "{}", self.code)
        } else {
            write!(f, "{}: {}", self.code, self.reason)
        }
    }
}

/// Connection phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ChannelState {
    /// Never connected
    Idle = 0,
    Active = 1,
    /// Closing on behalf of the local side, waiting for the reader to stop
    ClosingLocal = 2,
    Terminated = 3,
}

impl From<u8> for ChannelState {
    fn from(value: u8) -> Self {
        match value {
            1 => ChannelState::Active,
            2 => ChannelState::ClosingLocal,
            3 => ChannelState::Terminated,
            _ => ChannelState::Idle,
        }
    }
}

/// State shared by the channel and its reader task
struct Link {
    /// Leaving `Active` is a compare-and-swap; whoever wins classifies the ending
    phase: AtomicU8,
    writer: Mutex<Option<Box<dyn FrameWriter>>>,
    lifecycle: Lifecycle,
    close_reason: String,
}

impl Link {
    fn state(&self) -> ChannelState {
        self.phase.load(Ordering::Acquire).into()
    }

    fn leave_active(&self, to: ChannelState) -> bool {
        self.phase
            .compare_exchange(
                ChannelState::Active as u8,
                to as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    /// Claim the ending for the local side and hang up.
    /// Returns false if the ending was already claimed.
    async fn release_local(&self) -> bool {
        if !self.leave_active(ChannelState::ClosingLocal) {
            return false;
        }

        let writer = self.writer.lock().await.take();
        if let Some(mut writer) = writer {
            if let Err(e) = writer.close(CloseCode::NORMAL, &self.close_reason).await {
                debug!("Close frame not delivered: {}", e);
            }
        }
        true
    }

    /// Classify a closure observed by the reader
    fn settle(&self, interruption: Interruption, interruptions: &mpsc::Sender<Interruption>) {
        if self.leave_active(ChannelState::Terminated) {
            warn!(
                code = %interruption.code,
                reason = %interruption.reason,
                "Connection interrupted"
            );
            if let Err(e) = interruptions.try_send(interruption) {
                debug!("Interruption not queued: {}", e);
            }
            self.lifecycle.finish(Termination::Interrupted);
        } else {
            info!("Connection closed by the player");
            self.lifecycle.finish(Termination::Closed);
        }
    }
}

/// One persistent duplex connection to the game server
pub struct Channel {
    config: TalkerConfig,
    dialer: Arc<dyn Dialer>,
    target: Option<String>,
    link: Option<Arc<Link>>,
    messages: Option<Messages>,
    interruptions: Option<Interruptions>,
    reader: StdMutex<Option<JoinHandle<()>>>,
}

impl Channel {
    /// Create a channel that dials over WebSocket
    pub fn new(config: TalkerConfig) -> Self {
        let dialer = Arc::new(WsDialer::new(&config));
        Self::with_dialer(config, dialer)
    }

    pub fn with_dialer(config: TalkerConfig, dialer: Arc<dyn Dialer>) -> Self {
        Self {
            config,
            dialer,
            target: None,
            link: None,
            messages: None,
            interruptions: None,
            reader: StdMutex::new(None),
        }
    }

    /// Open a connection to `target`, presenting `identity` in the handshake.
    ///
    /// The returned scope is a child of `parent` and ends when the connection
    /// does. Ending `parent` (or the returned scope) closes the connection
    /// without an interruption.
    pub async fn connect<I>(
        &mut self,
        target: &str,
        identity: &I,
        parent: &Lifecycle,
    ) -> Result<Lifecycle>
    where
        I: Serialize + ?Sized,
    {
        if self.state() == ChannelState::Active {
            return Err(TalkError::AlreadyConnected);
        }

        let handshake = Handshake::encode(&self.config.identity_header, identity)?;
        let (reader, writer) = self
            .dialer
            .dial(target, &handshake)
            .await
            .map_err(TalkError::Dial)?;

        let lifecycle = parent.child();
        let link = Arc::new(Link {
            phase: AtomicU8::new(ChannelState::Active as u8),
            writer: Mutex::new(Some(writer)),
            lifecycle: lifecycle.clone(),
            close_reason: self.config.close_reason.clone(),
        });

        let (messages_tx, messages_rx) = mpsc::channel(self.config.inbound_capacity());
        let (interruptions_tx, interruptions_rx) = mpsc::channel(1);

        let handle = tokio::spawn(read_loop(link.clone(), reader, messages_tx, interruptions_tx));
        *self.reader_slot() = Some(handle);

        info!(url = %target, "Connected to game server");
        self.target = Some(target.to_string());
        self.link = Some(link);
        self.messages = Some(messages_rx);
        self.interruptions = Some(interruptions_rx);
        Ok(lifecycle)
    }

    /// Write one payload. Concurrent sends are serialized and never interleave.
    ///
    /// A failed write does not close the channel; the reader reports the
    /// dying connection.
    pub async fn send(&self, payload: &[u8]) -> Result<()> {
        let link = match &self.link {
            Some(link) if link.state() == ChannelState::Active => link,
            _ => return Err(TalkError::NotConnected),
        };

        let mut guard = link.writer.lock().await;
        // The connection may have ended while waiting for the lock
        let writer = match guard.as_mut() {
            Some(writer) if link.state() == ChannelState::Active => writer,
            _ => return Err(TalkError::NotConnected),
        };

        debug!("[Bot→Server] len={} json={}", payload.len(), preview(payload));
        writer
            .write_frame(payload)
            .await
            .map_err(TalkError::TransportWrite)
    }

    /// Inbound payloads of the current connection. Handed out once per
    /// connection; the stream ends after the connection does.
    pub fn listen(&mut self) -> Option<Messages> {
        self.messages.take()
    }

    /// Interruption of the current connection, if any. Handed out once per
    /// connection.
    pub fn listen_interruption(&mut self) -> Option<Interruptions> {
        self.interruptions.take()
    }

    /// Hang up. Never produces an interruption; calling it again, or on a
    /// channel that is not connected, does nothing.
    pub async fn close(&self) {
        let Some(link) = &self.link else {
            return;
        };

        if link.release_local().await {
            info!("Closing connection");
            link.lifecycle.finish(Termination::Closed);
        }

        let handle = self.reader_slot().take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                warn!("Reader task failed: {}", e);
            }
        }
    }

    pub fn state(&self) -> ChannelState {
        self.link
            .as_ref()
            .map_or(ChannelState::Idle, |link| link.state())
    }

    /// Scope of the current connection
    pub fn lifecycle(&self) -> Option<&Lifecycle> {
        self.link.as_ref().map(|link| &link.lifecycle)
    }

    /// Last target passed to [`Channel::connect`]
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    fn reader_slot(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.reader.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Channel {
    fn drop(&mut self) {
        // The reader hangs up once it sees the scope end
        if let Some(link) = &self.link {
            if link.state() == ChannelState::Active {
                link.lifecycle.finish(Termination::Closed);
            }
        }
    }
}

impl fmt::Debug for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("target", &self.target)
            .field("state", &self.state())
            .finish()
    }
}

/// Background task: one per connection, runs until the connection ends
async fn read_loop(
    link: Arc<Link>,
    mut reader: Box<dyn FrameReader>,
    messages: mpsc::Sender<Vec<u8>>,
    interruptions: mpsc::Sender<Interruption>,
) {
    loop {
        let frame = tokio::select! {
            biased;
            _ = link.lifecycle.done() => {
                link.release_local().await;
                break;
            }
            frame = reader.read_frame() => frame,
        };

        match frame {
            Ok(Inbound::Message(data)) => {
                debug!("[Server→Bot] len={} json={}", data.len(), preview(&data));
                tokio::select! {
                    biased;
                    permit = messages.reserve() => match permit {
                        Ok(permit) => permit.send(data),
                        Err(_) => debug!("Nobody is listening, frame dropped"),
                    },
                    _ = link.lifecycle.done() => {
                        debug!("Frame dropped on local close");
                        link.release_local().await;
                        break;
                    }
                }
            }
            Ok(Inbound::Closed { code, reason }) => {
                link.settle(Interruption { code, reason }, &interruptions);
                break;
            }
            Err(e) => {
                link.settle(
                    Interruption {
                        code: CloseCode::ABNORMAL,
                        reason: e.to_string(),
                    },
                    &interruptions,
                );
                break;
            }
        }
    }

    link.phase
        .store(ChannelState::Terminated as u8, Ordering::Release);
    // Waits out a send in flight, which fails fast once the peer is gone
    drop(link.writer.lock().await.take());
    debug!("Reader task finished");
}

fn preview(data: &[u8]) -> String {
    String::from_utf8_lossy(data).chars().take(PREVIEW_CHARS).collect()
}
