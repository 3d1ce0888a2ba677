//! In-memory transport for channel tests

use crate::error::TransportError;
use crate::transport::{CloseCode, Dialer, FrameReader, FrameWriter, Handshake, Inbound};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

type InboundTx = mpsc::UnboundedSender<Result<Inbound, TransportError>>;
type WeakInboundTx = mpsc::WeakUnboundedSender<Result<Inbound, TransportError>>;

/// What the channel wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Written {
    Frame(Vec<u8>),
    Close(CloseCode, String),
}

/// Remote end of an in-memory connection
pub(crate) struct Peer {
    inbound: Option<InboundTx>,
    pub written: mpsc::UnboundedReceiver<Written>,
    /// Every byte written, in order, chunk by chunk
    pub wire: Arc<Mutex<Vec<u8>>>,
    pub handshake: Arc<Mutex<Option<(String, Handshake)>>>,
}

impl Peer {
    pub fn push(&self, data: &[u8]) {
        self.push_raw(Ok(Inbound::Message(data.to_vec())));
    }

    pub fn close(&self, code: CloseCode, reason: &str) {
        self.push_raw(Ok(Inbound::Closed {
            code,
            reason: reason.to_string(),
        }));
    }

    pub fn fail(&self, reason: &str) {
        self.push_raw(Err(TransportError::Other(reason.to_string())));
    }

    /// Drop the connection without a closure frame
    pub fn drop_connection(&mut self) {
        self.inbound = None;
    }

    fn push_raw(&self, item: Result<Inbound, TransportError>) {
        if let Some(inbound) = &self.inbound {
            let _ = inbound.send(item);
        }
    }
}

/// Dialer handing out a single prepared in-memory connection
pub(crate) struct MemoryDialer {
    connection: Mutex<Option<(MemoryReader, MemoryWriter)>>,
    handshake: Arc<Mutex<Option<(String, Handshake)>>>,
}

impl MemoryDialer {
    /// A dialer whose connection acknowledges close frames like a real peer
    pub fn new() -> (Self, Peer) {
        Self::build(true)
    }

    /// A dialer whose peer ignores close frames
    pub fn silent() -> (Self, Peer) {
        Self::build(false)
    }

    /// A dialer that never connects
    pub fn refusing() -> Self {
        Self {
            connection: Mutex::new(None),
            handshake: Arc::new(Mutex::new(None)),
        }
    }

    fn build(acknowledge_close: bool) -> (Self, Peer) {
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
        let (written_tx, written_rx) = mpsc::unbounded_channel();
        let wire = Arc::new(Mutex::new(Vec::new()));
        let handshake = Arc::new(Mutex::new(None));

        let reader = MemoryReader { inbound: inbound_rx };
        let writer = MemoryWriter {
            written: written_tx,
            wire: wire.clone(),
            ack: acknowledge_close.then(|| inbound_tx.downgrade()),
        };

        let dialer = Self {
            connection: Mutex::new(Some((reader, writer))),
            handshake: handshake.clone(),
        };
        let peer = Peer {
            inbound: Some(inbound_tx),
            written: written_rx,
            wire,
            handshake,
        };
        (dialer, peer)
    }
}

#[async_trait]
impl Dialer for MemoryDialer {
    async fn dial(
        &self,
        target: &str,
        handshake: &Handshake,
    ) -> Result<(Box<dyn FrameReader>, Box<dyn FrameWriter>), TransportError> {
        let (reader, writer) = self
            .connection
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| TransportError::Other("connection refused".into()))?;
        *self.handshake.lock().unwrap() = Some((target.to_string(), handshake.clone()));
        Ok((Box::new(reader), Box::new(writer)))
    }
}

struct MemoryReader {
    inbound: mpsc::UnboundedReceiver<Result<Inbound, TransportError>>,
}

#[async_trait]
impl FrameReader for MemoryReader {
    async fn read_frame(&mut self) -> Result<Inbound, TransportError> {
        self.inbound
            .recv()
            .await
            .unwrap_or(Err(TransportError::Closed))
    }
}

struct MemoryWriter {
    written: mpsc::UnboundedSender<Written>,
    wire: Arc<Mutex<Vec<u8>>>,
    // Weak so that dropping the peer still ends the stream
    ack: Option<WeakInboundTx>,
}

#[async_trait]
impl FrameWriter for MemoryWriter {
    async fn write_frame(&mut self, data: &[u8]) -> Result<(), TransportError> {
        // Yield between chunks so unserialized writers would interleave
        for chunk in data.chunks(8) {
            self.wire.lock().unwrap().extend_from_slice(chunk);
            tokio::task::yield_now().await;
        }
        self.written
            .send(Written::Frame(data.to_vec()))
            .map_err(|_| TransportError::Closed)
    }

    async fn close(&mut self, code: CloseCode, reason: &str) -> Result<(), TransportError> {
        let _ = self.written.send(Written::Close(code, reason.to_string()));
        if let Some(ack) = self.ack.take().and_then(|ack| ack.upgrade()) {
            let _ = ack.send(Ok(Inbound::Closed {
                code,
                reason: reason.to_string(),
            }));
        }
        Ok(())
    }
}
