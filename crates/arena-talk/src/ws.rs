//! WebSocket transport
//!
//! Used to reach the game server. The player identity travels as a header of
//! the opening handshake; every payload after that is one WebSocket message.

use crate::config::{FrameFormat, TalkerConfig};
use crate::error::TransportError;
use crate::transport::{CloseCode, Dialer, FrameReader, FrameWriter, Handshake, Inbound};
use async_trait::async_trait;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use std::borrow::Cow;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::{HeaderName, HeaderValue};
use tokio_tungstenite::tungstenite::protocol::{CloseFrame, WebSocketConfig};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{WebSocketStream, connect_async_with_config};
use tracing::debug;

/// Dials `ws://` targets
#[derive(Debug, Clone)]
pub struct WsDialer {
    format: FrameFormat,
    max_message_size: Option<usize>,
}

impl WsDialer {
    pub fn new(config: &TalkerConfig) -> Self {
        Self {
            format: config.frame_format,
            max_message_size: config.max_message_size,
        }
    }
}

impl Default for WsDialer {
    fn default() -> Self {
        Self::new(&TalkerConfig::default())
    }
}

#[async_trait]
impl Dialer for WsDialer {
    async fn dial(
        &self,
        target: &str,
        handshake: &Handshake,
    ) -> Result<(Box<dyn FrameReader>, Box<dyn FrameWriter>), TransportError> {
        let mut request = target.into_client_request()?;

        let name = HeaderName::from_bytes(handshake.header.as_bytes())
            .map_err(|e| TransportError::Other(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::from_str(&handshake.value)
            .map_err(|e| TransportError::Other(format!("Invalid header value: {}", e)))?;
        request.headers_mut().insert(name, value);

        let mut ws_config = WebSocketConfig::default();
        ws_config.max_message_size = self.max_message_size;

        let (stream, response) = connect_async_with_config(request, Some(ws_config), false).await?;
        debug!(status = %response.status(), "WebSocket handshake complete");

        let (reader, writer) = split(stream, self.format);
        Ok((Box::new(reader), Box::new(writer)))
    }
}

/// Split an established WebSocket into transport halves
pub fn split<S>(stream: WebSocketStream<S>, format: FrameFormat) -> (WsReader<S>, WsWriter<S>)
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let (sink, stream) = stream.split();
    (WsReader(stream), WsWriter { sink, format })
}

/// WebSocket read half
pub struct WsReader<S>(SplitStream<WebSocketStream<S>>);

#[async_trait]
impl<S> FrameReader for WsReader<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn read_frame(&mut self) -> Result<Inbound, TransportError> {
        loop {
            match self.0.next().await {
                Some(Ok(Message::Text(text))) => return Ok(Inbound::Message(text.into_bytes())),
                Some(Ok(Message::Binary(data))) => return Ok(Inbound::Message(data)),
                Some(Ok(Message::Close(frame))) => {
                    let (code, reason) = match frame {
                        Some(frame) => (CloseCode(u16::from(frame.code)), frame.reason.into_owned()),
                        None => (CloseCode::NO_STATUS, String::new()),
                    };
                    return Ok(Inbound::Closed { code, reason });
                }
                // Pings are answered by tungstenite itself
                Some(Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_))) => continue,
                Some(Err(e)) => return Err(e.into()),
                None => return Err(TransportError::Closed),
            }
        }
    }
}

/// WebSocket write half
pub struct WsWriter<S> {
    sink: SplitSink<WebSocketStream<S>, Message>,
    format: FrameFormat,
}

#[async_trait]
impl<S> FrameWriter for WsWriter<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn write_frame(&mut self, data: &[u8]) -> Result<(), TransportError> {
        let message = match self.format {
            FrameFormat::Text => {
                let text = String::from_utf8(data.to_vec())
                    .map_err(|e| TransportError::InvalidPayload(e.to_string()))?;
                Message::Text(text)
            }
            FrameFormat::Binary => Message::Binary(data.to_vec()),
        };
        self.sink.send(message).await?;
        Ok(())
    }

    async fn close(&mut self, code: CloseCode, reason: &str) -> Result<(), TransportError> {
        let frame = CloseFrame {
            code: code.0.into(),
            reason: Cow::Owned(reason.to_string()),
        };
        self.sink.send(Message::Close(Some(frame))).await?;
        Ok(())
    }
}
