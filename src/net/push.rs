//! Push-channel client: a shared websocket carrying task change events.
//!
//! The connection is established once per process. Inbound events surface
//! on a receiver the app loop polls; outbound broadcasts go through a
//! cloneable [`PushHandle`] injected into the gesture handlers. `shutdown`
//! aborts both pump tasks exactly once, so a restarted UI loop can never
//! double-handle events.

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use crate::net::types::PushEvent;

#[derive(Debug, thiserror::Error)]
pub enum PushError {
    #[error("websocket connect failed: {0}")]
    Connect(Box<tokio_tungstenite::tungstenite::Error>),
}

/// Outbound side of the push channel.
#[derive(Clone, Debug)]
pub struct PushHandle {
    outbound: mpsc::UnboundedSender<PushEvent>,
}

impl PushHandle {
    pub(crate) fn new(outbound: mpsc::UnboundedSender<PushEvent>) -> Self {
        Self { outbound }
    }

    /// Queue an event for broadcast to other connected clients.
    pub fn broadcast(&self, event: PushEvent) {
        if self.outbound.send(event).is_err() {
            tracing::warn!("push channel closed; broadcast dropped");
        }
    }
}

/// A live push-channel connection and its two pump tasks.
pub struct PushClient {
    outbound: mpsc::UnboundedSender<PushEvent>,
    inbound: mpsc::UnboundedReceiver<PushEvent>,
    reader: JoinHandle<()>,
    writer: JoinHandle<()>,
}

impl PushClient {
    /// Connect to the push channel at `url` and start the pump tasks.
    ///
    /// # Errors
    ///
    /// Returns an error if the websocket handshake fails.
    pub async fn connect(url: &str) -> Result<Self, PushError> {
        let (stream, _) = connect_async(url)
            .await
            .map_err(|error| PushError::Connect(Box::new(error)))?;
        let (mut sink, mut source) = stream.split();

        let (outbound, mut outbound_rx) = mpsc::unbounded_channel::<PushEvent>();
        let (inbound_tx, inbound) = mpsc::unbounded_channel::<PushEvent>();

        let writer = tokio::spawn(async move {
            while let Some(event) = outbound_rx.recv().await {
                let Ok(json) = serde_json::to_string(&event) else {
                    continue;
                };
                if sink.send(Message::Text(json.into())).await.is_err() {
                    break;
                }
            }
        });

        let reader = tokio::spawn(async move {
            while let Some(message) = source.next().await {
                match message {
                    Ok(Message::Text(text)) => match serde_json::from_str::<PushEvent>(&text) {
                        Ok(event) => {
                            if inbound_tx.send(event).is_err() {
                                break;
                            }
                        }
                        Err(error) => {
                            tracing::warn!(%error, "ignoring malformed push message");
                        }
                    },
                    Ok(Message::Close(_)) => break,
                    Ok(_) => {}
                    Err(error) => {
                        tracing::warn!(%error, "push channel receive error");
                        break;
                    }
                }
            }
        });

        Ok(Self { outbound, inbound, reader, writer })
    }

    /// Handle for broadcasting; cheap to clone and hand to the view layer.
    #[must_use]
    pub fn handle(&self) -> PushHandle {
        PushHandle::new(self.outbound.clone())
    }

    /// Next inbound event, or `None` once the connection is gone.
    pub async fn recv(&mut self) -> Option<PushEvent> {
        self.inbound.recv().await
    }

    /// Tear the connection down and stop both pumps.
    pub fn shutdown(self) {
        self.reader.abort();
        self.writer.abort();
    }
}
