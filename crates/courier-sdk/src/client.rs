use std::time::Duration;

use courier_proto::queue_client::QueueClient;
use courier_proto::{DeleteMessageRequest, ReceiveMessageRequest, SendMessageRequest};
use tonic::transport::Channel;
use tonic::Code;

use crate::error::{status_error, ConnectError, DeleteError, ReceiveError, SendError};

/// A message handed back by a successful receive. The receipt handle is valid
/// until the message is deleted or its visibility window lapses and another
/// receive supersedes it.
#[derive(Debug, Clone)]
pub struct ReceivedMessage {
    pub id: String,
    pub body: String,
    pub receipt_handle: String,
}

/// Options for connecting to a courier broker.
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    pub addr: String,
    pub timeout: Option<Duration>,
}

impl ConnectOptions {
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Idiomatic Rust client for the courier broker.
///
/// Wraps the queue operations: send, receive, delete. The client is `Clone`,
/// `Send`, and `Sync` — it can be shared across tasks.
#[derive(Debug, Clone)]
pub struct CourierClient {
    inner: QueueClient<Channel>,
}

impl CourierClient {
    /// Connect to a courier broker at the given address.
    ///
    /// The address should include the scheme, e.g. `http://localhost:50051`.
    pub async fn connect(addr: impl Into<String>) -> Result<Self, ConnectError> {
        let inner = QueueClient::connect(addr.into()).await?;
        Ok(Self { inner })
    }

    /// Connect to a courier broker with custom options.
    pub async fn connect_with_options(options: ConnectOptions) -> Result<Self, ConnectError> {
        let mut endpoint = Channel::from_shared(options.addr)
            .map_err(|e| ConnectError::InvalidArgument(e.to_string()))?;

        if let Some(timeout) = options.timeout {
            endpoint = endpoint.timeout(timeout);
        }

        let channel = endpoint.connect().await?;
        let inner = QueueClient::new(channel);
        Ok(Self { inner })
    }

    /// Send a message to a queue.
    ///
    /// Returns the broker-assigned message ID. An empty queue name selects
    /// the server's default queue.
    pub async fn send(&self, queue: &str, body: impl Into<String>) -> Result<String, SendError> {
        let response = self
            .inner
            .clone()
            .send_message(SendMessageRequest {
                message_body: body.into(),
                queue_name: queue.to_string(),
            })
            .await
            .map_err(status_error)?;

        Ok(response.into_inner().message_id)
    }

    /// Receive the first eligible message from a queue, hiding it for the
    /// server's visibility timeout.
    ///
    /// `Ok(None)` means nothing is eligible right now — the queue is empty or
    /// every message is inside its visibility window. Transport and server
    /// failures surface as [`ReceiveError`].
    pub async fn receive(&self, queue: &str) -> Result<Option<ReceivedMessage>, ReceiveError> {
        let result = self
            .inner
            .clone()
            .receive_message(ReceiveMessageRequest {
                queue_name: queue.to_string(),
            })
            .await;

        match result {
            Ok(response) => {
                let resp = response.into_inner();
                Ok(Some(ReceivedMessage {
                    id: resp.message_id,
                    body: resp.message_body,
                    receipt_handle: resp.receipt_handle,
                }))
            }
            Err(status) if status.code() == Code::NotFound => Ok(None),
            Err(status) => Err(status_error(status).into()),
        }
    }

    /// Delete a message using the receipt handle from its most recent receive.
    ///
    /// Returns `false` when no live message holds the handle: already
    /// deleted, never issued, or superseded by a later receive.
    pub async fn delete(&self, queue: &str, receipt_handle: &str) -> Result<bool, DeleteError> {
        let response = self
            .inner
            .clone()
            .delete_message(DeleteMessageRequest {
                receipt_handle: receipt_handle.to_string(),
                queue_name: queue.to_string(),
            })
            .await
            .map_err(status_error)?;

        Ok(response.into_inner().success)
    }
}
