use std::time::Duration;

use uuid::Uuid;

use crate::error::{DeleteError, SendError};

/// A message handed to a consumer by a successful receive. Carries the fresh
/// receipt handle issued for this delivery attempt.
#[derive(Debug, Clone)]
pub struct ReceivedMessage {
    pub id: Uuid,
    pub body: String,
    pub receipt_handle: String,
}

/// Commands sent from IO threads to the single-threaded queue engine.
///
/// Each variant that expects a response includes a `tokio::sync::oneshot::Sender`
/// for the reply.
pub enum EngineCommand {
    Send {
        queue_name: String,
        body: String,
        reply: tokio::sync::oneshot::Sender<Result<Uuid, SendError>>,
    },
    /// `None` means nothing is eligible right now — the expected steady state
    /// of an empty or fully in-flight queue, not an error.
    Receive {
        queue_name: String,
        visibility_timeout: Duration,
        reply: tokio::sync::oneshot::Sender<Option<ReceivedMessage>>,
    },
    /// `Ok(false)` means no live message holds the handle: already deleted,
    /// never issued, or superseded by a later receive.
    Delete {
        queue_name: String,
        receipt_handle: String,
        reply: tokio::sync::oneshot::Sender<Result<bool, DeleteError>>,
    },
    Shutdown,
}
