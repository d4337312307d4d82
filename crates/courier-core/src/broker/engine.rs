use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crossbeam_channel::Receiver;
use tracing::{debug, info};
use uuid::Uuid;

use crate::broker::command::{EngineCommand, ReceivedMessage};
use crate::broker::metrics::Metrics;
use crate::error::{DeleteError, SendError};
use crate::message::Message;
use crate::queue::QueueState;
use crate::storage::Storage;

/// Current time as epoch nanoseconds.
fn now_ns() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64
}

/// Single-threaded queue engine. Owns every live message and processes
/// commands from IO threads sequentially, so each operation runs in its own
/// exclusive critical section: no caller can observe a message between
/// another receive's eligibility check and its deadline update, and a delete
/// either matches a handle exactly once or not at all.
pub struct Engine {
    storage: Arc<dyn Storage>,
    inbound: Receiver<EngineCommand>,
    running: bool,
    /// Queues keyed by name, each an insertion-ordered live set.
    queues: HashMap<String, QueueState>,
    metrics: Metrics,
}

impl Engine {
    pub fn new(storage: Arc<dyn Storage>, inbound: Receiver<EngineCommand>) -> Self {
        Self {
            storage,
            inbound,
            running: true,
            queues: HashMap::new(),
            metrics: Metrics::new(),
        }
    }

    /// Run the engine event loop. This blocks the current thread until a
    /// `Shutdown` command is received or the inbound channel is disconnected.
    ///
    /// Expired visibility windows need no timer: eligibility is recomputed
    /// from the clock on every receive scan, so an in-flight message whose
    /// deadline has passed simply becomes matchable again.
    pub fn run(&mut self) {
        info!("engine started");

        while self.running {
            match self.inbound.recv() {
                Ok(cmd) => {
                    self.handle_command(cmd);
                    self.record_gauges();
                }
                Err(_) => {
                    info!("inbound channel disconnected, shutting down");
                    self.running = false;
                }
            }
        }

        info!("engine stopped");
    }

    fn handle_command(&mut self, cmd: EngineCommand) {
        match cmd {
            EngineCommand::Send {
                queue_name,
                body,
                reply,
            } => {
                debug!(queue = %queue_name, "send command received");
                let result = self.handle_send(queue_name, body);
                let _ = reply.send(result);
            }
            EngineCommand::Receive {
                queue_name,
                visibility_timeout,
                reply,
            } => {
                debug!(queue = %queue_name, timeout_ms = visibility_timeout.as_millis() as u64, "receive command received");
                let result = self.handle_receive(&queue_name, visibility_timeout);
                let _ = reply.send(result);
            }
            EngineCommand::Delete {
                queue_name,
                receipt_handle,
                reply,
            } => {
                debug!(queue = %queue_name, "delete command received");
                let result = self.handle_delete(&queue_name, &receipt_handle);
                let _ = reply.send(result);
            }
            EngineCommand::Shutdown => {
                info!("shutdown command received");
                self.running = false;
            }
        }
    }

    fn handle_send(&mut self, queue_name: String, body: String) -> Result<Uuid, SendError> {
        let now = now_ns();
        let message = Message {
            id: Message::new_id(),
            queue_name: queue_name.clone(),
            body,
            receipt_handle: Message::new_receipt_handle(),
            // Immediately eligible: a receive in the same instant may take it.
            visibility_deadline: now,
        };
        let msg_id = message.id;

        // Durable write first. On failure nothing was appended in memory, so
        // the caller sees the send fail and the two stores cannot diverge.
        self.storage.save(&message)?;

        let queue = self.queues.entry(queue_name).or_insert_with_key(|name| {
            info!(queue = %name, created_at_ns = now, "queue created");
            QueueState::new(name.clone(), now)
        });
        queue.messages.push(message);

        self.metrics.record_send(&queue.name);
        debug!(queue = %queue.name, %msg_id, "message stored");
        Ok(msg_id)
    }

    fn handle_receive(
        &mut self,
        queue_name: &str,
        visibility_timeout: Duration,
    ) -> Option<ReceivedMessage> {
        let queue = self.queues.get_mut(queue_name)?;
        let now = now_ns();

        // First-eligible-wins in insertion order: an earlier message still
        // inside its visibility window does not block a later eligible one.
        let msg = queue
            .messages
            .iter_mut()
            .find(|m| now >= m.visibility_deadline)?;

        msg.visibility_deadline = now + visibility_timeout.as_nanos() as u64;
        msg.receipt_handle = Message::new_receipt_handle();

        self.metrics.record_receive(queue_name);
        debug!(queue = %queue_name, msg_id = %msg.id, "message delivered");

        Some(ReceivedMessage {
            id: msg.id,
            body: msg.body.clone(),
            receipt_handle: msg.receipt_handle.clone(),
        })
    }

    fn handle_delete(
        &mut self,
        queue_name: &str,
        receipt_handle: &str,
    ) -> Result<bool, DeleteError> {
        let Some(queue) = self.queues.get_mut(queue_name) else {
            return Ok(false);
        };

        // Every receive overwrites the stored handle, so a superseded handle
        // fails this scan exactly like one that was never issued.
        let Some(idx) = queue
            .messages
            .iter()
            .position(|m| m.receipt_handle == receipt_handle)
        else {
            return Ok(false);
        };

        // Remove the durable row before the live entry; if that fails the
        // message stays live and the same handle can be retried.
        self.storage.delete(&queue.messages[idx].id)?;
        let removed = queue.messages.remove(idx);

        self.metrics.record_delete(queue_name);
        debug!(queue = %queue_name, msg_id = %removed.id, "message deleted");
        Ok(true)
    }

    fn record_gauges(&self) {
        let now = now_ns();
        for (name, queue) in &self.queues {
            let in_flight = queue
                .messages
                .iter()
                .filter(|m| m.visibility_deadline > now)
                .count() as u64;
            self.metrics.set_queue_depth(name, queue.messages.len() as u64);
            self.metrics.set_messages_in_flight(name, in_flight);
        }
    }

    /// Access the storage layer (used by tests).
    #[cfg(test)]
    pub(crate) fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }
}

#[cfg(test)]
mod tests;
