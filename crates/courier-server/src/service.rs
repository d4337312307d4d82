use std::sync::Arc;
use std::time::Duration;

use courier_core::{Broker, EngineCommand};
use courier_proto::queue_server::Queue;
use courier_proto::{
    DeleteMessageRequest, DeleteMessageResponse, ReceiveMessageRequest, ReceiveMessageResponse,
    SendMessageRequest, SendMessageResponse,
};
use tonic::{Request, Response, Status};
use tracing::{debug, instrument};

use crate::error::IntoStatus;

/// gRPC service implementation for producers and consumers.
pub struct QueueService {
    broker: Arc<Broker>,
    /// Queue used when a request does not name one.
    default_queue: String,
    /// Applied to every receive. Transport policy — the engine takes the
    /// timeout per call.
    visibility_timeout: Duration,
}

impl QueueService {
    pub fn new(broker: Arc<Broker>, default_queue: String, visibility_timeout: Duration) -> Self {
        Self {
            broker,
            default_queue,
            visibility_timeout,
        }
    }

    fn queue_name(&self, requested: String) -> String {
        if requested.is_empty() {
            self.default_queue.clone()
        } else {
            requested
        }
    }
}

#[tonic::async_trait]
impl Queue for QueueService {
    #[instrument(skip(self, request))]
    async fn send_message(
        &self,
        request: Request<SendMessageRequest>,
    ) -> Result<Response<SendMessageResponse>, Status> {
        let req = request.into_inner();
        let queue_name = self.queue_name(req.queue_name);

        let (reply_tx, reply_rx) = tokio::sync::oneshot::channel();
        self.broker
            .send_command(EngineCommand::Send {
                queue_name,
                body: req.message_body,
                reply: reply_tx,
            })
            .map_err(IntoStatus::into_status)?;

        let msg_id = reply_rx
            .await
            .map_err(|_| Status::internal("engine reply channel dropped"))?
            .map_err(IntoStatus::into_status)?;

        Ok(Response::new(SendMessageResponse {
            message_id: msg_id.to_string(),
        }))
    }

    #[instrument(skip(self, request))]
    async fn receive_message(
        &self,
        request: Request<ReceiveMessageRequest>,
    ) -> Result<Response<ReceiveMessageResponse>, Status> {
        let req = request.into_inner();
        let queue_name = self.queue_name(req.queue_name);

        let (reply_tx, reply_rx) = tokio::sync::oneshot::channel();
        self.broker
            .send_command(EngineCommand::Receive {
                queue_name,
                visibility_timeout: self.visibility_timeout,
                reply: reply_tx,
            })
            .map_err(IntoStatus::into_status)?;

        let received = reply_rx
            .await
            .map_err(|_| Status::internal("engine reply channel dropped"))?;

        match received {
            Some(msg) => {
                debug!(msg_id = %msg.id, "message delivered");
                Ok(Response::new(ReceiveMessageResponse {
                    message_id: msg.id.to_string(),
                    message_body: msg.body,
                    receipt_handle: msg.receipt_handle,
                }))
            }
            // The steady state of an empty or fully in-flight queue — an
            // application-level condition, distinguishable from transport errors.
            None => Err(Status::not_found("no messages available")),
        }
    }

    #[instrument(skip(self, request))]
    async fn delete_message(
        &self,
        request: Request<DeleteMessageRequest>,
    ) -> Result<Response<DeleteMessageResponse>, Status> {
        let req = request.into_inner();

        if req.receipt_handle.is_empty() {
            return Err(Status::invalid_argument("receipt_handle must not be empty"));
        }
        let queue_name = self.queue_name(req.queue_name);

        let (reply_tx, reply_rx) = tokio::sync::oneshot::channel();
        self.broker
            .send_command(EngineCommand::Delete {
                queue_name,
                receipt_handle: req.receipt_handle,
                reply: reply_tx,
            })
            .map_err(IntoStatus::into_status)?;

        let success = reply_rx
            .await
            .map_err(|_| Status::internal("engine reply channel dropped"))?
            .map_err(IntoStatus::into_status)?;

        Ok(Response::new(DeleteMessageResponse { success }))
    }
}
