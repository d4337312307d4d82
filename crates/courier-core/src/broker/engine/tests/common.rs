use super::*;

pub(super) fn test_setup() -> (
    crossbeam_channel::Sender<EngineCommand>,
    Engine,
    tempfile::TempDir,
) {
    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(RocksDbStorage::open(dir.path()).unwrap());
    let (tx, rx) = crossbeam_channel::bounded(256);
    let engine = Engine::new(storage, rx);
    (tx, engine, dir)
}

/// Helper: create an engine over a caller-provided storage (for failure-injection tests).
pub(super) fn test_setup_with_storage(
    storage: Arc<dyn Storage>,
) -> (crossbeam_channel::Sender<EngineCommand>, Engine) {
    let (tx, rx) = crossbeam_channel::bounded(256);
    (tx, Engine::new(storage, rx))
}

/// Storage stub with injectable failures, for write-through policy tests.
pub(super) struct FailingStorage {
    pub(super) fail_save: bool,
    pub(super) fail_delete: bool,
}

impl Storage for FailingStorage {
    fn save(&self, _message: &Message) -> StorageResult<()> {
        if self.fail_save {
            Err(StorageError::RocksDb("injected save failure".to_string()))
        } else {
            Ok(())
        }
    }

    fn get_by_id(&self, _id: &Uuid) -> StorageResult<Option<Message>> {
        Ok(None)
    }

    fn delete(&self, _id: &Uuid) -> StorageResult<()> {
        if self.fail_delete {
            Err(StorageError::RocksDb("injected delete failure".to_string()))
        } else {
            Ok(())
        }
    }
}

/// Helper: drive a send directly through the engine, returning the new message ID.
pub(super) fn send_one(engine: &mut Engine, queue: &str, body: &str) -> Uuid {
    send_raw(engine, queue, body).unwrap()
}

pub(super) fn send_raw(engine: &mut Engine, queue: &str, body: &str) -> Result<Uuid, SendError> {
    let (reply_tx, reply_rx) = tokio::sync::oneshot::channel();
    engine.handle_command(EngineCommand::Send {
        queue_name: queue.to_string(),
        body: body.to_string(),
        reply: reply_tx,
    });
    reply_rx.blocking_recv().unwrap()
}

/// Helper: drive a receive directly through the engine.
pub(super) fn receive_one(
    engine: &mut Engine,
    queue: &str,
    timeout: Duration,
) -> Option<ReceivedMessage> {
    let (reply_tx, reply_rx) = tokio::sync::oneshot::channel();
    engine.handle_command(EngineCommand::Receive {
        queue_name: queue.to_string(),
        visibility_timeout: timeout,
        reply: reply_tx,
    });
    reply_rx.blocking_recv().unwrap()
}

/// Helper: drive a delete directly through the engine.
pub(super) fn delete_one(
    engine: &mut Engine,
    queue: &str,
    receipt_handle: &str,
) -> Result<bool, DeleteError> {
    let (reply_tx, reply_rx) = tokio::sync::oneshot::channel();
    engine.handle_command(EngineCommand::Delete {
        queue_name: queue.to_string(),
        receipt_handle: receipt_handle.to_string(),
        reply: reply_tx,
    });
    reply_rx.blocking_recv().unwrap()
}
