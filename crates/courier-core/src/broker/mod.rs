pub mod command;
pub mod config;
mod engine;
pub mod metrics;

use std::sync::Arc;
use std::thread;

use tracing::info;

use crate::error::{BrokerError, BrokerResult};
use crate::storage::Storage;

pub use command::{EngineCommand, ReceivedMessage};
pub use config::{BrokerConfig, EngineConfig, ServerConfig};

use engine::Engine;

/// The broker owns the engine thread and the inbound command channel.
/// IO threads (gRPC handlers) send commands through `send_command()`,
/// and the single-threaded engine processes them sequentially.
pub struct Broker {
    command_tx: crossbeam_channel::Sender<EngineCommand>,
    engine_thread: Option<thread::JoinHandle<()>>,
}

impl Broker {
    /// Create a new broker, spawning the engine on a dedicated OS thread.
    #[tracing::instrument(skip_all, fields(listen_addr = %config.server.listen_addr))]
    pub fn new(config: BrokerConfig, storage: Arc<dyn Storage>) -> BrokerResult<Self> {
        let (tx, rx) =
            crossbeam_channel::bounded::<EngineCommand>(config.engine.command_channel_capacity);

        let handle = thread::Builder::new()
            .name("courier-engine".to_string())
            .spawn(move || {
                let mut engine = Engine::new(storage, rx);
                engine.run();
            })
            .map_err(|e| BrokerError::EngineSpawn(e.to_string()))?;

        info!("broker started");

        Ok(Self {
            command_tx: tx,
            engine_thread: Some(handle),
        })
    }

    /// Send a command to the engine. Returns an error if the channel is full
    /// or disconnected.
    #[tracing::instrument(skip_all)]
    pub fn send_command(&self, cmd: EngineCommand) -> BrokerResult<()> {
        self.command_tx.try_send(cmd).map_err(|e| match e {
            crossbeam_channel::TrySendError::Full(_) => BrokerError::ChannelFull,
            crossbeam_channel::TrySendError::Disconnected(_) => BrokerError::ChannelDisconnected,
        })
    }

    /// Initiate graceful shutdown: send the shutdown command and wait for the
    /// engine thread to finish.
    #[tracing::instrument(skip_all)]
    pub fn shutdown(mut self) -> BrokerResult<()> {
        info!("initiating broker shutdown");

        // Send shutdown command (ignore error if channel already closed)
        let _ = self.command_tx.send(EngineCommand::Shutdown);

        // Wait for the engine thread to finish
        if let Some(handle) = self.engine_thread.take() {
            handle.join().map_err(|_| BrokerError::EnginePanicked)?;
        }

        info!("broker shutdown complete");
        Ok(())
    }
}

impl Drop for Broker {
    fn drop(&mut self) {
        // If shutdown wasn't called explicitly, attempt to stop the engine
        if self.engine_thread.is_some() {
            let _ = self.command_tx.send(EngineCommand::Shutdown);
            if let Some(handle) = self.engine_thread.take() {
                let _ = handle.join();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::RocksDbStorage;
    use std::time::Duration;

    fn test_broker() -> (Broker, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(RocksDbStorage::open(dir.path()).unwrap());
        let config = BrokerConfig {
            engine: EngineConfig {
                command_channel_capacity: 100,
            },
            ..Default::default()
        };
        let broker = Broker::new(config, storage).unwrap();
        (broker, dir)
    }

    #[test]
    fn broker_starts_and_shuts_down() {
        let (broker, _dir) = test_broker();
        broker.shutdown().unwrap();
    }

    #[test]
    fn broker_processes_send_command() {
        let (broker, _dir) = test_broker();

        let (reply_tx, reply_rx) = tokio::sync::oneshot::channel();
        broker
            .send_command(EngineCommand::Send {
                queue_name: "test-queue".to_string(),
                body: "hello".to_string(),
                reply: reply_tx,
            })
            .unwrap();

        let msg_id = reply_rx.blocking_recv().unwrap().unwrap();

        // The stored message is immediately receivable
        let (reply_tx, reply_rx) = tokio::sync::oneshot::channel();
        broker
            .send_command(EngineCommand::Receive {
                queue_name: "test-queue".to_string(),
                visibility_timeout: Duration::from_secs(30),
                reply: reply_tx,
            })
            .unwrap();

        let received = reply_rx.blocking_recv().unwrap().expect("message expected");
        assert_eq!(received.id, msg_id);
        assert_eq!(received.body, "hello");

        broker.shutdown().unwrap();
    }

    #[test]
    fn broker_drop_stops_engine() {
        let (broker, _dir) = test_broker();
        drop(broker);
        // If we get here without hanging, the Drop impl worked
    }
}
