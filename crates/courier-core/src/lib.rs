pub mod broker;
pub mod error;
pub mod message;
pub mod queue;
pub mod storage;
pub mod telemetry;

pub use broker::{Broker, BrokerConfig, EngineCommand, ReceivedMessage};
pub use error::{BrokerError, DeleteError, SendError, StorageError, StorageResult};
pub use message::Message;
pub use queue::QueueState;
pub use storage::{RocksDbStorage, Storage};
