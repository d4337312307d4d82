/// Low-level storage errors (RocksDB, serialization).
/// This is the error type for the `Storage` trait — storage operations can only
/// fail with infrastructure errors, never domain errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("rocksdb error: {0}")]
    RocksDb(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<rocksdb::Error> for StorageError {
    fn from(err: rocksdb::Error) -> Self {
        StorageError::RocksDb(err.into_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

/// Errors from the broker front itself: the command channel and the engine
/// thread lifecycle, as opposed to the operations running on it.
#[derive(Debug, thiserror::Error)]
pub enum BrokerError {
    #[error("failed to spawn engine thread: {0}")]
    EngineSpawn(String),

    #[error("engine command channel full")]
    ChannelFull,

    #[error("engine command channel disconnected")]
    ChannelDisconnected,

    #[error("engine thread panicked")]
    EnginePanicked,
}

/// Send fails only when the durable write fails; the in-memory append does
/// not happen in that case, so the two stores stay in step.
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Delete fails only when removing the durable row fails; a handle that
/// matches nothing is reported through the operation's `bool` result instead.
#[derive(Debug, thiserror::Error)]
pub enum DeleteError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;
pub type BrokerResult<T> = std::result::Result<T, BrokerError>;
