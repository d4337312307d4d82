use courier_core::{BrokerError, DeleteError, SendError};
use tonic::Status;

pub trait IntoStatus {
    fn into_status(self) -> Status;
}

impl IntoStatus for SendError {
    fn into_status(self) -> Status {
        match self {
            SendError::Storage(e) => Status::internal(e.to_string()),
        }
    }
}

impl IntoStatus for DeleteError {
    fn into_status(self) -> Status {
        match self {
            DeleteError::Storage(e) => Status::internal(e.to_string()),
        }
    }
}

impl IntoStatus for BrokerError {
    fn into_status(self) -> Status {
        match self {
            BrokerError::EngineSpawn(msg) => Status::internal(msg),
            BrokerError::ChannelFull => Status::resource_exhausted("engine overloaded"),
            BrokerError::ChannelDisconnected => Status::unavailable("engine unavailable"),
            BrokerError::EnginePanicked => Status::internal("engine panicked"),
        }
    }
}
