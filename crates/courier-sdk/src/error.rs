use tonic::Code;

/// Common gRPC status errors shared across all operations.
#[derive(Debug, thiserror::Error)]
pub enum StatusError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("server unavailable: {0}")]
    Unavailable(String),

    #[error("broker overloaded: {0}")]
    ResourceExhausted(String),

    #[error("internal server error: {0}")]
    Internal(String),

    #[error("unexpected gRPC error ({code:?}): {message}")]
    Rpc { code: Code, message: String },
}

// --- Per-operation error types ---

#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error("connection failed: {0}")]
    Transport(#[from] tonic::transport::Error),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SendError {
    #[error(transparent)]
    Status(#[from] StatusError),
}

#[derive(Debug, thiserror::Error)]
pub enum ReceiveError {
    #[error(transparent)]
    Status(#[from] StatusError),
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteError {
    #[error(transparent)]
    Status(#[from] StatusError),
}

// --- Mapping helpers ---

pub(crate) fn status_error(status: tonic::Status) -> StatusError {
    let message = status.message().to_string();
    match status.code() {
        Code::InvalidArgument => StatusError::InvalidArgument(message),
        Code::Unavailable => StatusError::Unavailable(message),
        Code::ResourceExhausted => StatusError::ResourceExhausted(message),
        Code::Internal => StatusError::Internal(message),
        code => StatusError::Rpc { code, message },
    }
}
