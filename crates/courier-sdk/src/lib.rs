mod client;
mod error;

pub use client::{ConnectOptions, CourierClient, ReceivedMessage};
pub use error::{ConnectError, DeleteError, ReceiveError, SendError, StatusError};

/// Re-export the proto types for advanced usage.
pub use courier_proto as proto;
