use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Core message domain type. This is the internal representation owned by the
/// engine and written through to storage — distinct from the protobuf wire type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub id: Uuid,
    pub queue_name: String,
    pub body: String,
    /// Sole credential for deletion. Overwritten on every successful receive,
    /// so only the most recent consumer holds a handle that matches.
    pub receipt_handle: String,
    /// Epoch nanoseconds. The message is eligible for delivery once
    /// `now >= visibility_deadline`.
    pub visibility_deadline: u64,
}

impl Message {
    /// Generate a new UUIDv7 message ID.
    pub fn new_id() -> Uuid {
        Uuid::now_v7()
    }

    /// Generate a fresh receipt handle. UUIDv4 — handles are credentials and
    /// must not be derivable from message IDs or earlier handles.
    pub fn new_receipt_handle() -> String {
        Uuid::new_v4().to_string()
    }
}
