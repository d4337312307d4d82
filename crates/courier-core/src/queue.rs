use crate::message::Message;

/// A logical queue: creation metadata plus the insertion-ordered live set.
/// Queues materialize on first send; there is no explicit create operation.
#[derive(Debug)]
pub struct QueueState {
    pub name: String,
    /// Epoch nanoseconds at creation.
    pub created_at: u64,
    /// Live messages in arrival order. Receive scans front to back and takes
    /// the first eligible entry, so delivery order is FIFO-leaning but a
    /// message inside its visibility window can be overtaken.
    pub messages: Vec<Message>,
}

impl QueueState {
    pub fn new(name: String, created_at: u64) -> Self {
        Self {
            name,
            created_at,
            messages: Vec::new(),
        }
    }
}
