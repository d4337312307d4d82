use uuid::Uuid;

use crate::error::StorageResult;
use crate::message::Message;

/// Write-through persistence for message rows. Implementations must be
/// thread-safe.
///
/// The durable copy is secondary: the engine's in-memory set is authoritative
/// for delivery decisions and is never rebuilt from here. Rows are written on
/// send, removed on delete, and left untouched by receive.
pub trait Storage: Send + Sync {
    /// Upsert a message row.
    fn save(&self, message: &Message) -> StorageResult<()>;

    /// Fetch a message row by ID.
    fn get_by_id(&self, id: &Uuid) -> StorageResult<Option<Message>>;

    /// Delete a message row by ID. Deleting a missing row is a no-op.
    fn delete(&self, id: &Uuid) -> StorageResult<()>;
}
