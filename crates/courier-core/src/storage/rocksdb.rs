use std::path::Path;

use rocksdb::{ColumnFamilyDescriptor, DBWithThreadMode, MultiThreaded, Options};
use uuid::Uuid;

use crate::error::{StorageError, StorageResult};
use crate::message::Message;
use crate::storage::traits::Storage;

const CF_MESSAGES: &str = "messages";

type DB = DBWithThreadMode<MultiThreaded>;

/// RocksDB-backed message store. Rows live in a single `messages` column
/// family, keyed by the 16-byte message ID, serialized as JSON.
pub struct RocksDbStorage {
    db: DB,
}

impl RocksDbStorage {
    /// Open or create a RocksDB database at the given path.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let mut db_opts = Options::default();
        db_opts.create_if_missing(true);
        db_opts.create_missing_column_families(true);

        let cf_descriptors = vec![ColumnFamilyDescriptor::new(CF_MESSAGES, Options::default())];

        let db = DB::open_cf_descriptors(&db_opts, path, cf_descriptors)?;
        Ok(Self { db })
    }

    fn cf(&self) -> StorageResult<std::sync::Arc<rocksdb::BoundColumnFamily<'_>>> {
        self.db.cf_handle(CF_MESSAGES).ok_or_else(|| {
            StorageError::RocksDb(format!("column family not found: {CF_MESSAGES}"))
        })
    }
}

impl Storage for RocksDbStorage {
    fn save(&self, message: &Message) -> StorageResult<()> {
        let cf = self.cf()?;
        let value = serde_json::to_vec(message)?;
        self.db.put_cf(&cf, message.id.as_bytes(), &value)?;
        Ok(())
    }

    fn get_by_id(&self, id: &Uuid) -> StorageResult<Option<Message>> {
        let cf = self.cf()?;
        match self.db.get_cf(&cf, id.as_bytes())? {
            Some(value) => Ok(Some(serde_json::from_slice(&value)?)),
            None => Ok(None),
        }
    }

    fn delete(&self, id: &Uuid) -> StorageResult<()> {
        let cf = self.cf()?;
        self.db.delete_cf(&cf, id.as_bytes())?;
        Ok(())
    }
}
