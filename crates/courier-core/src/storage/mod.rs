mod rocksdb;
mod traits;

pub use rocksdb::RocksDbStorage;
pub use traits::Storage;
