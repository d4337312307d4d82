use super::*;
use crate::error::{StorageError, StorageResult};
use crate::storage::RocksDbStorage;

mod common;
use common::*;
