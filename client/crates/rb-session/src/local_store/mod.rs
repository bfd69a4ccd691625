pub(crate) mod error;
pub(crate) mod file_store;
pub(crate) mod memory_store;

use crate::local_store::error::Result as StoreResult;

/// Client-local durable key-value storage.
///
/// Values are plain strings keyed by name. Removing a missing key is not an
/// error.
pub trait LocalStore: Send + Sync {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    fn remove(&self, key: &str) -> StoreResult<()>;
}
