use crate::core::Result;

/// Storage backend trait - allows pluggable key-value backends
///
/// Mirrors the browser local-storage contract: string keys, string values,
/// every call synchronous and immediately consistent.
pub trait StorageBackend: Send + Sync {
    /// Read the value stored under `key`
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value stored under `key`
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; removing a missing key is not an error
    fn remove_item(&self, key: &str) -> Result<()>;

    /// List all keys currently stored
    fn keys(&self) -> Result<Vec<String>>;
}
