use crate::error::KVError;

/// KVStore provides a key-value storage interface for durable records.
///
/// Keys follow a namespaced convention: `licensing/settings`,
/// `licensing/devices/{deviceId}`, etc. Each call is individually atomic;
/// callers that need a larger atomic section hold their own lock across it.
pub trait KVStore: Send + Sync {
    /// Get the value for a key. Returns None if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError>;

    /// Set a key-value pair, creating or overwriting.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError>;

    /// Delete a key. Deleting an absent key is not an error.
    fn delete(&self, key: &str) -> Result<(), KVError>;

    /// Scan all keys matching a prefix. Returns sorted (key, value) pairs.
    fn scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, KVError>;
}
