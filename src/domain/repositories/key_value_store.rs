use thiserror::Error;

/// Errors from the persistence layer backing a key/value store
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage lock poisoned")]
    Poisoned,

    #[error("Storage task failed: {0}")]
    Task(String),

    #[error("No key left after {0}")]
    KeysExhausted(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// String key/value storage capability
///
/// Stands in for browser local storage: the credential store and the
/// result archive reach persisted state only through this trait.
/// Operations are synchronous and complete before returning.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove `key`; removing a missing key is not an error
    fn delete(&self, key: &str) -> StorageResult<()>;

    /// Enumerate every stored key, in no particular order
    fn keys(&self) -> StorageResult<Vec<String>>;
}
