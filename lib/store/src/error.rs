use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("{0} already exists")]
    Conflict(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<careerdost_kv::KVError> for StoreError {
    fn from(e: careerdost_kv::KVError) -> Self {
        StoreError::Storage(e.to_string())
    }
}
