#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum StorageError {
    #[display("storage I/O failed: {_0}")]
    Io(#[from] std::io::Error),
    #[display("record is not valid JSON: {_0}")]
    Json(#[from] serde_json::Error),
    #[display("invalid storage key {_0:?}")]
    InvalidKey(#[error(not(source))] String),
    #[display("storage is unavailable")]
    Unavailable,
}
