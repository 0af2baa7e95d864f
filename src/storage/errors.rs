use thiserror::Error;
use tokio::io::Error as IoError;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("data directory is not initialized properly")]
    DataDirNotInitialized,

    #[error(transparent)]
    Io(#[from] IoError),

    #[error("insufficient permissions to access the note slot")]
    Permission,

    #[error("stored collection is too large")]
    TooBig,
}
