use thiserror::Error;

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum StoreError {
    #[error("note not found")]
    NotFound,

    #[error("note is locked")]
    Locked,
}
