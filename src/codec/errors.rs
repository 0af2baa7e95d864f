use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64ct::Error),

    #[error("payload is not valid utf-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("invalid note collection: {0}")]
    Json(#[from] serde_json::Error),
}
