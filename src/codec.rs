mod errors;

use base64ct::{Base64, Encoding};
use log::warn;

pub use errors::CodecError;

use crate::data::Note;

// The encoding keeps the collection out of casual view of anyone poking
// at the storage file. It is not confidentiality.

pub fn encode(notes: &[Note]) -> String {
    let json = serde_json::to_string(notes)
        .expect("note collection serialization cannot fail");
    Base64::encode_string(json.as_bytes())
}

pub fn try_decode(raw: &str) -> Result<Vec<Note>, CodecError> {
    let bytes = Base64::decode_vec(raw.trim())?;
    let json = String::from_utf8(bytes)?;
    Ok(serde_json::from_str(&json)?)
}

/// Malformed input falls back to an empty collection, which makes the
/// caller bootstrap a fresh first note instead of failing the session.
pub fn decode(raw: &str) -> Vec<Note> {
    try_decode(raw).unwrap_or_else(|e| {
        warn!("stored collection is unreadable, starting empty: {e}");
        Vec::new()
    })
}
