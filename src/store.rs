mod errors;
mod internal;

pub use errors::StoreError;
pub use internal::{EditorSurface, NoteStore};
