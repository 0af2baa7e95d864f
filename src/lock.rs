mod errors;

use log::debug;

pub use errors::AuthError;

use crate::lib_constants::MIN_PASSWORD_LEN;
use crate::store::NoteStore;

/// Locks the current note. The first lock needs a candidate password of
/// minimum length; later locks reuse the stored one and ignore the
/// candidate. The in-progress edit is committed before the state flips
/// so locking can never lose it.
pub fn lock_current(
    store: &mut NoteStore,
    candidate: Option<&str>,
) -> Result<(), AuthError> {
    let note = store.current_note();
    if note.is_locked {
        return Ok(());
    }
    if note.password.is_none() {
        let candidate = candidate.unwrap_or_default();
        if candidate.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::TooShort(MIN_PASSWORD_LEN));
        }
        store.commit_editor();
        store.seal_current(Some(candidate));
    } else {
        store.commit_editor();
        store.seal_current(None);
    }
    Ok(())
}

/// Unlocks the current note when the candidate matches the stored
/// password exactly. On success the stored content comes back to the
/// editable surface; on failure nothing changes.
pub fn unlock_current(
    store: &mut NoteStore,
    candidate: &str,
) -> Result<(), AuthError> {
    let note = store.current_note();
    if !note.is_locked {
        return Ok(());
    }
    if note.password.as_deref() != Some(candidate) {
        debug!("rejected unlock attempt for note {}", note.id);
        return Err(AuthError::WrongPassword);
    }
    store.unseal_current();
    Ok(())
}
