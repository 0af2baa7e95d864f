use log::{debug, trace};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::data::{Note, NoteColor};
use crate::store::errors::StoreError;
use crate::util::make_uuid;


/// What the editor widget bound to the current note is allowed to show.
/// For a locked note this stays empty no matter what the note stores.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EditorSurface {
    pub title: String,
    pub content: String,
}

/// The single owner of the note collection. All mutations go through
/// here; collaborators get a handle instead of reaching for globals.
#[derive(Debug)]
pub struct NoteStore {
    notes: Vec<Note>,
    current_id: Uuid,
    editor: EditorSurface,
}

impl NoteStore {
    pub fn from_notes(mut notes: Vec<Note>) -> NoteStore {
        if notes.is_empty() {
            let note = fresh_note();
            debug!("empty collection, starting with fresh note {}", note.id);
            notes.push(note);
        }
        let current_id = notes[0].id;
        let editor = surface_for(&notes[0]);
        NoteStore { notes, current_id, editor }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn editor(&self) -> &EditorSurface {
        &self.editor
    }

    pub fn current_id(&self) -> Uuid {
        self.current_id
    }

    pub fn current_note(&self) -> &Note {
        self.find(self.current_id).expect("current note must exist")
    }

    pub fn find(&self, id: Uuid) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// New notes go to the front of the collection. The selection does
    /// not move; switch explicitly after creating.
    pub fn create_note(&mut self) -> Uuid {
        let note = fresh_note();
        let id = note.id;
        debug!("created note {id}");
        self.notes.insert(0, note);
        id
    }

    /// Commits the outgoing note's edit state before the pointer moves,
    /// so a selection change can never drop an edit. Unknown ids leave
    /// the selection untouched.
    pub fn switch_current(&mut self, id: Uuid) -> bool {
        if self.find(id).is_none() {
            debug!("ignoring switch to unknown note {id}");
            return false;
        }
        self.commit_editor();
        self.current_id = id;
        self.editor = surface_for(self.current_note());
        trace!("switched to note {id}");
        true
    }

    /// The edit path. Drops the edit when the current note is locked.
    pub fn update_current(
        &mut self,
        title: Option<&str>,
        content: Option<&str>,
    ) -> bool {
        if self.current_note().is_locked {
            trace!("dropping edit on locked note {}", self.current_id);
            return false;
        }
        if let Some(title) = title {
            self.editor.title = title.to_owned();
        }
        if let Some(content) = content {
            self.editor.content = content.to_owned();
        }
        let EditorSurface { title, content } = self.editor.clone();
        let note = self.current_note_mut();
        note.title = title;
        note.content = content;
        note.last_updated = OffsetDateTime::now_utc();
        true
    }

    pub fn delete_current(&mut self) -> Result<(), StoreError> {
        if self.current_note().is_locked {
            return Err(StoreError::Locked);
        }
        let id = self.current_id;
        self.notes.retain(|n| n.id != id);
        debug!("deleted note {id}");
        if self.notes.is_empty() {
            let note = fresh_note();
            debug!("collection emptied, starting with fresh note {}", note.id);
            self.notes.push(note);
        }
        self.current_id = self.notes[0].id;
        self.editor = surface_for(&self.notes[0]);
        Ok(())
    }

    pub fn set_color(
        &mut self,
        id: Uuid,
        color: NoteColor,
    ) -> Result<(), StoreError> {
        let note = self.notes.iter_mut()
            .find(|n| n.id == id)
            .ok_or(StoreError::NotFound)?;
        if note.is_locked {
            return Err(StoreError::Locked);
        }
        note.color = color;
        note.last_updated = OffsetDateTime::now_utc();
        Ok(())
    }

    pub(crate) fn commit_editor(&mut self) {
        if self.current_note().is_locked {
            return;
        }
        let EditorSurface { title, content } = self.editor.clone();
        let note = self.current_note_mut();
        if note.title == title && note.content == content {
            return;
        }
        note.title = title;
        note.content = content;
        note.last_updated = OffsetDateTime::now_utc();
    }

    pub(crate) fn seal_current(&mut self, password: Option<&str>) {
        let note = self.current_note_mut();
        if let Some(password) = password {
            note.password = Some(password.to_owned());
        }
        note.is_locked = true;
        note.last_updated = OffsetDateTime::now_utc();
        debug!("locked note {}", note.id);
        self.editor = EditorSurface::default();
    }

    pub(crate) fn unseal_current(&mut self) {
        let note = self.current_note_mut();
        note.is_locked = false;
        note.last_updated = OffsetDateTime::now_utc();
        debug!("unlocked note {}", note.id);
        self.editor = surface_for(self.current_note());
    }

    fn current_note_mut(&mut self) -> &mut Note {
        let id = self.current_id;
        self.notes.iter_mut()
            .find(|n| n.id == id)
            .expect("current note must exist")
    }
}

fn fresh_note() -> Note {
    let now = OffsetDateTime::now_utc();
    Note::new(make_uuid(&mut rand::rng(), now), now)
}

fn surface_for(note: &Note) -> EditorSurface {
    if note.is_locked {
        EditorSurface::default()
    } else {
        EditorSurface {
            title: note.title.clone(),
            content: note.content.clone(),
        }
    }
}
