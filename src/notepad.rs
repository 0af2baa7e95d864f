#[cfg(test)] mod tests;

use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info};
use tokio::sync::watch;
use uuid::Uuid;

use crate::codec;
use crate::config::AppConfig;
use crate::counters::{self, TextCounts};
use crate::data::NoteColor;
use crate::export::NoteExporter;
use crate::lib_constants::UNTITLED_NOTE_TITLE;
use crate::lock;
use crate::persist::{PersistenceScheduler, SaveStatus};
use crate::prompt::{
    ConfirmationPrompt,
    PromptInput,
    PromptOutcome,
    PromptRequest,
};
use crate::storage::{CollectionSlot, StorageError};
use crate::store::{EditorSurface, NoteStore, StoreError};
use crate::util::StrExt;

/// The session object tying the note collection to its collaborators.
/// Edits flow store -> debounced commit; lock, unlock, create, delete
/// and color changes commit immediately.
pub struct Notepad<P: ConfirmationPrompt, E: NoteExporter> {
    store: NoteStore,
    scheduler: PersistenceScheduler,
    prompt: P,
    exporter: E,
}

impl<P: ConfirmationPrompt, E: NoteExporter> Notepad<P, E> {
    pub async fn load(
        slot: Arc<dyn CollectionSlot>,
        app_config: &AppConfig,
        prompt: P,
        exporter: E,
    ) -> Result<Notepad<P, E>, StorageError> {
        let raw = slot.load().await?;
        let notes = raw.as_deref().map(codec::decode).unwrap_or_default();
        let bootstrapped = notes.is_empty();
        let store = NoteStore::from_notes(notes);
        let mut scheduler = PersistenceScheduler::new(
            slot,
            Duration::from_millis(app_config.debounce_ms),
        );
        if bootstrapped {
            scheduler.commit_now(codec::encode(store.notes())).await?;
        }
        info!("loaded {} notes", store.notes().len());
        Ok(Notepad { store, scheduler, prompt, exporter })
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    pub fn editor(&self) -> &EditorSurface {
        self.store.editor()
    }

    pub fn counters(&self) -> TextCounts {
        counters::count(&self.store.editor().content)
    }

    pub fn save_status(&self) -> watch::Receiver<SaveStatus> {
        self.scheduler.status()
    }

    pub fn edit_title(&mut self, text: &str) {
        if self.store.update_current(Some(text), None) {
            self.schedule_commit();
        }
    }

    pub fn edit_content(&mut self, text: &str) {
        if self.store.update_current(None, Some(text)) {
            self.schedule_commit();
        }
    }

    pub async fn create_note(&mut self) -> Result<Uuid, StorageError> {
        let id = self.store.create_note();
        self.store.switch_current(id);
        self.commit_now().await?;
        Ok(id)
    }

    pub async fn switch_note(&mut self, id: Uuid) -> Result<(), StorageError> {
        if !self.store.switch_current(id) {
            return Ok(());
        }
        // the outgoing note's edits must be durable before anything else
        // happens to the selection
        self.commit_now().await
    }

    /// Asks for confirmation first; locked notes are refused outright.
    /// Returns whether a note was actually deleted.
    pub async fn delete_current(&mut self) -> Result<bool, StorageError> {
        if self.store.current_note().is_locked {
            self.deny(
                "Note Locked",
                "This note is locked. Unlock it before deleting.",
            ).await;
            return Ok(false);
        }
        let confirmed = self.confirm(PromptRequest {
            title: "Delete Note",
            message: "This note will be removed permanently. \
                Delete it now?",
            confirm_label: "Delete",
            has_cancel: true,
            input: PromptInput::None,
            error: None,
        }).await;
        if !confirmed {
            return Ok(false);
        }
        match self.store.delete_current() {
            Ok(()) => {},
            Err(e) => {
                error!("refused to delete the current note: {e}");
                return Ok(false);
            },
        }
        self.commit_now().await?;
        Ok(true)
    }

    pub async fn toggle_lock(&mut self) -> Result<bool, StorageError> {
        if self.store.current_note().is_locked {
            self.unlock_current().await
        } else {
            self.lock_current().await
        }
    }

    /// First lock prompts for a password; later locks reuse the stored
    /// one without prompting. Returns whether the note ended up locked
    /// by this call.
    pub async fn lock_current(&mut self) -> Result<bool, StorageError> {
        if self.store.current_note().is_locked {
            return Ok(false);
        }
        if self.store.current_note().password.is_some() {
            if let Err(e) = lock::lock_current(&mut self.store, None) {
                error!("relocking with a stored password failed: {e}");
                return Ok(false);
            }
            self.commit_now().await?;
            return Ok(true);
        }
        let mut auth_error = None;
        loop {
            let outcome = self.prompt.ask(PromptRequest {
                title: "Lock Note",
                message: "Set a password for this note \
                    (minimum 4 characters).",
                confirm_label: "Lock",
                has_cancel: true,
                input: PromptInput::Password,
                error: auth_error.take(),
            }).await;
            match outcome {
                PromptOutcome::Confirmed(candidate) => {
                    match lock::lock_current(&mut self.store, Some(&candidate)) {
                        Ok(()) => {
                            self.commit_now().await?;
                            return Ok(true);
                        },
                        Err(e) => auth_error = Some(e.to_string()),
                    }
                },
                PromptOutcome::Retry => continue,
                PromptOutcome::Cancelled => return Ok(false),
            }
        }
    }

    /// Keeps prompting until the password matches or the user gives up.
    /// Returns whether the note ended up unlocked by this call.
    pub async fn unlock_current(&mut self) -> Result<bool, StorageError> {
        if !self.store.current_note().is_locked {
            return Ok(false);
        }
        let mut auth_error = None;
        loop {
            let outcome = self.prompt.ask(PromptRequest {
                title: "Unlock Note",
                message: "Enter the note password.",
                confirm_label: "Unlock",
                has_cancel: true,
                input: PromptInput::Password,
                error: auth_error.take(),
            }).await;
            match outcome {
                PromptOutcome::Confirmed(candidate) => {
                    match lock::unlock_current(&mut self.store, &candidate) {
                        Ok(()) => {
                            self.commit_now().await?;
                            return Ok(true);
                        },
                        Err(e) => {
                            debug!("unlock attempt rejected");
                            auth_error = Some(e.to_string());
                        },
                    }
                },
                PromptOutcome::Retry => continue,
                PromptOutcome::Cancelled => return Ok(false),
            }
        }
    }

    pub async fn set_color(
        &mut self,
        id: Uuid,
        color: NoteColor,
    ) -> Result<bool, StorageError> {
        match self.store.set_color(id, color) {
            Ok(()) => {
                self.commit_now().await?;
                Ok(true)
            },
            Err(StoreError::Locked) => {
                self.deny(
                    "Note Locked",
                    "Unlock the note before changing its color.",
                ).await;
                Ok(false)
            },
            Err(StoreError::NotFound) => {
                debug!("ignoring color change for unknown note {id}");
                Ok(false)
            },
        }
    }

    /// Exports what the editor currently shows, so a locked note (whose
    /// surface is empty) is reported as having nothing to export.
    pub async fn export_current(&mut self) -> bool {
        let body = self.store.editor().content.clone();
        if body.trim().is_empty() {
            self.deny(
                "Empty Note",
                "There is nothing to export. Write something first.",
            ).await;
            return false;
        }
        let confirmed = self.confirm(PromptRequest {
            title: "Export & Backup",
            message: "Notes live in local storage and can be lost when \
                it is cleared. Download this note as a .txt file now?",
            confirm_label: "Download",
            has_cancel: true,
            input: PromptInput::None,
            error: None,
        }).await;
        if !confirmed {
            return false;
        }
        let title = self.store.editor().title
            .nonblank_to_some()
            .unwrap_or_else(|| UNTITLED_NOTE_TITLE.to_owned());
        if let Err(e) = self.exporter.export(&title, &body).await {
            error!("failed to export note: {e}");
            return false;
        }
        true
    }

    pub async fn shutdown(&mut self) -> Result<(), StorageError> {
        debug!("flushing the collection before shutdown");
        self.commit_now().await
    }

    async fn confirm(&mut self, request: PromptRequest<'_>) -> bool {
        loop {
            match self.prompt.ask(request.clone()).await {
                PromptOutcome::Confirmed(_) => return true,
                PromptOutcome::Cancelled => return false,
                PromptOutcome::Retry => continue,
            }
        }
    }

    async fn deny(&mut self, title: &str, message: &str) {
        let _ = self.prompt.ask(PromptRequest {
            title,
            message,
            confirm_label: "OK",
            has_cancel: false,
            input: PromptInput::None,
            error: None,
        }).await;
    }

    fn schedule_commit(&mut self) {
        self.scheduler.schedule(codec::encode(self.store.notes()));
    }

    async fn commit_now(&mut self) -> Result<(), StorageError> {
        self.scheduler.commit_now(codec::encode(self.store.notes())).await
    }
}
