use std::sync::Arc;

use mocks::{
    MemorySlot,
    RecordingExporter,
    ScriptedPrompt,
    make_note,
    settle,
};

use crate::data::Note;

use super::*;


type TestNotepad = Notepad<ScriptedPrompt, RecordingExporter>;

async fn load_notepad(
    initial: Option<Vec<Note>>,
    replies: impl IntoIterator<Item = PromptOutcome>,
) -> (TestNotepad, Arc<MemorySlot>, mocks::PromptLog, mocks::ExportLog) {
    let slot = MemorySlot::new(initial.map(|notes| codec::encode(&notes)));
    let (prompt, prompt_log) = ScriptedPrompt::new(replies);
    let (exporter, export_log) = RecordingExporter::new();
    let notepad = Notepad::load(
        slot.clone(),
        &AppConfig::default(),
        prompt,
        exporter,
    ).await.expect("load failed");
    (notepad, slot, prompt_log, export_log)
}

fn last_persisted(slot: &MemorySlot) -> Vec<Note> {
    let writes = slot.writes();
    codec::decode(writes.last().expect("nothing was persisted"))
}

#[tokio::test]
async fn load_bootstraps_and_persists_a_first_note() {
    let (notepad, slot, _, _) = load_notepad(None, []).await;
    assert_eq!(notepad.store().notes().len(), 1);
    let note = notepad.store().current_note();
    assert_eq!(note.title, "");
    assert_eq!(note.content, "");
    assert!(!note.is_locked);

    let persisted = last_persisted(&slot);
    assert_eq!(slot.writes().len(), 1);
    assert_eq!(persisted, notepad.store().notes());
}

#[tokio::test]
async fn load_recovers_from_a_malformed_slot() {
    let slot = MemorySlot::new(Some("not the encoding".to_owned()));
    let (prompt, _) = ScriptedPrompt::silent();
    let (exporter, _) = RecordingExporter::new();
    let notepad = Notepad::load(
        slot.clone(),
        &AppConfig::default(),
        prompt,
        exporter,
    ).await.expect("load failed");
    assert_eq!(notepad.store().notes().len(), 1);
    assert_eq!(slot.writes().len(), 1);
}

#[tokio::test]
async fn load_keeps_an_existing_collection() {
    let notes = vec![make_note("a", "aa", None), make_note("b", "bb", None)];
    let (notepad, slot, _, _) =
        load_notepad(Some(notes.clone()), []).await;
    assert_eq!(notepad.store().notes(), notes);
    assert_eq!(notepad.store().current_note().title, "a");
    assert_eq!(slot.writes().len(), 0);
}

#[tokio::test(start_paused = true)]
async fn rapid_edits_coalesce_into_one_commit() {
    let (mut notepad, slot, _, _) =
        load_notepad(Some(vec![make_note("a", "", None)]), []).await;

    for i in 0..10 {
        notepad.edit_content(&format!("draft {i}"));
        settle().await;
        tokio::time::advance(std::time::Duration::from_millis(10)).await;
    }
    settle().await;
    assert_eq!(slot.writes().len(), 0);

    tokio::time::advance(std::time::Duration::from_millis(500)).await;
    settle().await;
    assert_eq!(slot.writes().len(), 1);
    assert_eq!(last_persisted(&slot)[0].content, "draft 9");
}

#[tokio::test(start_paused = true)]
async fn save_status_tracks_the_debounced_commit() {
    let (mut notepad, _, _, _) =
        load_notepad(Some(vec![make_note("a", "", None)]), []).await;
    let status = notepad.save_status();

    assert_eq!(*status.borrow(), SaveStatus::Idle);
    notepad.edit_content("draft");
    assert_eq!(*status.borrow(), SaveStatus::Pending);

    settle().await;
    tokio::time::advance(std::time::Duration::from_millis(500)).await;
    settle().await;
    assert_eq!(*status.borrow(), SaveStatus::Saved);
}

#[tokio::test(start_paused = true)]
async fn edits_on_a_locked_note_are_dropped() {
    let (mut notepad, slot, _, _) =
        load_notepad(Some(vec![make_note("s", "hidden", Some("abcd"))]), [])
            .await;
    notepad.edit_content("leak attempt");
    notepad.edit_title("leak attempt");

    settle().await;
    tokio::time::advance(std::time::Duration::from_millis(1_000)).await;
    settle().await;
    assert_eq!(slot.writes().len(), 0);
    assert_eq!(notepad.store().current_note().content, "hidden");
    assert_eq!(notepad.editor(), &EditorSurface::default());
}

#[tokio::test(start_paused = true)]
async fn locking_commits_the_pending_edit_first() {
    let (mut notepad, slot, _, _) = load_notepad(
        Some(vec![make_note("a", "", None)]),
        [PromptOutcome::Confirmed("abcd".to_owned())],
    ).await;

    notepad.edit_content("hello");
    settle().await;
    let locked = notepad.lock_current().await.expect("lock failed");
    assert!(locked);

    // the immediate commit superseded the debounced one
    assert_eq!(slot.writes().len(), 1);
    let persisted = &last_persisted(&slot)[0];
    assert_eq!(persisted.content, "hello");
    assert!(persisted.is_locked);
    assert_eq!(persisted.password.as_deref(), Some("abcd"));
    assert_eq!(notepad.editor(), &EditorSurface::default());

    tokio::time::advance(std::time::Duration::from_millis(1_000)).await;
    settle().await;
    assert_eq!(slot.writes().len(), 1);
}

#[tokio::test]
async fn short_password_keeps_the_prompt_open() {
    let (mut notepad, slot, prompt_log, _) = load_notepad(
        Some(vec![make_note("a", "", None)]),
        [
            PromptOutcome::Confirmed("abc".to_owned()),
            PromptOutcome::Cancelled,
        ],
    ).await;

    let locked = notepad.lock_current().await.expect("lock failed");
    assert!(!locked);
    assert!(!notepad.store().current_note().is_locked);
    assert_eq!(slot.writes().len(), 0);

    let asked = prompt_log.lock().unwrap().clone();
    assert_eq!(asked.len(), 2);
    assert_eq!(asked[0].error, None);
    assert!(asked[1].error.as_deref().unwrap().contains("at least"));
}

#[tokio::test]
async fn relocking_does_not_prompt_again() {
    let mut unlocked = make_note("a", "aa", Some("abcd"));
    unlocked.is_locked = false;
    let (mut notepad, slot, prompt_log, _) =
        load_notepad(Some(vec![unlocked]), []).await;

    let locked = notepad.lock_current().await.expect("lock failed");
    assert!(locked);
    assert!(prompt_log.lock().unwrap().is_empty());
    assert!(last_persisted(&slot)[0].is_locked);
}

#[tokio::test]
async fn wrong_password_keeps_the_note_locked() {
    let (mut notepad, slot, prompt_log, _) = load_notepad(
        Some(vec![make_note("s", "hidden", Some("abcd"))]),
        [
            PromptOutcome::Confirmed("xxxx".to_owned()),
            PromptOutcome::Cancelled,
        ],
    ).await;

    let unlocked = notepad.unlock_current().await.expect("unlock failed");
    assert!(!unlocked);
    assert!(notepad.store().current_note().is_locked);
    assert_eq!(notepad.editor(), &EditorSurface::default());
    assert_eq!(slot.writes().len(), 0);

    let asked = prompt_log.lock().unwrap().clone();
    assert_eq!(asked.len(), 2);
    assert!(asked[1].error.as_deref().unwrap().contains("wrong password"));
}

#[tokio::test]
async fn correct_password_restores_the_content() {
    let (mut notepad, slot, _, _) = load_notepad(
        Some(vec![make_note("s", "hidden", Some("abcd"))]),
        [PromptOutcome::Confirmed("abcd".to_owned())],
    ).await;

    let unlocked = notepad.unlock_current().await.expect("unlock failed");
    assert!(unlocked);
    assert!(!notepad.store().current_note().is_locked);
    assert_eq!(notepad.editor().content, "hidden");
    let persisted = &last_persisted(&slot)[0];
    assert!(!persisted.is_locked);
    assert_eq!(persisted.password.as_deref(), Some("abcd"));
}

#[tokio::test]
async fn deleting_a_locked_note_is_denied() {
    let notes = vec![make_note("s", "hidden", Some("abcd"))];
    let (mut notepad, slot, prompt_log, _) =
        load_notepad(Some(notes.clone()), []).await;

    let deleted = notepad.delete_current().await.expect("delete failed");
    assert!(!deleted);
    assert_eq!(notepad.store().notes(), notes);
    assert_eq!(slot.writes().len(), 0);

    let asked = prompt_log.lock().unwrap().clone();
    assert_eq!(asked.len(), 1);
    assert_eq!(asked[0].title, "Note Locked");
    assert!(!asked[0].has_cancel);
}

#[tokio::test]
async fn confirmed_delete_removes_and_persists() {
    let notes = vec![make_note("a", "aa", None), make_note("b", "bb", None)];
    let (mut notepad, slot, _, _) = load_notepad(
        Some(notes.clone()),
        [PromptOutcome::Confirmed(String::new())],
    ).await;

    let deleted = notepad.delete_current().await.expect("delete failed");
    assert!(deleted);
    assert_eq!(notepad.store().notes().len(), 1);
    assert_eq!(notepad.store().current_note().title, "b");
    let persisted = last_persisted(&slot);
    assert_eq!(persisted.len(), 1);
    assert_eq!(persisted[0].title, "b");
}

#[tokio::test]
async fn cancelled_delete_changes_nothing() {
    let notes = vec![make_note("a", "aa", None)];
    let (mut notepad, slot, _, _) =
        load_notepad(Some(notes.clone()), [PromptOutcome::Cancelled]).await;

    let deleted = notepad.delete_current().await.expect("delete failed");
    assert!(!deleted);
    assert_eq!(notepad.store().notes(), notes);
    assert_eq!(slot.writes().len(), 0);
}

#[tokio::test]
async fn deleting_the_last_note_leaves_a_fresh_one() {
    let (mut notepad, slot, _, _) = load_notepad(
        Some(vec![make_note("only", "text", None)]),
        [PromptOutcome::Confirmed(String::new())],
    ).await;

    let deleted = notepad.delete_current().await.expect("delete failed");
    assert!(deleted);
    assert_eq!(notepad.store().notes().len(), 1);
    let note = notepad.store().current_note();
    assert_eq!(note.title, "");
    assert_eq!(note.content, "");
    let persisted = last_persisted(&slot);
    assert_eq!(persisted.len(), 1);
    assert_eq!(persisted[0].content, "");
}

#[tokio::test(start_paused = true)]
async fn switching_flushes_the_outgoing_edit() {
    let notes = vec![make_note("a", "aa", None), make_note("b", "bb", None)];
    let second = notes[1].id;
    let (mut notepad, slot, _, _) =
        load_notepad(Some(notes), []).await;

    notepad.edit_content("edited");
    settle().await;
    notepad.switch_note(second).await.expect("switch failed");

    assert_eq!(notepad.store().current_id(), second);
    assert_eq!(notepad.editor().content, "bb");
    assert_eq!(slot.writes().len(), 1);
    let persisted = last_persisted(&slot);
    assert_eq!(persisted[0].content, "edited");

    tokio::time::advance(std::time::Duration::from_millis(1_000)).await;
    settle().await;
    assert_eq!(slot.writes().len(), 1);
}

#[tokio::test]
async fn switching_to_an_unknown_note_is_a_noop() {
    let notes = vec![make_note("a", "aa", None)];
    let current = notes[0].id;
    let (mut notepad, slot, _, _) = load_notepad(Some(notes), []).await;

    notepad.switch_note(Uuid::from_u128(0xdead)).await
        .expect("switch failed");
    assert_eq!(notepad.store().current_id(), current);
    assert_eq!(slot.writes().len(), 0);
}

#[tokio::test]
async fn creating_a_note_selects_it_and_persists() {
    let (mut notepad, slot, _, _) =
        load_notepad(Some(vec![make_note("old", "", None)]), []).await;

    let id = notepad.create_note().await.expect("create failed");
    assert_eq!(notepad.store().current_id(), id);
    assert_eq!(notepad.store().notes()[0].id, id);
    let persisted = last_persisted(&slot);
    assert_eq!(persisted.len(), 2);
    assert_eq!(persisted[0].id, id);
}

#[tokio::test]
async fn color_change_persists_immediately() {
    let notes = vec![make_note("a", "", None)];
    let id = notes[0].id;
    let (mut notepad, slot, _, _) = load_notepad(Some(notes), []).await;

    let changed = notepad.set_color(id, NoteColor::Pink).await
        .expect("color change failed");
    assert!(changed);
    assert_eq!(last_persisted(&slot)[0].color, NoteColor::Pink);
}

#[tokio::test]
async fn color_change_on_a_locked_note_is_denied() {
    let notes = vec![make_note("s", "", Some("abcd"))];
    let id = notes[0].id;
    let (mut notepad, slot, prompt_log, _) =
        load_notepad(Some(notes), []).await;

    let changed = notepad.set_color(id, NoteColor::Blue).await
        .expect("color change failed");
    assert!(!changed);
    assert_eq!(notepad.store().current_note().color, NoteColor::default());
    assert_eq!(slot.writes().len(), 0);
    assert_eq!(prompt_log.lock().unwrap()[0].title, "Note Locked");
}

#[tokio::test]
async fn exporting_an_empty_note_is_denied() {
    let (mut notepad, _, prompt_log, export_log) =
        load_notepad(Some(vec![make_note("a", "  ", None)]), []).await;

    assert!(!notepad.export_current().await);
    assert!(export_log.lock().unwrap().is_empty());
    let asked = prompt_log.lock().unwrap().clone();
    assert_eq!(asked[0].title, "Empty Note");
    assert!(!asked[0].has_cancel);
}

#[tokio::test]
async fn confirmed_export_reaches_the_exporter() {
    let (mut notepad, _, _, export_log) = load_notepad(
        Some(vec![make_note("", "hello world", None)]),
        [PromptOutcome::Confirmed(String::new())],
    ).await;

    assert!(notepad.export_current().await);
    assert_eq!(
        export_log.lock().unwrap().clone(),
        vec![("Untitled Note".to_owned(), "hello world".to_owned())],
    );
}

#[tokio::test]
async fn counters_follow_the_editor_surface() {
    let (mut notepad, _, _, _) =
        load_notepad(Some(vec![make_note("a", "", None)]), []).await;
    notepad.edit_content("two  words");
    let counts = notepad.counters();
    assert_eq!(counts.words, 2);
    assert_eq!(counts.chars, 10);
}

#[tokio::test]
async fn shutdown_flushes_the_collection() {
    let (mut notepad, slot, _, _) =
        load_notepad(Some(vec![make_note("a", "aa", None)]), []).await;
    notepad.shutdown().await.expect("shutdown failed");
    assert_eq!(slot.writes().len(), 1);
    assert_eq!(last_persisted(&slot)[0].content, "aa");
}
