use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::lib_constants::UNTITLED_NOTE_TITLE;

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteColor {
    #[default]
    Yellow,
    Green,
    Blue,
    Purple,
    Pink,
    Gray,
}

impl NoteColor {
    pub const PALETTE: [NoteColor; 6] = [
        NoteColor::Yellow,
        NoteColor::Green,
        NoteColor::Blue,
        NoteColor::Purple,
        NoteColor::Pink,
        NoteColor::Gray,
    ];
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub color: NoteColor,
    pub password: Option<String>,
    pub is_locked: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub last_updated: OffsetDateTime,
}

impl Note {
    pub fn new(id: Uuid, created_at: OffsetDateTime) -> Note {
        Note {
            id,
            title: String::new(),
            content: String::new(),
            color: NoteColor::default(),
            password: None,
            is_locked: false,
            last_updated: created_at,
        }
    }

    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            UNTITLED_NOTE_TITLE
        } else {
            &self.title
        }
    }
}
