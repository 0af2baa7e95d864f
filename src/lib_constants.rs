// TODO: validate to fit both in u64 and usize
pub const DEFAULT_MAX_SLOT_LEN: u64 = 4 * 1024 * 1024;

pub const DEFAULT_DATA_FILE: &str = "notes.trox";
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

pub const MIN_PASSWORD_LEN: usize = 4;
pub const UNTITLED_NOTE_TITLE: &str = "Untitled Note";
