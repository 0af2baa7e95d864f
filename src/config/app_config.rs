use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::lib_constants::{
    DEFAULT_DATA_FILE,
    DEFAULT_DEBOUNCE_MS,
    DEFAULT_MAX_SLOT_LEN,
};

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_file: PathBuf,

    /// Quiet period between the last edit and the coalesced storage write.
    pub debounce_ms: u64,

    pub max_slot_size: u64,
}

impl Default for AppConfig {
    fn default() -> AppConfig {
        AppConfig {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            max_slot_size: DEFAULT_MAX_SLOT_LEN,
        }
    }
}
