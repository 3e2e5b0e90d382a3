use super::{CmdMessage, CmdResult};
use crate::error::{BlogError, Result};
use crate::model::{Settings, SettingsPatch, Stats};
use crate::store::{BlogStore, StorageBackend};

pub fn settings<B: StorageBackend>(store: &BlogStore<B>) -> Settings {
    store.settings()
}

pub fn update_settings<B: StorageBackend>(
    store: &mut BlogStore<B>,
    patch: &SettingsPatch,
) -> CmdResult {
    match store.save_settings(patch) {
        Some(_) => CmdResult::default().with_message(CmdMessage::success("Settings saved")),
        None => CmdResult::default().with_message(CmdMessage::error("Failed to save settings")),
    }
}

pub fn stats<B: StorageBackend>(store: &BlogStore<B>) -> Stats {
    store.stats()
}

/// Pretty-printed export envelope.
pub fn export<B: StorageBackend>(store: &BlogStore<B>) -> Result<String> {
    serde_json::to_string_pretty(&store.export()).map_err(BlogError::Serialization)
}

pub fn import<B: StorageBackend>(store: &mut BlogStore<B>, raw: &str) -> CmdResult {
    if store.import_json(raw) {
        CmdResult::default().with_message(CmdMessage::success("Data imported successfully!"))
    } else {
        CmdResult::default().with_message(CmdMessage::error(
            "Failed to import data. Please check the file format.",
        ))
    }
}

pub fn clear<B: StorageBackend>(store: &mut BlogStore<B>) -> CmdResult {
    if store.clear_all() {
        CmdResult::default().with_message(CmdMessage::success("All data cleared"))
    } else {
        CmdResult::default().with_message(CmdMessage::error("Failed to clear data"))
    }
}
