mod cli;

use clap::{Parser, crate_name};
use figment::Figment;
use log::info;

use trox::codec;
use trox::config::AppConfig;
use trox::config::figment::FigmentExt;
use trox::counters;
use trox::error_exit;
use trox::logging::init_tool_logging;
use trox::storage::{CollectionSlot, SlotStorage};
use trox::store::NoteStore;

use crate::cli::CliConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tool_logging();

    info!("{} starting up", crate_name!());

    let cli_config = CliConfig::parse();
    let app_config: AppConfig = match Figment::new()
        .setup_app_config(&cli_config.config_file)
        .extract() {
        Ok(config) => config,
        Err(e) => error_exit!("invalid configuration: {e}"),
    };

    let storage = match SlotStorage::new(&app_config).await {
        Ok(storage) => storage,
        Err(e) => error_exit!("cannot open the note slot: {e}"),
    };

    let raw = match storage.load().await {
        Ok(raw) => raw,
        Err(e) => error_exit!("cannot read the note slot: {e}"),
    };
    let store = NoteStore::from_notes(
        raw.as_deref().map(codec::decode).unwrap_or_default()
    );

    let current = store.current_note();
    let counts = counters::count(&store.editor().content);
    info!(
        "{} notes; current \"{}\" ({} chars, {} words{})",
        store.notes().len(),
        current.display_title(),
        counts.chars,
        counts.words,
        if current.is_locked { ", locked" } else { "" },
    );

    if let Err(e) = storage.store(&codec::encode(store.notes())).await {
        error_exit!("cannot write the note slot: {e}");
    }
}
