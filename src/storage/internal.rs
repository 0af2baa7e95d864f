use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::{debug, error, trace};
use tokio::io;
use tokio::io::AsyncReadExt;

use crate::config::AppConfig;
use crate::storage::CollectionSlot;
use crate::storage::errors::StorageError;

use io_trait::{Metadata, ProductionSlotIo, SlotIo};

mod io_trait;

const TMP_FILENAME_INFIX: &str = ".tmp.";

pub type SlotStorage = SlotStorageImpl<ProductionSlotIo>;

#[allow(private_bounds)]
#[derive(Debug)]
pub struct SlotStorageImpl<Io: SlotIo> {
    io: Io,
    slot_path: PathBuf,
    max_slot_len: u64,
}

impl SlotStorage {
    pub async fn new(
        app_config: &AppConfig,
    ) -> Result<SlotStorage, StorageError> {
        Self::new_internal(
            app_config.data_file.clone(),
            app_config.max_slot_size,
            ProductionSlotIo::new(),
        ).await
    }
}

#[allow(private_bounds)]
impl<Io: SlotIo> SlotStorageImpl<Io> {
    async fn new_internal(
        slot_path: PathBuf,
        max_slot_len: u64,
        io: Io,
    ) -> Result<SlotStorageImpl<Io>, StorageError> {
        debug!("opening note slot at {}", slot_path.display());
        let slot_dir = slot_dir(&slot_path);
        let meta = io.metadata(&slot_dir).await?;
        if !meta.is_dir {
            return Err(StorageError::DataDirNotInitialized);
        }
        validate_slot_dir_access(&meta, io.getuid())?;
        Ok(SlotStorageImpl { io, slot_path, max_slot_len })
    }

    fn tmp_slot_path(&self) -> PathBuf {
        let filename = self.slot_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.slot_path.with_file_name(
            filename +
                TMP_FILENAME_INFIX +
                &self.io.generate_uuid().hyphenated().to_string()
        )
    }
}

#[async_trait]
impl<Io: SlotIo> CollectionSlot for SlotStorageImpl<Io> {
    async fn load(&self) -> Result<Option<String>, StorageError> {
        debug!("reading note slot at {}", self.slot_path.display());
        let file = match self.io.open_file(&self.slot_path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("note slot does not exist yet");
                return Ok(None);
            },
            Err(e) => return Err(e.into()),
        };
        if file.size > self.max_slot_len {
            return Err(StorageError::TooBig);
        }
        let contents =
            read_limited_utf8_lossy(self.max_slot_len, file.file).await?;
        trace!("read {} bytes from the note slot", contents.len());
        Ok(Some(contents))
    }

    async fn store(&self, encoded: &str) -> Result<(), StorageError> {
        debug!("writing note slot to {}", self.slot_path.display());
        let tmp_filename = self.tmp_slot_path();
        trace!("tmp filename for the slot: \"{}\"", tmp_filename.display());
        self.io.write_file(&tmp_filename, encoded.as_bytes()).await?;
        if let Err(e) = self.io
            .rename_file(&tmp_filename, &self.slot_path)
            .await {
            error!(
                "failed to rename tmp slot file \"{}\": {e}",
                tmp_filename.display(),
            );
            if let Err(e) = self.io.remove_file(&tmp_filename).await {
                error!(
                    "failed to remove tmp slot file \"{}\": {e}",
                    tmp_filename.display(),
                );
            }
            return Err(e.into())
        }
        Ok(())
    }
}

fn slot_dir(slot_path: &Path) -> PathBuf {
    slot_path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_owned)
        .unwrap_or_else(|| PathBuf::from("."))
}

// passwords live in the slot, so the containing directory must belong
// to whoever runs the editor
fn validate_slot_dir_access(
    meta: &Metadata,
    uid: u32,
) -> Result<(), StorageError> {
    if meta.uid != uid || meta.mode & 0o700 != 0o700 {
        return Err(StorageError::Permission)
    }
    Ok(())
}

async fn read_limited_utf8_lossy<R: io::AsyncRead + Unpin>(
    limit: u64,
    reader: R,
) -> Result<String, io::Error> {
    let mut buf = Vec::with_capacity(limit.min(64 * 1024) as usize);
    io::BufReader::new(reader).take(limit).read_to_end(&mut buf).await?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
