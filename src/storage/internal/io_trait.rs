use std::path::Path;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::{fs, io};
use uuid::Uuid;

#[cfg(unix)] use std::os::unix::prelude::*;

use crate::util::make_uuid;

#[async_trait]
pub trait SlotIo: Send + Sync {
    async fn metadata(&self, path: &Path) -> io::Result<Metadata>;

    async fn open_file(&self, path: &Path) -> io::Result<OpenFile>;

    async fn write_file(&self, path: &Path, data: &[u8]) -> io::Result<()>;

    async fn rename_file(&self, from: &Path, to: &Path) -> io::Result<()>;

    async fn remove_file(&self, path: &Path) -> io::Result<()>;

    fn getuid(&self) -> u32;

    fn generate_uuid(&self) -> Uuid;
}

pub struct Metadata {
    pub is_dir: bool,
    pub uid: u32,
    pub mode: u32,
}

pub struct OpenFile {
    pub file: Box<dyn io::AsyncRead + Unpin + Send + Sync>,
    pub size: u64,
}

#[derive(Debug)]
pub struct ProductionSlotIo;

impl ProductionSlotIo {
    pub fn new() -> Self {
        ProductionSlotIo
    }
}

#[async_trait]
impl SlotIo for ProductionSlotIo {
    async fn metadata(&self, path: &Path) -> io::Result<Metadata> {
        let meta = fs::metadata(path).await?;
        Ok(
            Metadata {
                is_dir: meta.is_dir(),
                #[cfg(unix)]
                uid: meta.uid(),
                #[cfg(unix)]
                mode: meta.mode(),
                #[cfg(not(unix))]
                uid: 0,
                #[cfg(not(unix))]
                mode: 0o700,
            }
        )
    }

    async fn open_file(&self, path: &Path) -> io::Result<OpenFile> {
        let file = fs::File::open(path).await?;
        let metadata = file.metadata().await?;
        Ok(
            OpenFile {
                file: Box::new(file),
                size: metadata.len(),
            }
        )
    }

    async fn write_file(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        fs::write(path, data).await
    }

    async fn rename_file(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to).await
    }

    async fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path).await
    }

    #[cfg(unix)]
    fn getuid(&self) -> u32 {
        // SAFETY: a libc call
        unsafe { libc::getuid() }
    }

    #[cfg(not(unix))]
    fn getuid(&self) -> u32 {
        0
    }

    fn generate_uuid(&self) -> Uuid {
        make_uuid(&mut rand::rng(), OffsetDateTime::now_utc())
    }
}
