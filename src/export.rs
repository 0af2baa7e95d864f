use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::debug;
use tokio::{fs, io};

#[async_trait]
pub trait NoteExporter: Send {
    async fn export(&mut self, title: &str, body: &str) -> io::Result<()>;
}

/// Writes the note as a plain `<title>.txt` next to the other exports.
pub struct TextFileExporter {
    target_dir: PathBuf,
}

impl TextFileExporter {
    pub fn new(target_dir: impl AsRef<Path>) -> TextFileExporter {
        TextFileExporter { target_dir: target_dir.as_ref().to_owned() }
    }

    fn export_path(&self, title: &str) -> PathBuf {
        let filename: String = title.chars()
            .map(|c| if std::path::is_separator(c) { '_' } else { c })
            .collect();
        self.target_dir.join(filename + ".txt")
    }
}

#[async_trait]
impl NoteExporter for TextFileExporter {
    async fn export(&mut self, title: &str, body: &str) -> io::Result<()> {
        let path = self.export_path(title);
        debug!("exporting note to {}", path.display());
        fs::write(&path, format!("{title}\n\n{body}")).await
    }
}
