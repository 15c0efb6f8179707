use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::sync::Mutex;
use tracing::{info, instrument};

use crate::domain::{AnalysisError, Result};

/// One file handed to the store for persistence.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// The data-folder boundary: persists uploaded résumés, enforcing the
/// accepted extension and a maximum file size.
///
/// Replacing the stored set is clear-then-write; the internal mutex keeps a
/// single such sequence in flight so one caller's clear cannot erase
/// another caller's files mid-upload.
pub struct ResumeStore {
    folder: PathBuf,
    max_file_bytes: usize,
    write_guard: Mutex<()>,
}

impl ResumeStore {
    pub fn new(folder: impl Into<PathBuf>, max_file_bytes: usize) -> Self {
        Self {
            folder: folder.into(),
            max_file_bytes,
            write_guard: Mutex::new(()),
        }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Clears existing PDFs and writes the new set. All files are validated
    /// before anything is deleted, so a rejected upload leaves the previous
    /// set intact.
    #[instrument(skip(self, files), fields(count = files.len()))]
    pub async fn replace_all(&self, files: &[UploadedFile]) -> Result<usize> {
        for file in files {
            self.validate(file)?;
        }

        let _guard = self.write_guard.lock().await;

        fs::create_dir_all(&self.folder)
            .await
            .map_err(|e| AnalysisError::load(format!("cannot create data folder: {e}")))?;
        self.clear_locked().await?;

        for file in files {
            let path = self.folder.join(&file.name);
            fs::write(&path, &file.bytes)
                .await
                .map_err(|e| AnalysisError::load(format!("cannot write {}: {e}", file.name)))?;
        }

        info!(count = files.len(), "Stored resume files");
        Ok(files.len())
    }

    /// Removes every stored PDF.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<()> {
        let _guard = self.write_guard.lock().await;
        self.clear_locked().await
    }

    async fn clear_locked(&self) -> Result<()> {
        let mut entries = match fs::read_dir(&self.folder).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => {
                return Err(AnalysisError::load(format!(
                    "cannot read {}: {e}",
                    self.folder.display()
                )))
            }
        };

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| AnalysisError::load(format!("cannot read entry: {e}")))?
        {
            let path = entry.path();
            let is_pdf = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
            if is_pdf {
                fs::remove_file(&path)
                    .await
                    .map_err(|e| AnalysisError::load(format!("cannot remove file: {e}")))?;
            }
        }

        Ok(())
    }

    fn validate(&self, file: &UploadedFile) -> Result<()> {
        let is_pdf = Path::new(&file.name)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if !is_pdf {
            return Err(AnalysisError::configuration(format!(
                "{} is not a PDF; only PDF files are accepted",
                file.name
            )));
        }
        if file.name.contains(['/', '\\']) || file.name.starts_with('.') {
            return Err(AnalysisError::configuration(format!(
                "invalid file name: {}",
                file.name
            )));
        }
        if file.bytes.len() > self.max_file_bytes {
            return Err(AnalysisError::configuration(format!(
                "{} exceeds the {} byte limit",
                file.name, self.max_file_bytes
            )));
        }
        Ok(())
    }
}
