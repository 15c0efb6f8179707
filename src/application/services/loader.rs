use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::{instrument, warn};

use crate::domain::{ports::ResumeParser, AnalysisError, Document, Result};

/// Documents loaded from a folder plus non-fatal per-file warnings.
#[derive(Debug)]
pub struct LoadOutcome {
    pub documents: Vec<Document>,
    pub warnings: Vec<String>,
}

/// Reads PDF files from a data folder and extracts their page text.
///
/// A file that fails to parse, or yields no usable text, is skipped with a
/// warning; it never aborts the batch. An unreadable folder or a batch
/// with zero usable documents is a load error.
pub struct DocumentLoader {
    parser: Arc<dyn ResumeParser>,
}

impl DocumentLoader {
    pub fn new(parser: Arc<dyn ResumeParser>) -> Self {
        Self { parser }
    }

    #[instrument(skip(self), fields(folder = %folder.display()))]
    pub fn load(&self, folder: &Path) -> Result<LoadOutcome> {
        let entries = fs::read_dir(folder)
            .map_err(|e| AnalysisError::load(format!("cannot read {}: {e}", folder.display())))?;

        let mut pdf_paths = Vec::new();
        for entry in entries {
            let entry =
                entry.map_err(|e| AnalysisError::load(format!("cannot read entry: {e}")))?;
            let path = entry.path();
            let is_pdf = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
            if path.is_file() && is_pdf {
                pdf_paths.push(path);
            }
        }
        // Lexicographic order keeps document and chunk ordinals stable
        // across runs over the same folder.
        pdf_paths.sort();

        let mut documents = Vec::new();
        let mut warnings = Vec::new();

        for path in &pdf_paths {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());

            let bytes = match fs::read(path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!(file = %name, error = %e, "Skipping unreadable file");
                    warnings.push(format!("skipped {name}: {e}"));
                    continue;
                }
            };

            match self.parser.parse(&bytes) {
                Ok(pages) => {
                    let doc = Document::new(&name, pages);
                    if doc.is_blank() {
                        warn!(file = %name, "Skipping file with no extractable text");
                        warnings.push(format!("skipped {name}: no extractable text"));
                    } else {
                        documents.push(doc);
                    }
                }
                Err(e) => {
                    warn!(file = %name, error = %e, "Skipping unparsable file");
                    warnings.push(format!("skipped {name}: {e}"));
                }
            }
        }

        if documents.is_empty() {
            return Err(AnalysisError::load(format!(
                "no usable PDF documents in {}",
                folder.display()
            )));
        }

        Ok(LoadOutcome {
            documents,
            warnings,
        })
    }
}
