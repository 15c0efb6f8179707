use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One uploaded résumé, with its text extracted page by page.
///
/// A document is immutable once built; re-uploading a file produces a new
/// `Document` with a fresh id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub name: String,
    pub pages: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Document {
    pub fn new(name: impl Into<String>, pages: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            pages,
            created_at: Utc::now(),
        }
    }

    /// Full text of the document, pages joined in order.
    pub fn text(&self) -> String {
        self.pages.join("\n\n")
    }

    /// True when no page carries any non-whitespace text.
    pub fn is_blank(&self) -> bool {
        self.pages.iter().all(|p| p.trim().is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub id: Uuid,
    pub document_id: Uuid,
    pub content: String,
    pub chunk_index: usize,
    pub page: usize,
}

impl DocumentChunk {
    pub fn new(
        document_id: Uuid,
        content: impl Into<String>,
        chunk_index: usize,
        page: usize,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            document_id,
            content: content.into(),
            chunk_index,
            page,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub chunk: DocumentChunk,
    pub score: f32,
}

/// Splits a document's pages into chunks for embedding.
///
/// Chunking policy: each page is split on blank lines into paragraphs,
/// which are joined until the next paragraph would push the chunk past
/// `chunk_size` characters. A paragraph never spans two chunks, and a chunk
/// never spans two pages. Whitespace-only text produces no chunk. Chunk
/// indices are sequential across the whole document, so insertion order is
/// the page-then-position order of the source text.
pub fn chunk_pages(document_id: Uuid, pages: &[String], chunk_size: usize) -> Vec<DocumentChunk> {
    let mut chunks = Vec::new();
    let mut chunk_index = 0;

    for (page, text) in pages.iter().enumerate() {
        let paragraphs: Vec<&str> = text
            .split("\n\n")
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        let mut current = String::new();
        for paragraph in paragraphs {
            let would_exceed =
                !current.is_empty() && current.len() + paragraph.len() + 2 > chunk_size;

            if would_exceed {
                chunks.push(DocumentChunk::new(document_id, &current, chunk_index, page));
                current.clear();
                chunk_index += 1;
            }

            if !current.is_empty() {
                current.push_str("\n\n");
            }
            current.push_str(paragraph);
        }

        if !current.is_empty() {
            chunks.push(DocumentChunk::new(document_id, current, chunk_index, page));
            chunk_index += 1;
        }
    }

    chunks
}
