//! PDF provider for extracting text from PDF files

use crate::error::{DocloomError, Result};
use crate::ingest::{SourceItem, SourceProvider};
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Provider that extracts text from every PDF under a directory
pub struct PdfProvider;

impl Default for PdfProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProvider {
    /// Create a new PdfProvider
    pub fn new() -> Self {
        Self
    }

    /// Extract text from a PDF file
    fn extract_text(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).map_err(|e| {
            DocloomError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read PDF file {:?}: {}", path, e),
            ))
        })?;

        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            DocloomError::Parse(format!("Failed to extract text from PDF {:?}: {}", path, e))
        })?;

        if text.trim().is_empty() {
            return Err(DocloomError::Parse(format!(
                "PDF file {:?} contains no extractable text (may be image-based)",
                path
            )));
        }

        Ok(text)
    }

    /// Extract title from PDF text content, falling back to the filename
    fn extract_title(&self, content: &str, filename: &str) -> String {
        let first_line = content
            .lines()
            .map(|l| l.trim())
            .find(|l| !l.is_empty())
            .unwrap_or("");

        if !first_line.is_empty() && first_line.len() < 200 {
            return first_line.to_string();
        }

        Path::new(filename)
            .file_stem()
            .and_then(|s| s.to_str())
            .map(|s| s.replace('_', " ").replace('-', " "))
            .unwrap_or_else(|| "Untitled PDF".to_string())
    }

    /// Scan directory for PDF files
    fn scan_directory(&self, base_path: &Path) -> Result<Vec<PathBuf>> {
        let mut pdf_files = Vec::new();

        for entry in WalkDir::new(base_path)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !e.file_name().to_string_lossy().starts_with('.'))
        {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if let Some(ext) = path.extension() {
                if ext.eq_ignore_ascii_case("pdf") {
                    pdf_files.push(path.to_path_buf());
                }
            }
        }

        Ok(pdf_files)
    }
}

#[async_trait]
impl SourceProvider for PdfProvider {
    fn provider_type(&self) -> &'static str {
        "pdf"
    }

    async fn list_items(&self, base_path: &Path) -> Result<Vec<SourceItem>> {
        if !base_path.exists() {
            return Err(DocloomError::InvalidInput(format!(
                "Path does not exist: {}",
                base_path.display()
            )));
        }

        let pdf_files = self.scan_directory(base_path)?;

        let mut items = Vec::new();
        for pdf_path in pdf_files {
            match self.extract_text(&pdf_path) {
                Ok(content) => {
                    let source = pdf_path
                        .strip_prefix(base_path)
                        .unwrap_or(&pdf_path)
                        .to_string_lossy()
                        .to_string();
                    let title = self.extract_title(&content, &source);
                    items.push(SourceItem::new(source, title, content));
                }
                Err(e) => {
                    tracing::warn!("Skipping PDF {:?}: {}", pdf_path, e);
                }
            }
        }

        Ok(items)
    }
}
