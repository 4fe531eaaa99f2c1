//! File conversion — turns uploaded resume files into plain text for the parser.
//!
//! Text and Markdown are decoded as-is (lossy UTF-8). PDFs (`pdf-extract`)
//! and DOCX (`docx-rs`) are read on a blocking thread and then normalised.
//! A binary document that yields no text is rejected rather than parsed
//! as an empty resume.

pub mod docx;
pub mod normalize;

use std::fmt;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

pub use normalize::normalize_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Docx,
    Txt,
    Md,
}

impl FileType {
    /// Parses an explicit type string or extension (`pdf`, `.PDF`, `markdown`, ...).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "pdf" => Some(FileType::Pdf),
            "docx" => Some(FileType::Docx),
            "txt" | "text" => Some(FileType::Txt),
            "md" | "markdown" => Some(FileType::Md),
            _ => None,
        }
    }

    pub fn from_file_name(name: &str) -> Option<Self> {
        Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::parse)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Pdf => "pdf",
            FileType::Docx => "docx",
            FileType::Txt => "txt",
            FileType::Md => "md",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),
}

const NO_TEXT: &str = "no extractable text";

/// Converts raw file bytes into text the parser can consume.
pub async fn convert_to_text(bytes: Vec<u8>, file_type: FileType) -> Result<String, ConvertError> {
    let text = match file_type {
        FileType::Txt | FileType::Md => String::from_utf8_lossy(&bytes).into_owned(),
        FileType::Pdf => {
            let raw = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
                .await
                .map_err(|e| ConvertError::Pdf(format!("extraction task failed: {e}")))?
                .map_err(|e| ConvertError::Pdf(e.to_string()))?;
            require_text(&raw, file_type)?
        }
        FileType::Docx => {
            let raw = tokio::task::spawn_blocking(move || docx::extract_docx_text(&bytes))
                .await
                .map_err(|e| ConvertError::Docx(format!("extraction task failed: {e}")))??;
            require_text(&raw, file_type)?
        }
    };
    debug!(file_type = %file_type, chars = text.len(), "Converted upload to text");
    Ok(text)
}

/// Normalises extracted document text; a document with nothing left is an error.
fn require_text(raw: &str, file_type: FileType) -> Result<String, ConvertError> {
    let text = normalize_text(raw);
    if !text.is_empty() {
        return Ok(text);
    }
    warn!(file_type = %file_type, "Document produced no extractable text");
    let reason = NO_TEXT.to_string();
    Err(match file_type {
        FileType::Docx => ConvertError::Docx(reason),
        _ => ConvertError::Pdf(reason),
    })
}
