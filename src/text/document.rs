//! Uploaded document decoding
//!
//! An upload is the raw bytes plus the file name the user picked. PDFs are run
//! through text extraction; everything else must already be UTF-8 text.

use crate::error::{ChatdocError, Result};
use std::path::Path;

/// A single user-supplied file
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Read a file from disk as if it had been uploaded
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        Ok(Self { name, bytes })
    }

    pub fn is_pdf(&self) -> bool {
        Path::new(&self.name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
    }
}

/// Turn an upload into plain text
pub fn decode(file: &UploadedFile) -> Result<String> {
    let text = if file.is_pdf() {
        log::info!("Extracting text from PDF {}", file.name);
        pdf_extract::extract_text_from_mem(&file.bytes)?
    } else {
        String::from_utf8(file.bytes.clone()).map_err(|e| {
            ChatdocError::Document(format!("{} is not valid UTF-8: {}", file.name, e))
        })?
    };

    log::info!("Decoded {} ({} characters)", file.name, text.chars().count());
    Ok(text)
}
