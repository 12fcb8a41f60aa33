//! Uploaded file descriptors
//!
//! A file is registered as soon as the user picks it; its page count stays
//! unknown until the document has been parsed.

use serde::Serialize;

pub type FileId = u32;

#[derive(Debug)]
pub struct UploadedFile {
    pub id: FileId,
    pub name: String,
    pub size_bytes: usize,
    page_count: Option<u32>,
    /// Why parsing failed, if it did
    parse_error: Option<String>,
    bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn page_count(&self) -> Option<u32> {
        self.page_count
    }

    pub fn parse_error(&self) -> Option<&str> {
        self.parse_error.as_deref()
    }

    /// Record the parse outcome. Only the first outcome is kept.
    pub fn resolve(&mut self, outcome: Result<u32, String>) -> bool {
        if self.page_count.is_some() || self.parse_error.is_some() {
            return false;
        }
        match outcome {
            Ok(count) => self.page_count = Some(count),
            Err(e) => self.parse_error = Some(e),
        }
        true
    }

    pub fn summary(&self) -> FileSummary {
        FileSummary {
            id: self.id,
            name: self.name.clone(),
            size_bytes: self.size_bytes,
            page_count: self.page_count,
            error: self.parse_error.clone(),
        }
    }
}

/// File info for JS serialization
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FileSummary {
    pub id: FileId,
    pub name: String,
    pub size_bytes: usize,
    pub page_count: Option<u32>,
    pub error: Option<String>,
}

/// Files owned by a session, addressed by id
#[derive(Debug, Default)]
pub struct FileList {
    files: Vec<UploadedFile>,
    next_id: FileId,
}

impl FileList {
    pub fn add(&mut self, name: &str, bytes: Vec<u8>) -> &mut UploadedFile {
        let id = self.next_id;
        self.next_id += 1;
        self.files.push(UploadedFile {
            id,
            name: name.to_string(),
            size_bytes: bytes.len(),
            page_count: None,
            parse_error: None,
            bytes,
        });
        let last = self.files.len() - 1;
        &mut self.files[last]
    }

    pub fn get(&self, id: FileId) -> Option<&UploadedFile> {
        self.files.iter().find(|f| f.id == id)
    }

    pub fn remove(&mut self, id: FileId) -> Option<UploadedFile> {
        let pos = self.files.iter().position(|f| f.id == id)?;
        Some(self.files.remove(pos))
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Format bytes as human-readable string
pub fn format_bytes(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;

    if bytes < KB {
        format!("{} B", bytes)
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    }
}
