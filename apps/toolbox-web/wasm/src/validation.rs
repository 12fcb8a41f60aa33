//! PDF validation and info extraction
//!
//! Runs when a file is added, so the UI can show page count and basic
//! metadata before the user starts an operation.

use lopdf::Document;
use serde::Serialize;

/// PDF file information extracted during validation
#[derive(Debug, Clone, Serialize, Default)]
pub struct PdfInfo {
    /// Number of pages in the document
    pub page_count: u32,
    /// PDF version string (e.g., "1.7")
    pub version: String,
    /// Whether the document is encrypted
    pub encrypted: bool,
    /// File size in bytes
    pub size_bytes: usize,
    /// Document title from metadata (if available)
    pub title: Option<String>,
    /// Document author from metadata (if available)
    pub author: Option<String>,
}

/// Validate a PDF file and extract basic info
pub fn validate_pdf(bytes: &[u8]) -> Result<PdfInfo, String> {
    quick_check_header(bytes)?;

    let version = extract_version(bytes);
    let document = Document::load_mem(bytes).map_err(|e| format!("Failed to parse PDF: {}", e))?;

    let page_count = document.get_pages().len() as u32;
    if page_count == 0 {
        return Err("PDF has no pages".to_string());
    }

    let (title, author) = extract_metadata(&document);

    Ok(PdfInfo {
        page_count,
        version,
        encrypted: document.is_encrypted(),
        size_bytes: bytes.len(),
        title,
        author,
    })
}

fn quick_check_header(bytes: &[u8]) -> Result<(), String> {
    if bytes.len() < 8 {
        return Err("File too small to be a valid PDF".to_string());
    }
    if !bytes.starts_with(b"%PDF-") {
        return Err("Not a valid PDF file (missing %PDF- header)".to_string());
    }
    Ok(())
}

/// Extract PDF version from header
fn extract_version(bytes: &[u8]) -> String {
    // Header format: %PDF-1.7
    bytes
        .get(5..8)
        .and_then(|v| std::str::from_utf8(v).ok())
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| "1.4".to_string())
}

/// Extract title and author from the trailer's Info dictionary
fn extract_metadata(document: &Document) -> (Option<String>, Option<String>) {
    let Some(info) = document
        .trailer
        .get(b"Info")
        .and_then(|r| r.as_reference())
        .ok()
        .and_then(|id| document.get_dictionary(id).ok())
    else {
        return (None, None);
    };

    let field = |key: &[u8]| {
        info.get(key)
            .and_then(|o| o.as_str())
            .ok()
            .map(|b| String::from_utf8_lossy(b).into_owned())
            .filter(|s| !s.is_empty())
    };

    (field(b"Title"), field(b"Author"))
}

/// Quick validation without full parsing (for large files)
pub fn quick_validate(bytes: &[u8]) -> Result<(), String> {
    quick_check_header(bytes)?;

    // EOF marker should be near the end
    let tail = &bytes[bytes.len().saturating_sub(1024)..];
    if !tail.windows(5).any(|w| w == b"%%EOF") {
        return Err("PDF appears truncated (missing %%EOF marker)".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::create_test_pdf;

    #[test]
    fn test_quick_validate_rejects_non_pdf() {
        assert!(quick_validate(b"not a pdf file").is_err());
    }

    #[test]
    fn test_quick_validate_rejects_small_file() {
        assert!(quick_validate(b"tiny").is_err());
    }

    #[test]
    fn test_quick_validate_accepts_valid_pdf() {
        let pdf = create_test_pdf(1);
        assert!(quick_validate(&pdf).is_ok());
    }

    #[test]
    fn test_validate_pdf_returns_page_count_and_version() {
        let pdf = create_test_pdf(5);
        let info = validate_pdf(&pdf).unwrap();
        assert_eq!(info.page_count, 5);
        assert_eq!(info.version, "1.7");
        assert_eq!(info.size_bytes, pdf.len());
        assert!(!info.encrypted);
    }

    #[test]
    fn test_validate_pdf_rejects_invalid_data() {
        assert!(validate_pdf(b"not a valid pdf").is_err());
        assert!(validate_pdf(b"%PDF-1.7 truncated").is_err());
    }

    #[test]
    fn test_extract_version() {
        assert_eq!(extract_version(b"%PDF-1.7\n"), "1.7");
        assert_eq!(extract_version(b"%PDF-2.0\n"), "2.0");
        assert_eq!(extract_version(b"%PDF"), "1.4");
    }

    #[test]
    fn test_quick_validate_rejects_truncated_file() {
        let pdf = create_test_pdf(2);
        let cut = pdf.len() - 10;
        assert!(quick_validate(&pdf[..cut]).is_err());
    }

    #[test]
    fn test_validate_pdf_reads_title_and_author() {
        let mut doc = Document::load_mem(&create_test_pdf(1)).unwrap();
        let info_id = doc.add_object(lopdf::Dictionary::from_iter(vec![
            ("Title", lopdf::Object::string_literal("Quarterly Report")),
            ("Author", lopdf::Object::string_literal("")),
        ]));
        doc.trailer.set("Info", lopdf::Object::Reference(info_id));
        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();

        let info = validate_pdf(&bytes).unwrap();
        assert_eq!(info.title.as_deref(), Some("Quarterly Report"));
        assert_eq!(info.author, None);

        let plain = validate_pdf(&create_test_pdf(1)).unwrap();
        assert_eq!(plain.title, None);
    }
}
