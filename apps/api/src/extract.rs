//! PDF text extraction with a degrade-not-fail contract.

use std::path::Path;

use tracing::warn;

/// Extracts the text content of a PDF document, pages concatenated in order.
///
/// Any failure — missing file, corrupt document, unsupported encoding — is
/// absorbed here and yields an empty string, so a single unreadable document
/// never aborts a screening batch. Downstream stages treat empty text as a
/// valid, low-signal input. The source file is only read, never modified.
pub fn extract_text(path: &Path) -> String {
    match pdf_extract::extract_text(path) {
        Ok(text) => text,
        Err(e) => {
            warn!("Failed to extract text from {}: {e}", path.display());
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_yields_empty_text() {
        let text = extract_text(Path::new("/nonexistent/resume.pdf"));
        assert_eq!(text, "");
    }

    #[test]
    fn test_corrupt_document_yields_empty_text() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"this is not a pdf at all").unwrap();

        let text = extract_text(file.path());
        assert_eq!(text, "");
    }

    #[test]
    fn test_extraction_does_not_remove_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"%PDF-1.4 truncated garbage").unwrap();

        let _ = extract_text(file.path());
        assert!(file.path().exists());
    }
}
