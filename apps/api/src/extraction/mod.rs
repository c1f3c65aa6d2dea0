//! Text extraction — turns uploaded PDF/DOCX bytes into bounded plain text.

mod docx;
mod pdf;

use crate::errors::AppError;

/// Supported upload formats. Anything else is rejected up front rather
/// than falling through to a default parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

const PDF_MAGIC: &[u8] = b"%PDF-";
// A .docx file is an OOXML ZIP archive.
const ZIP_MAGIC: &[u8] = &[0x50, 0x4b, 0x03, 0x04];
const PDF_CONTENT_TYPE: &str = "application/pdf";
const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Resolves the document format from the declared filename extension,
/// falling back to the declared content type and then to content sniffing.
pub fn detect_kind(
    filename: &str,
    content_type: Option<&str>,
    bytes: &[u8],
) -> Result<DocumentKind, AppError> {
    let lower = filename.to_ascii_lowercase();
    if lower.ends_with(".pdf") {
        return Ok(DocumentKind::Pdf);
    }
    if lower.ends_with(".docx") {
        return Ok(DocumentKind::Docx);
    }

    match content_type {
        Some(PDF_CONTENT_TYPE) => return Ok(DocumentKind::Pdf),
        Some(DOCX_CONTENT_TYPE) => return Ok(DocumentKind::Docx),
        _ => {}
    }

    if bytes.starts_with(PDF_MAGIC) {
        return Ok(DocumentKind::Pdf);
    }
    if bytes.starts_with(ZIP_MAGIC) {
        return Ok(DocumentKind::Docx);
    }

    Err(AppError::Validation(format!(
        "Unsupported document format for '{filename}': expected .pdf or .docx"
    )))
}

/// Extracts plain text from the document, truncated to `max_words` tokens.
pub fn extract_text(
    kind: DocumentKind,
    bytes: &[u8],
    max_words: usize,
) -> Result<String, AppError> {
    let raw = match kind {
        DocumentKind::Pdf => pdf::extract(bytes)?,
        DocumentKind::Docx => docx::extract(bytes)?,
    };
    Ok(truncate_words(&raw, max_words))
}

/// Keeps at most `max_words` whitespace-delimited tokens, rejoined with
/// single spaces. Caps the payload sent to the embedding service.
pub fn truncate_words(text: &str, max_words: usize) -> String {
    text.split_whitespace()
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_keeps_short_text_intact() {
        assert_eq!(truncate_words("a short resume", 300), "a short resume");
    }

    #[test]
    fn test_truncate_caps_at_max_words() {
        let long: Vec<String> = (0..500).map(|i| format!("word{i}")).collect();
        let truncated = truncate_words(&long.join(" "), 300);
        assert_eq!(truncated.split_whitespace().count(), 300);
        assert!(truncated.ends_with("word299"));
    }

    #[test]
    fn test_truncate_collapses_whitespace() {
        assert_eq!(truncate_words("a\t b\n\n  c", 300), "a b c");
    }

    #[test]
    fn test_truncate_empty_input() {
        assert_eq!(truncate_words("   \n ", 300), "");
    }

    #[test]
    fn test_detect_by_extension() {
        assert_eq!(
            detect_kind("resume.pdf", None, b"").unwrap(),
            DocumentKind::Pdf
        );
        assert_eq!(
            detect_kind("Resume.PDF", None, b"").unwrap(),
            DocumentKind::Pdf
        );
        assert_eq!(
            detect_kind("resume.docx", None, b"").unwrap(),
            DocumentKind::Docx
        );
    }

    #[test]
    fn test_detect_by_content_type() {
        assert_eq!(
            detect_kind("upload", Some("application/pdf"), b"").unwrap(),
            DocumentKind::Pdf
        );
        assert_eq!(
            detect_kind("upload", Some(DOCX_CONTENT_TYPE), b"").unwrap(),
            DocumentKind::Docx
        );
    }

    #[test]
    fn test_detect_by_magic_bytes() {
        assert_eq!(
            detect_kind("upload", None, b"%PDF-1.7 rest").unwrap(),
            DocumentKind::Pdf
        );
        assert_eq!(
            detect_kind("upload", None, &[0x50, 0x4b, 0x03, 0x04, 0x00]).unwrap(),
            DocumentKind::Docx
        );
    }

    #[test]
    fn test_detect_rejects_unknown_format() {
        let err = detect_kind("resume.txt", Some("text/plain"), b"plain text").unwrap_err();
        match err {
            AppError::Validation(msg) => {
                assert!(msg.contains("resume.txt"));
                assert!(msg.contains("Unsupported document format"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_corrupt_pdf_is_extraction_error() {
        let err = extract_text(DocumentKind::Pdf, b"%PDF-1.4 not really a pdf", 300).unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }

    #[test]
    fn test_corrupt_docx_is_extraction_error() {
        let err = extract_text(DocumentKind::Docx, b"PK\x03\x04 garbage", 300).unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }
}
