use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::errors::AppError;

/// Extracts raw text from a .docx byte buffer.
///
/// A .docx file is a ZIP archive whose document body lives in
/// `word/document.xml`, with text runs in `<w:t>` elements. Formatting is
/// discarded; paragraph breaks, tabs, and line breaks become single spaces
/// (downstream truncation normalizes whitespace anyway).
pub fn extract(bytes: &[u8]) -> Result<String, AppError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| AppError::Extraction(format!("Failed to open DOCX archive: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| AppError::Extraction(format!("DOCX missing document body: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| AppError::Extraction(format!("Failed to read DOCX body: {e}")))?;

    parse_document_xml(&xml)
}

fn parse_document_xml(xml: &str) -> Result<String, AppError> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"w:t" => in_text_run = true,
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => text.push(' '),
                _ => {}
            },
            Ok(Event::Empty(e)) if matches!(e.name().as_ref(), b"w:tab" | b"w:br") => {
                text.push(' ')
            }
            Ok(Event::Text(t)) if in_text_run => {
                let run = t
                    .unescape()
                    .map_err(|e| AppError::Extraction(format!("Invalid DOCX text run: {e}")))?;
                text.push_str(&run);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(AppError::Extraction(format!(
                    "Failed to parse DOCX XML: {e}"
                )))
            }
        }
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::FileOptions;

    /// Builds a minimal in-memory .docx containing the given document XML.
    fn docx_fixture(document_xml: &str) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buf);
            writer
                .start_file("word/document.xml", FileOptions::default())
                .unwrap();
            writer.write_all(document_xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }
        buf.into_inner()
    }

    const TWO_PARAGRAPHS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
        <w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
          <w:body>
            <w:p><w:r><w:t>Senior Rust Engineer</w:t></w:r></w:p>
            <w:p><w:r><w:t>5 years experience</w:t></w:r></w:p>
          </w:body>
        </w:document>"#;

    #[test]
    fn test_extracts_text_runs_from_paragraphs() {
        let bytes = docx_fixture(TWO_PARAGRAPHS);
        let text = extract(&bytes).unwrap();
        assert!(text.contains("Senior Rust Engineer"));
        assert!(text.contains("5 years experience"));
        // Paragraph boundary must not glue words together
        assert!(text.contains("Engineer 5"));
    }

    #[test]
    fn test_unescapes_xml_entities() {
        let xml = r#"<w:document xmlns:w="ns"><w:body>
            <w:p><w:r><w:t>C&amp;C++ developer</w:t></w:r></w:p>
        </w:body></w:document>"#;
        let text = extract(&docx_fixture(xml)).unwrap();
        assert!(text.contains("C&C++ developer"));
    }

    #[test]
    fn test_ignores_text_outside_runs() {
        let xml = r#"<w:document xmlns:w="ns"><w:body>
            <w:p><w:pPr>style noise</w:pPr><w:r><w:t>real text</w:t></w:r></w:p>
        </w:body></w:document>"#;
        let text = extract(&docx_fixture(xml)).unwrap();
        assert!(text.contains("real text"));
        assert!(!text.contains("style noise"));
    }

    #[test]
    fn test_not_a_zip_fails_cleanly() {
        let err = extract(b"this is not a zip archive").unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }

    #[test]
    fn test_zip_without_document_body_fails_cleanly() {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buf);
            writer
                .start_file("word/other.xml", FileOptions::default())
                .unwrap();
            writer.write_all(b"<x/>").unwrap();
            writer.finish().unwrap();
        }
        let err = extract(&buf.into_inner()).unwrap_err();
        match err {
            AppError::Extraction(msg) => assert!(msg.contains("missing document body")),
            other => panic!("expected extraction error, got {other:?}"),
        }
    }
}
