use crate::errors::AppError;

/// Extracts text from a PDF byte buffer, concatenating page text in page
/// order. Pages without extractable text (e.g. scanned images) contribute
/// nothing; the caller decides whether a fully empty result is acceptable.
pub fn extract(bytes: &[u8]) -> Result<String, AppError> {
    // pdf-extract panics on some malformed files; treat a panic the same
    // as a parse error so corrupt uploads map to 422 instead of killing
    // the request task.
    let result = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes));

    match result {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(AppError::Extraction(format!("Failed to parse PDF: {e}"))),
        Err(_) => Err(AppError::Extraction(
            "Failed to parse PDF: malformed document".to_string(),
        )),
    }
}
