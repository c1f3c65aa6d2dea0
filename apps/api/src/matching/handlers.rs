//! Axum route handlers for the Match API.

use axum::extract::{Multipart, State};
use axum::Json;
use bytes::Bytes;
use tracing::{info, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::{detect_kind, extract_text};
use crate::matching::scoring::{build_match_result, cosine_similarity, MatchResult};
use crate::state::AppState;

/// One uploaded file part, as read from the multipart form.
/// Transient; lives only for the duration of the request.
struct UploadedDocument {
    filename: String,
    content_type: Option<String>,
    bytes: Bytes,
}

/// POST /match
///
/// Accepts multipart fields `resume` and `job`, extracts bounded text from
/// both, embeds them concurrently, and returns the similarity report.
pub async fn handle_match(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<MatchResult>, AppError> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("match", %request_id);

    async move {
        let (resume, job) = read_upload_parts(multipart).await?;

        let resume_text = extract_document_text(&resume, state.config.max_text_words, "resume")?;
        let job_text = extract_document_text(&job, state.config.max_text_words, "job")?;

        // Both embeddings are independent; run them concurrently.
        let (resume_embedding, job_embedding) = tokio::try_join!(
            state.embeddings.embed(&resume_text),
            state.embeddings.embed(&job_text),
        )?;

        let cosine = cosine_similarity(&resume_embedding, &job_embedding)
            .map_err(|e| AppError::Computation(e.to_string()))?;
        let result = build_match_result(cosine);

        info!(match_score = result.match_score, "match computed");

        Ok(Json(result))
    }
    .instrument(span)
    .await
}

/// Reads the `resume` and `job` parts from the form. Both must be present;
/// unrelated fields are ignored.
async fn read_upload_parts(
    mut multipart: Multipart,
) -> Result<(UploadedDocument, UploadedDocument), AppError> {
    let mut resume: Option<UploadedDocument> = None;
    let mut job: Option<UploadedDocument> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart form: {e}")))?
    {
        let Some(name) = field.name().map(String::from) else {
            continue;
        };
        if name != "resume" && name != "job" {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(String::from);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read '{name}' upload: {e}")))?;

        let doc = UploadedDocument {
            filename,
            content_type,
            bytes,
        };
        match name.as_str() {
            "resume" => resume = Some(doc),
            _ => job = Some(doc),
        }
    }

    match (resume, job) {
        (Some(r), Some(j)) => Ok((r, j)),
        _ => Err(AppError::Validation("Please upload both files".to_string())),
    }
}

/// Detects the format, extracts text, and enforces the non-empty invariant
/// the embedding client depends on. `label` names the document in errors.
fn extract_document_text(
    doc: &UploadedDocument,
    max_words: usize,
    label: &str,
) -> Result<String, AppError> {
    let kind = detect_kind(&doc.filename, doc.content_type.as_deref(), &doc.bytes)?;

    let text = match extract_text(kind, &doc.bytes, max_words) {
        Ok(t) => t,
        Err(AppError::Extraction(msg)) => {
            return Err(AppError::Extraction(format!(
                "Could not read the {label} document: {msg}"
            )))
        }
        Err(e) => return Err(e),
    };

    if text.is_empty() {
        return Err(AppError::Validation(format!(
            "No extractable text found in the {label} document"
        )));
    }

    Ok(text)
}
