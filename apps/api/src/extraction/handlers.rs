use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::models::profile::{Certification, ExtractionMethod, ExtractionResult};
use crate::state::AppState;

/// Largest accepted source document.
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["doc", "docx", "xls", "xlsx", "txt"];

/// Text already extracted from the uploaded document, plus its file metadata.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParseDocumentRequest {
    pub text: String,
    pub file_name: Option<String>,
    /// Size of the original file; the text length is used when absent.
    pub file_size: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    pub file_name: String,
    pub file_size: u64,
    pub processed_at: DateTime<Utc>,
    pub extraction_confidence: f64,
    pub extraction_method: ExtractionMethod,
}

#[derive(Debug, Serialize)]
pub struct ParseDocumentResponse {
    pub success: bool,
    pub data: ExtractionResult,
    pub metadata: DocumentMetadata,
}

/// Lowercased extension, or `None` when there is none or it is longer than 5 characters.
pub fn file_extension(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() || ext.chars().count() > 5 {
        return None;
    }
    Some(ext.to_lowercase())
}

/// Checks run in the order the error codes are documented: name, size, type, content.
fn validate(request: &ParseDocumentRequest) -> Result<(String, u64), AppError> {
    let file_name = request
        .file_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or(AppError::NoFile)?;

    let file_size = request.file_size.unwrap_or(request.text.len() as u64);
    if file_size > MAX_FILE_SIZE {
        return Err(AppError::FileTooLarge {
            size: file_size,
            limit: MAX_FILE_SIZE,
        });
    }

    match file_extension(file_name) {
        Some(ext) if SUPPORTED_EXTENSIONS.contains(&ext.as_str()) => {}
        other => {
            return Err(AppError::InvalidFileType(
                other.unwrap_or_else(|| "unknown".to_string()),
            ))
        }
    }

    if request.text.trim().is_empty() {
        return Err(AppError::EmptyFile);
    }

    Ok((file_name.to_string(), file_size))
}

/// POST /api/v1/parse-document
pub async fn handle_parse_document(
    State(state): State<AppState>,
    payload: Result<Json<ParseDocumentRequest>, JsonRejection>,
) -> Result<Json<ParseDocumentResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::InvalidRequest(e.body_text()))?;
    let (file_name, file_size) = validate(&request)?;

    info!(
        "Parsing '{}' ({} bytes, {} characters of text)",
        file_name,
        file_size,
        request.text.chars().count()
    );

    let extraction = state.selector.extract(&request.text).await?;
    let certifications: Vec<&str> = extraction
        .result
        .certifications
        .held()
        .map(Certification::flag_name)
        .collect();
    info!(
        "Extracted {} skills from '{}' via {:?}; certifications: {:?}",
        extraction.result.skills.total(),
        file_name,
        extraction.method,
        certifications
    );

    Ok(Json(ParseDocumentResponse {
        success: true,
        metadata: DocumentMetadata {
            file_name,
            file_size,
            processed_at: Utc::now(),
            extraction_confidence: extraction.confidence(),
            extraction_method: extraction.method,
        },
        data: extraction.result,
    }))
}
