use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::error::ExtractionError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Request body is not valid JSON: {0}")]
    InvalidRequest(String),

    #[error("No file name supplied")]
    NoFile,

    #[error("File is {size} bytes, limit is {limit}")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("Unsupported file type: {0}")]
    InvalidFileType(String),

    #[error("Document text is empty")]
    EmptyFile,

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Extraction(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidRequest(_) => "INVALID_REQUEST",
            AppError::NoFile => "NO_FILE",
            AppError::FileTooLarge { .. } => "FILE_TOO_LARGE",
            AppError::InvalidFileType(_) => "INVALID_FILE_TYPE",
            AppError::EmptyFile => "EMPTY_FILE",
            AppError::Extraction(_) | AppError::Internal(_) => "PROCESSING_ERROR",
        }
    }

    /// User-facing message. Server-side failures never leak their cause.
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidRequest(_) => "リクエストの形式が正しくありません。".to_string(),
            AppError::NoFile => "ファイルがアップロードされていません。".to_string(),
            AppError::FileTooLarge { .. } => {
                "ファイルサイズが大きすぎます。10MB以下のファイルをアップロードしてください。"
                    .to_string()
            }
            AppError::InvalidFileType(ext) => format!(
                "サポートされていないファイル形式です（{ext}）。Word、Excel、またはテキストファイルをアップロードしてください。"
            ),
            AppError::EmptyFile => "ファイルから内容を抽出できませんでした。".to_string(),
            AppError::Extraction(_) | AppError::Internal(_) => {
                "ファイルの処理中にエラーが発生しました。".to_string()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Extraction(e) => tracing::error!("Extraction error: {e}"),
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
            other => tracing::debug!("Rejected request: {other}"),
        }

        let body = Json(json!({
            "success": false,
            "error": {
                "code": self.code(),
                "message": self.user_message()
            }
        }));

        (self.status(), body).into_response()
    }
}
