//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::db::StoreError;
use crate::ingest::IngestError;
use crate::modeling::ModelError;

/// Structured error response body for dashboard clients.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Unsupported upload: {0}")]
    UnsupportedMedia(String),
    #[error("Not enough data: have {have}, need {need}")]
    NotEnoughData { have: usize, need: usize },
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::BadRequest(detail) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", detail.clone())
            }
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, "NOT_FOUND", detail.clone()),
            ApiError::UnsupportedMedia(detail) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_MEDIA",
                detail.clone(),
            ),
            ApiError::NotEnoughData { have, need } => (
                StatusCode::CONFLICT,
                "NOT_ENOUGH_DATA",
                format!("Need at least {need} reports to train risk models, have {have}"),
            ),
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };
        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<ModelError> for ApiError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::NotEnoughReports { have, need } => {
                ApiError::NotEnoughData { have, need }
            }
            ModelError::Training(detail) => ApiError::Internal(detail),
        }
    }
}

impl From<IngestError> for ApiError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::UnsupportedFormat => {
                ApiError::UnsupportedMedia("file format not recognized".to_string())
            }
            IngestError::TooLarge => {
                ApiError::BadRequest("upload exceeds the size limit".to_string())
            }
            IngestError::OcrUnavailable(detail) => ApiError::UnsupportedMedia(detail),
            IngestError::OcrFailed(detail) => ApiError::BadRequest(detail),
            IngestError::PdfExtraction(detail) => ApiError::BadRequest(detail),
            IngestError::Io(e) => ApiError::Internal(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    #[tokio::test]
    async fn bad_request_returns_400() {
        let response = ApiError::BadRequest("invalid base64".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn not_found_returns_404() {
        let response = ApiError::NotFound("No reports for patient".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unsupported_media_returns_415() {
        let response =
            ApiError::UnsupportedMedia("file format not recognized".into()).into_response();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn not_enough_data_returns_409_with_counts() {
        let response = ApiError::NotEnoughData { have: 4, need: 10 }.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "NOT_ENOUGH_DATA");
        assert!(json["error"]["message"].as_str().unwrap().contains("10"));
    }

    #[tokio::test]
    async fn internal_hides_details() {
        let response = ApiError::Internal("sqlite exploded".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["message"], "An internal error occurred");
    }

    #[tokio::test]
    async fn model_error_maps_to_conflict() {
        let api: ApiError = ModelError::NotEnoughReports { have: 3, need: 10 }.into();
        let response = api.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn ingest_unsupported_maps_to_415() {
        let api: ApiError = IngestError::UnsupportedFormat.into();
        let response = api.into_response();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }
}
