use crate::messages::MESSAGES;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fixrag::{FileError, KbError, ModelError};
use serde_json::json;
use tracing::error;

/// A custom error type for the server application.
///
/// This enum encapsulates every failure a diagnosis request can hit,
/// allowing each to be converted into the appropriate HTTP response.
pub enum AppError {
    /// A required text field is missing or empty.
    Validation { field: &'static str },
    /// An attachment failed size or media-type validation.
    Attachment(FileError),
    /// The knowledge base could not be fetched or processed.
    KnowledgeBase(KbError),
    /// The model provider reported a failure.
    Model(ModelError),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

impl From<FileError> for AppError {
    fn from(err: FileError) -> Self {
        AppError::Attachment(err)
    }
}

impl From<KbError> for AppError {
    fn from(err: KbError) -> Self {
        AppError::KnowledgeBase(err)
    }
}

impl From<ModelError> for AppError {
    fn from(err: ModelError) -> Self {
        AppError::Model(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message, details) = match self {
            AppError::Validation { field } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                MESSAGES.missing_field,
                format!("Field '{field}' is required."),
            ),
            AppError::Attachment(err) => {
                error!("Attachment rejected: {err}");
                let status = match &err {
                    FileError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
                    FileError::UnsupportedType { .. } => StatusCode::BAD_REQUEST,
                };
                let message = match &err {
                    FileError::TooLarge { .. } => MESSAGES.attachment_too_large,
                    FileError::UnsupportedType { .. } => MESSAGES.attachment_unsupported_type,
                };
                (status, message, err.to_string())
            }
            AppError::KnowledgeBase(err) => {
                error!("Knowledge base error: {err}");
                let message = match &err {
                    KbError::LoadFailed(_) => MESSAGES.kb_load_failed,
                    KbError::ProcessFailed(_) => MESSAGES.kb_process_failed,
                };
                (StatusCode::SERVICE_UNAVAILABLE, message, err.to_string())
            }
            AppError::Model(err) => {
                error!("Model provider error: {err}");
                let (status, message) = match &err {
                    ModelError::RegionRestricted => {
                        (StatusCode::FORBIDDEN, MESSAGES.model_region_restricted)
                    }
                    ModelError::InvalidCredentials => {
                        (StatusCode::FORBIDDEN, MESSAGES.model_invalid_credentials)
                    }
                    _ => (StatusCode::INTERNAL_SERVER_ERROR, MESSAGES.model_failed),
                };
                (status, message, err.to_string())
            }
            AppError::Internal(err) => {
                error!("Internal server error: {err:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    MESSAGES.internal,
                    err.to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
            "details": details,
        }));

        (status_code, body).into_response()
    }
}
