use axum::{Json, extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;
use validator::ValidationErrors;

use crate::{
    dao::{quote_source::QuoteSourceError, storage::StorageError},
    state::quote_game::QuoteGameError,
};

/// Message returned for every failure whose details must stay internal.
const UNKNOWN_ERROR: &str = "unknown error";

/// Errors that can occur in service layer operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage backend is unavailable.
    #[error("storage unavailable")]
    Unavailable(#[source] StorageError),
    /// Application is running in degraded mode without storage.
    #[error("storage unavailable (degraded mode)")]
    Degraded,
    /// Game is unknown, expired or already completed.
    #[error("quote_game_id_not_found")]
    QuoteGameNotFound,
    /// Submitted quote ids do not match the game.
    #[error("invalid_quote_id")]
    InvalidQuoteId,
    /// The quote provider does not know a quote referenced by a game.
    #[error("unknown_quote_id: {0}")]
    UnknownQuoteId(i64),
    /// Talking to the quote provider failed.
    #[error("quote provider failure")]
    QuoteSource(#[source] QuoteSourceError),
    /// Invariant broken inside the service.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Corrupt(message) => ServiceError::Internal(message),
            other => ServiceError::Unavailable(other),
        }
    }
}

impl From<QuoteSourceError> for ServiceError {
    fn from(err: QuoteSourceError) -> Self {
        match err {
            QuoteSourceError::UnknownQuote { id } => ServiceError::UnknownQuoteId(id),
            other => ServiceError::QuoteSource(other),
        }
    }
}

impl From<QuoteGameError> for ServiceError {
    fn from(err: QuoteGameError) -> Self {
        match err {
            QuoteGameError::NotFound => ServiceError::QuoteGameNotFound,
            QuoteGameError::InvalidQuoteId => ServiceError::InvalidQuoteId,
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

/// A single rejected request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl From<ValidationErrors> for AppError {
    fn from(err: ValidationErrors) -> Self {
        let mut errors = err
            .field_errors()
            .into_iter()
            .flat_map(|(field, field_errors)| {
                field_errors.iter().map(move |error| FieldError {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(ToString::to_string)
                        .unwrap_or_else(|| error.code.to_string()),
                })
            })
            .collect::<Vec<_>>();
        errors.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));

        AppError::Unprocessable {
            message: "validation_failed".into(),
            errors,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(err: JsonRejection) -> Self {
        AppError::Unprocessable {
            message: "invalid_body".into(),
            errors: vec![FieldError {
                field: "body".into(),
                message: err.body_text(),
            }],
        }
    }
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Requested resource not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// Request understood but semantically invalid.
    #[error("unprocessable: {message}")]
    Unprocessable {
        message: String,
        errors: Vec<FieldError>,
    },
    /// Service unavailable or degraded.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
    /// Internal server error; the detail is logged, never returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Degraded => AppError::ServiceUnavailable("degraded mode".into()),
            ServiceError::QuoteGameNotFound | ServiceError::UnknownQuoteId(_) => {
                AppError::NotFound(err.to_string())
            }
            ServiceError::InvalidQuoteId => AppError::Unprocessable {
                message: err.to_string(),
                errors: Vec::new(),
            },
            ServiceError::Unavailable(ref source) => {
                error!(error = %source, "storage failure while serving request");
                AppError::ServiceUnavailable("storage unavailable".into())
            }
            ServiceError::QuoteSource(ref source) => {
                error!(error = %source, "quote provider failure while serving request");
                AppError::Internal(source.to_string())
            }
            ServiceError::Internal(message) => {
                error!(%message, "internal failure while serving request");
                AppError::Internal(message)
            }
        }
    }
}

/// JSON body returned for every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message, errors) = match self {
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message, Vec::new()),
            AppError::Unprocessable { message, errors } => {
                (StatusCode::UNPROCESSABLE_ENTITY, message, errors)
            }
            AppError::ServiceUnavailable(message) => {
                (StatusCode::SERVICE_UNAVAILABLE, message, Vec::new())
            }
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                UNKNOWN_ERROR.to_string(),
                Vec::new(),
            ),
        };

        (status, Json(ErrorBody { message, errors })).into_response()
    }
}
