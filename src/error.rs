//! Error types for the booking service.
//!
//! Two layers, kept deliberately separate:
//!
//! - [`BookingError`] is the domain taxonomy of the booking core
//!   (validation, uniqueness, consistency). It knows nothing about HTTP.
//! - [`AppError`] bridges domain errors to HTTP responses, implementing
//!   Axum's `IntoResponse` with a stable `{code, message, errors}` JSON
//!   body.
//!
//! Validation failures are aggregated per field rather than raised on the
//! first miss: a request with both an invalid cargo and an invalid seat
//! reports both, keyed by field name.

use crate::types::JourneyId;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Field name → human-readable failure message.
///
/// Ordered map so error payloads are deterministic.
pub type FieldErrors = BTreeMap<&'static str, String>;

/// Errors produced by the booking core.
#[derive(Debug, Error)]
pub enum BookingError {
    /// An order was submitted with no ticket requests.
    #[error("an order must contain at least one ticket")]
    EmptyOrder,

    /// A ticket request failed validation (seat address outside the
    /// train's layout, or unknown journey). `index` is the position of the
    /// offending request within the submitted batch.
    #[error("ticket {index} failed validation")]
    InvalidTicket {
        /// Zero-based position of the offending request in the batch.
        index: usize,
        /// Per-field failure messages.
        fields: FieldErrors,
    },

    /// The requested seat is already ticketed for that journey, either by
    /// a previously committed order or by an earlier request in the same
    /// batch. Detected by the store's unique constraint, not by an
    /// application-level read.
    #[error(
        "ticket {index}: seat {cargo_number}/{seat_number} on journey {journey} is already taken"
    )]
    SeatTaken {
        /// Zero-based position of the offending request in the batch.
        index: usize,
        /// Requested compartment number.
        cargo_number: i32,
        /// Requested seat number within the compartment.
        seat_number: i32,
        /// The journey the seat was requested on.
        journey: JourneyId,
    },

    /// The availability calculation observed more tickets than capacity.
    /// This never happens while the unique constraint holds; it signals a
    /// defect, not a user-facing booking failure.
    #[error(
        "journey {journey} has negative availability: capacity {capacity}, tickets {sold}"
    )]
    ConsistencyViolation {
        /// The affected journey.
        journey: JourneyId,
        /// Seat capacity of the journey's train.
        capacity: i64,
        /// Number of committed tickets observed.
        sold: i64,
    },

    /// Underlying store failure.
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Application error type for HTTP handlers.
///
/// Wraps domain errors into HTTP-friendly responses. Server-side faults are
/// logged on conversion to a response; their details are never exposed to
/// the client.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    code: String,
    /// Structured detail for field-level validation errors.
    errors: Option<serde_json::Value>,
    /// Internal error, for logging only.
    source: Option<anyhow::Error>,
}

impl AppError {
    /// Create a new application error.
    #[must_use]
    pub const fn new(status: StatusCode, message: String, code: String) -> Self {
        Self {
            status,
            message,
            code,
            errors: None,
            source: None,
        }
    }

    /// Attach a source error for logging.
    #[must_use]
    pub fn with_source(mut self, source: anyhow::Error) -> Self {
        self.source = Some(source);
        self
    }

    /// Attach structured field-level detail to the response body.
    #[must_use]
    pub fn with_errors(mut self, errors: serde_json::Value) -> Self {
        self.errors = Some(errors);
        self
    }

    /// Create a 400 Bad Request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            message.into(),
            "BAD_REQUEST".to_string(),
        )
    }

    /// Create a 401 Unauthorized error.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            message.into(),
            "UNAUTHORIZED".to_string(),
        )
    }

    /// Create a 404 Not Found error.
    #[must_use]
    pub fn not_found(resource: impl fmt::Display, id: impl fmt::Display) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            format!("{resource} with id {id} not found"),
            "NOT_FOUND".to_string(),
        )
    }

    /// Create a 400 validation error with a stable code.
    #[must_use]
    pub fn validation(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message.into(), code.into())
    }

    /// Create a 500 Internal Server Error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            message.into(),
            "INTERNAL_SERVER_ERROR".to_string(),
        )
    }

    /// The HTTP status this error maps to.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// The stable machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Error response body (JSON).
#[derive(Debug, Serialize)]
struct ErrorResponse {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            match &self.source {
                Some(source) => tracing::error!(
                    status = %self.status,
                    code = %self.code,
                    message = %self.message,
                    error = %source,
                    "Internal server error"
                ),
                None => tracing::error!(
                    status = %self.status,
                    code = %self.code,
                    message = %self.message,
                    "Internal server error"
                ),
            }
        }

        let body = ErrorResponse {
            code: self.code,
            message: self.message,
            errors: self.errors,
        };

        (self.status, Json(body)).into_response()
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::EmptyOrder => {
                Self::validation("EMPTY_ORDER", "an order must contain at least one ticket")
            }
            BookingError::InvalidTicket { index, ref fields } => {
                let message = err.to_string();
                Self::validation("VALIDATION_ERROR", message).with_errors(serde_json::json!({
                    "index": index,
                    "fields": fields,
                }))
            }
            BookingError::SeatTaken {
                index,
                cargo_number,
                seat_number,
                journey,
            } => {
                let message = err.to_string();
                Self::validation("SEAT_TAKEN", message).with_errors(serde_json::json!({
                    "index": index,
                    "cargo_number": cargo_number,
                    "seat_number": seat_number,
                    "journey": journey,
                }))
            }
            BookingError::ConsistencyViolation { .. } => {
                Self::internal("seat accounting is inconsistent").with_source(err.into())
            }
            BookingError::Database(_) => {
                Self::internal("an internal error occurred").with_source(err.into())
            }
        }
    }
}

/// Convert raw store errors on the read paths into HTTP responses.
///
/// Foreign-key violations surface as 400s (the caller referenced a record
/// that does not exist); everything else is a server fault.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db) = err.as_database_error() {
            if db.is_foreign_key_violation() {
                return Self::bad_request("referenced record does not exist");
            }
        }
        Self::internal("an internal error occurred").with_source(err.into())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal("an internal error occurred").with_source(err)
    }
}
