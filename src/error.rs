// HTTP API error types
use axum::{http::StatusCode, response::IntoResponse};
use serde_json::{json, Value};

use crate::database::manager::DatabaseError;
use crate::envelope::Envelope;

/// HTTP API error with appropriate status codes and client-friendly messages.
///
/// Every variant renders as the standard `{message, validation, data}`
/// envelope; nothing crosses the HTTP boundary unformatted.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request (missing/malformed body, unparsable path params)
    BadRequest {
        message: String,
        validation: Vec<String>,
    },

    // 401 Unauthorized (caller/owner id mismatch)
    Unauthorized {
        message: String,
        validation: Vec<String>,
    },

    // 404 Not Found (empty result set for an id-scoped lookup)
    NotFound {
        message: String,
        data: Value,
    },

    // 400 Bad Request (natural key already exists on insert; the original
    // contract uses 400 rather than 409 for duplicates)
    Conflict(String),

    // 500 Internal Server Error
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest { message, .. } => message,
            ApiError::Unauthorized { message, .. } => message,
            ApiError::NotFound { message, .. } => message,
            ApiError::Conflict(msg) => msg,
            ApiError::Internal(msg) => msg,
        }
    }

    fn into_envelope(self) -> Envelope {
        let status = self.status_code();
        match self {
            ApiError::BadRequest {
                message,
                validation,
            }
            | ApiError::Unauthorized {
                message,
                validation,
            } => Envelope::with_status(status, message, validation, json!({})),
            ApiError::NotFound { message, data } => {
                Envelope::with_status(status, message, Vec::new(), data)
            }
            ApiError::Conflict(message) | ApiError::Internal(message) => {
                Envelope::with_status(status, message, Vec::new(), json!({}))
            }
        }
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            message: message.into(),
            validation: Vec::new(),
        }
    }

    /// 400 for requests that arrive without a usable JSON body. `action` is
    /// the verb phrase shown to the caller, e.g. "add a pet".
    pub fn no_request_body(action: &str) -> Self {
        ApiError::BadRequest {
            message: "No Request Body".to_string(),
            validation: vec![format!(
                "You must submit a request body in order to {}",
                action
            )],
        }
    }

    pub fn invalid_id(value: &str) -> Self {
        ApiError::BadRequest {
            message: "Invalid Pet Id".to_string(),
            validation: vec![format!("The pet id {} is not a valid integer", value)],
        }
    }

    /// 401 when the authenticated caller id and the path-supplied owner id
    /// differ. Both ids are echoed so callers can diagnose the mismatch;
    /// this is an internal trust boundary.
    pub fn access_denied(auth_id: &str, profile_id: &str) -> Self {
        ApiError::Unauthorized {
            message: "Access Denied".to_string(),
            validation: vec![format!(
                "Your auth id {} and the route profile id {} don't match",
                auth_id, profile_id
            )],
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized {
            message: message.into(),
            validation: Vec::new(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound {
            message: message.into(),
            data: json!({}),
        }
    }

    /// 404 with an explicit `data` shape. Location lookups report `[]` while
    /// pet lookups report `{}`; the asymmetry is part of the wire contract.
    pub fn not_found_with(message: impl Into<String>, data: Value) -> Self {
        ApiError::NotFound {
            message: message.into(),
            data,
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

// Convert persistence failures to a generic 500; the real error is logged,
// never surfaced to the caller.
impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        tracing::error!("Database error: {}", err);
        ApiError::internal("Unexpected server error")
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        self.into_envelope().into_response()
    }
}
