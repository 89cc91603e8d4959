use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::Value;

/// Uniform response body for every endpoint: `{message, validation, data}`.
///
/// `validation` carries human-readable diagnostics for authorization and
/// validation failures and is empty otherwise. `data` holds the resource
/// array on reads/creates/updates, `{}` or `[]` on not-found/error paths,
/// and a raw delete count for location deletes.
#[derive(Debug, Serialize)]
pub struct Envelope {
    #[serde(skip)]
    status: StatusCode,
    pub message: String,
    pub validation: Vec<String>,
    pub data: Value,
}

impl Envelope {
    /// A 200 response with no validation diagnostics.
    pub fn ok(message: impl Into<String>, data: Value) -> Self {
        Self::with_status(StatusCode::OK, message, Vec::new(), data)
    }

    pub fn with_status(
        status: StatusCode,
        message: impl Into<String>,
        validation: Vec<String>,
        data: Value,
    ) -> Self {
        Self {
            status,
            message: message.into(),
            validation,
            data,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        let status = self.status;
        (status, Json(self)).into_response()
    }
}
