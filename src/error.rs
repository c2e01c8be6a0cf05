// Remote API error types
use serde_json::{json, Value};

/// Message shown when the backend gave us nothing better to display
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Failure surfaced by the remote resource client.
///
/// Every variant carries a message that is safe to show to the admin; the
/// parsed backend `message`/`error` is used when present, otherwise
/// [`GENERIC_FAILURE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 403 Forbidden
    Forbidden(String),

    // 404 Not Found
    NotFound(String),

    // 409 Conflict
    Conflict(String),

    // 422 Unprocessable Entity
    UnprocessableEntity(String),

    // 5xx and anything else non-2xx
    Server { status: u16, message: String },

    // 2xx with `success: false` in the envelope
    Rejected(String),

    // no response at all
    Transport(String),

    // response body was not the JSON we expect
    MalformedBody(String),
}

impl ApiError {
    /// Build from a non-2xx status and the message parsed out of the body, if any
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| GENERIC_FAILURE.to_string());

        match status {
            400 => ApiError::BadRequest(message),
            401 => ApiError::Unauthorized(message),
            403 => ApiError::Forbidden(message),
            404 => ApiError::NotFound(message),
            409 => ApiError::Conflict(message),
            422 => ApiError::UnprocessableEntity(message),
            _ => ApiError::Server { status, message },
        }
    }

    /// HTTP status code, when one was received
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::BadRequest(_) => Some(400),
            ApiError::Unauthorized(_) => Some(401),
            ApiError::Forbidden(_) => Some(403),
            ApiError::NotFound(_) => Some(404),
            ApiError::Conflict(_) => Some(409),
            ApiError::UnprocessableEntity(_) => Some(422),
            ApiError::Server { status, .. } => Some(*status),
            ApiError::Rejected(_) | ApiError::Transport(_) | ApiError::MalformedBody(_) => None,
        }
    }

    /// Displayable message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::Forbidden(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::Conflict(msg) => msg,
            ApiError::UnprocessableEntity(msg) => msg,
            ApiError::Server { message, .. } => message,
            ApiError::Rejected(msg) => msg,
            ApiError::Transport(msg) => msg,
            ApiError::MalformedBody(msg) => msg,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::UnprocessableEntity(_) => "UNPROCESSABLE_ENTITY",
            ApiError::Server { .. } => "SERVER_ERROR",
            ApiError::Rejected(_) => "REJECTED",
            ApiError::Transport(_) => "TRANSPORT_ERROR",
            ApiError::MalformedBody(_) => "MALFORMED_BODY",
        }
    }

    /// True when the backend refused the supplied credentials
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_) | ApiError::Forbidden(_))
    }

    pub fn to_json(&self) -> Value {
        let mut body = json!({
            "success": false,
            "error": self.message(),
            "error_code": self.error_code(),
        });

        if let Some(status) = self.status_code() {
            body["status"] = json!(status);
        }

        body
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        tracing::warn!("transport error: {}", err);
        if err.is_decode() {
            ApiError::MalformedBody(GENERIC_FAILURE.to_string())
        } else {
            ApiError::Transport(GENERIC_FAILURE.to_string())
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}
