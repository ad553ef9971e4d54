// ============================================================================
// ERRORS - API taxonomy + view-model errors
// ============================================================================

use thiserror::Error;

/// Failure surfaced by the REST collaborator or the transport.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Unauthorized ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation failure ({status}): {message}")]
    ValidationFailure { status: u16, message: String },

    #[error("Server failure: {message}")]
    ServerFailure { status: Option<u16>, message: String },
}

impl ApiError {
    /// Classify a non-2xx reply, extracting the collaborator's error message from the body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = extract_message(body).unwrap_or_else(|| default_message(status).to_string());
        match status {
            401 | 403 => ApiError::Unauthorized { status, message },
            404 => ApiError::NotFound { message },
            400 | 409 | 422 => ApiError::ValidationFailure { status, message },
            _ => ApiError::ServerFailure {
                status: Some(status),
                message,
            },
        }
    }

    /// Request never got an HTTP reply
    pub fn transport(message: impl Into<String>) -> Self {
        ApiError::ServerFailure {
            status: None,
            message: format!("Network error: {}", message.into()),
        }
    }

    /// 2xx reply whose payload does not match the expected shape
    pub fn decode(err: serde_json::Error) -> Self {
        ApiError::ServerFailure {
            status: None,
            message: format!("Parse error: {}", err),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { status, .. } => Some(*status),
            ApiError::NotFound { .. } => Some(404),
            ApiError::ValidationFailure { status, .. } => Some(*status),
            ApiError::ServerFailure { status, .. } => *status,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::Unauthorized { message, .. }
            | ApiError::NotFound { message }
            | ApiError::ValidationFailure { message, .. }
            | ApiError::ServerFailure { message, .. } => message,
        }
    }
}

fn extract_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => {
            if let Some(serde_json::Value::String(message)) = map.get("message") {
                return Some(message.clone());
            }
            // Field validation map: {"name": "must not be blank", ...}
            let mut fields: Vec<String> = map
                .iter()
                .filter_map(|(field, value)| value.as_str().map(|msg| format!("{}: {}", field, msg)))
                .collect();
            if fields.is_empty() {
                return None;
            }
            fields.sort();
            Some(fields.join(", "))
        }
        Ok(serde_json::Value::String(message)) => Some(message),
        Ok(_) => None,
        Err(_) => Some(body.to_string()),
    }
}

fn default_message(status: u16) -> &'static str {
    match status {
        400 => "Bad request",
        401 => "Authentication required",
        403 => "Access denied",
        404 => "Resource not found",
        409 => "Conflict",
        422 => "Unprocessable entity",
        500..=599 => "An unexpected error occurred",
        _ => "Unexpected response",
    }
}

/// Errors returned by view-model actions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("No authenticated user")]
    NotAuthenticated,

    #[error("Action requires admin rights: {0}")]
    Forbidden(&'static str),

    #[error("Invalid form: {0}")]
    InvalidForm(String),

    #[error("'{action}' is not available on the {page} page")]
    Unavailable { action: &'static str, page: &'static str },
}
