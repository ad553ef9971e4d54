use serde::Serialize;
use serde_json::{json, Value};

use crate::error::ApiError;

/// Remote data as seen by a screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState<T> {
    Loading,
    Ready(T),
    Failed(ApiError),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Loading
    }
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            LoadState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

impl<T: Serialize> LoadState<T> {
    /// `{"status": "loading" | "ready" | "failed", ...}` for the host page
    pub fn to_json(&self) -> Value {
        match self {
            LoadState::Loading => json!({ "status": "loading" }),
            LoadState::Ready(value) => match serde_json::to_value(value) {
                Ok(data) => json!({ "status": "ready", "data": data }),
                Err(e) => json!({ "status": "failed", "error": format!("Serialization error: {}", e) }),
            },
            LoadState::Failed(err) => json!({
                "status": "failed",
                "error": err.message(),
                "code": err.status(),
            }),
        }
    }
}

impl<T> From<Result<T, ApiError>> for LoadState<T> {
    fn from(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => LoadState::Ready(value),
            Err(err) => LoadState::Failed(err),
        }
    }
}
