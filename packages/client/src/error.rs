use common::validation::FieldErrors;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Shown when the server gives no usable message.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Error)]
pub enum ClientError {
    /// The request was cancelled by its handle or its scope. Never shown to users.
    #[error("Request canceled")]
    Canceled,

    /// The form failed local validation; nothing was sent.
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("API not reachable at {0}")]
    NotReachable(String),

    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to parse API response: {0}")]
    Decode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error payload shapes the API is known to return.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    /// Per-field messages, either `{field: message}` (a message may also be
    /// a list) or `[{field, message}]`.
    #[serde(default)]
    errors: Option<Value>,
}

fn first_message(value: &Value) -> Option<String> {
    match value {
        Value::String(m) => Some(m.clone()),
        Value::Array(items) => items.iter().find_map(|i| i.as_str().map(str::to_string)),
        _ => None,
    }
}

fn field_errors_from(value: &Value) -> FieldErrors {
    let mut errors = FieldErrors::new();
    match value {
        Value::Object(fields) => {
            for (field, message) in fields {
                if let Some(message) = first_message(message) {
                    errors.add(field.as_str(), message);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                if let (Some(field), Some(message)) = (
                    item.get("field").and_then(Value::as_str),
                    item.get("message").and_then(first_message),
                ) {
                    errors.add(field, message);
                }
            }
        }
        _ => {}
    }
    errors
}

impl ClientError {
    pub fn is_canceled(&self) -> bool {
        matches!(self, Self::Canceled)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { status: 401, .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    /// Build an error from a non-2xx response body. A 422 that names fields
    /// becomes [`ClientError::Validation`] so forms can mark them.
    pub(crate) fn from_response(status: u16, body: &[u8]) -> Self {
        let parsed = serde_json::from_slice::<ErrorBody>(body).unwrap_or_default();
        if status == 422
            && let Some(errors) = parsed.errors.as_ref().map(field_errors_from)
            && !errors.is_empty()
        {
            return Self::Validation(errors);
        }
        let message = parsed
            .message
            .or(parsed.error)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());
        Self::Api {
            status,
            code: parsed.code,
            message,
        }
    }

    /// The toast text for this error, or `None` when it must be swallowed.
    ///
    /// Server messages are passed through; everything else gets the generic text.
    pub fn notification(&self) -> Option<String> {
        match self {
            Self::Canceled => None,
            Self::Api { message, .. } => Some(message.clone()),
            Self::Validation(_) => Some("Please correct the highlighted fields.".to_string()),
            Self::NotReachable(_) | Self::Transport(_) | Self::Decode(_) | Self::Io(_) => {
                Some(GENERIC_ERROR_MESSAGE.to_string())
            }
        }
    }
}

impl From<FieldErrors> for ClientError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}
