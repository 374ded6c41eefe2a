use thiserror::Error;

/// Fallback shown when an error carries no usable text.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,

    /// The request never got a response (connection refused, timeout, ...).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The API answered with an error status.
    #[error("Server error {status}: {}", message.as_deref().unwrap_or(GENERIC_ERROR_MESSAGE))]
    Server {
        status: u16,
        message: Option<String>,
    },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl RepositoryError {
    /// Text for an error toast.
    ///
    /// The API's own message wins, then the transport error text, then a
    /// generic fallback.
    pub fn user_message(&self) -> String {
        let text = match self {
            RepositoryError::Server { message, .. } => message.clone(),
            RepositoryError::Transport(text)
            | RepositoryError::Decode(text)
            | RepositoryError::ValidationError(text)
            | RepositoryError::Unexpected(text) => Some(text.clone()),
            RepositoryError::NotFound => Some("Not found".to_string()),
        };
        text.map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string())
    }

    /// Builds a server error from an error response body.
    ///
    /// JSON bodies contribute their `message` field; any other non-empty
    /// body is taken verbatim.
    pub fn from_response(status: u16, body: &str) -> Self {
        if status == 404 && body.trim().is_empty() {
            return RepositoryError::NotFound;
        }
        let message = match serde_json::from_str::<serde_json::Value>(body) {
            Ok(serde_json::Value::Object(map)) => map
                .get("message")
                .and_then(|value| value.as_str())
                .map(str::to_string),
            Ok(serde_json::Value::String(text)) => Some(text),
            _ => Some(body.to_string()),
        }
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty());
        RepositoryError::Server { status, message }
    }
}

#[cfg(feature = "server")]
impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RepositoryError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            RepositoryError::Server {
                status: status.as_u16(),
                message: None,
            }
        } else {
            RepositoryError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_message_wins() {
        let err = RepositoryError::from_response(400, r#"{"message": "Invalid file format", "status": 400}"#);
        assert_eq!(err.user_message(), "Invalid file format");
    }

    #[test]
    fn plain_text_body_is_used_verbatim() {
        let err = RepositoryError::from_response(500, "Member already exists");
        assert_eq!(err.user_message(), "Member already exists");
    }

    #[test]
    fn empty_bodies_fall_back() {
        let err = RepositoryError::from_response(500, "");
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
        let err = RepositoryError::from_response(502, r#"{"error": "Bad Gateway"}"#);
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
        assert_eq!(RepositoryError::from_response(404, ""), RepositoryError::NotFound);
    }

    #[test]
    fn transport_text_is_used_without_a_response() {
        let err = RepositoryError::Transport("connection refused".into());
        assert_eq!(err.user_message(), "connection refused");
    }
}
