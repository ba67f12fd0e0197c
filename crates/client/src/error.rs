//! Client-side API error.

use serde_json::Value;

/// Failure of a request against the backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The backend answered with a non-success status. `body` holds its
    /// structured error payload when the response was JSON.
    #[error("HTTP {status}: {message}")]
    Server {
        status: u16,
        body: Option<Value>,
        message: String,
    },

    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    #[error("decode: {0}")]
    Decode(String),

    #[error("config: {0}")]
    Config(String),
}

impl ApiError {
    /// Build a `Server` error from a failed response's status and raw body.
    pub fn from_response(status: u16, raw: &str) -> Self {
        let body = serde_json::from_str::<Value>(raw).ok();

        let message = body
            .as_ref()
            .and_then(|b| ["message", "error", "detail"].iter().find_map(|k| b.get(*k)?.as_str()))
            .map(str::to_string)
            .unwrap_or_else(|| {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    format!("status {status}")
                } else {
                    trimmed.to_string()
                }
            });

        ApiError::Server { status, body, message }
    }

    /// The backend's structured error payload, if any.
    pub fn body(&self) -> Option<&Value> {
        match self {
            ApiError::Server { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Message suitable for a blocking alert.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Server { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_body_is_kept() {
        let err = ApiError::from_response(422, r#"{"message":"price is required","field":"price"}"#);
        assert_eq!(err.status(), Some(422));
        assert_eq!(err.body().unwrap()["field"], "price");
        assert_eq!(err.user_message(), "price is required");
    }

    #[test]
    fn plain_text_body_becomes_the_message() {
        let err = ApiError::from_response(500, "boom\n");
        assert!(err.body().is_none());
        assert_eq!(err.to_string(), "HTTP 500: boom");
    }

    #[test]
    fn empty_body_falls_back_to_status() {
        let err = ApiError::from_response(404, "");
        assert!(err.is_not_found());
        assert_eq!(err.user_message(), "status 404");
    }
}
