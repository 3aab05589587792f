//! Error taxonomy for the API client.
//!
//! Only network-layer failures cross this boundary as errors; authorization
//! absence is never an error (the session store answers `false` instead).

use serde::Deserialize;

/// Failure of a single API call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP 401. The interceptor has already cleared the session by the time
    /// the caller sees this.
    #[error("authentication required")]
    Unauthorized,

    /// Structured validation messages from the server (message array).
    #[error("{}", messages.join(", "))]
    Validation { messages: Vec<String> },

    /// Any other non-success HTTP status.
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    /// Client-side timeout (fixed, no automatic retry).
    #[error("request timed out")]
    Timeout,

    /// Connection-level failure.
    #[error("network error: {0}")]
    Network(String),

    /// Response body did not match the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),
}

/// Error body shape the API uses: `message` is a string or a string array.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<MessageField>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MessageField {
    One(String),
    Many(Vec<String>),
}

impl ApiError {
    /// Classify a non-success response from its status and raw body.
    pub(crate) fn from_response(status: u16, body: &str) -> ApiError {
        if status == 401 {
            return ApiError::Unauthorized;
        }

        match serde_json::from_str::<ErrorBody>(body) {
            Ok(ErrorBody { message: Some(MessageField::Many(messages)) }) => {
                ApiError::Validation { messages }
            }
            Ok(ErrorBody { message: Some(MessageField::One(message)) }) => {
                ApiError::Status { status, message }
            }
            _ => ApiError::Status { status, message: body.trim().to_string() },
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> ApiError {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }

    /// The message a login form should show for this failure: 401 means bad
    /// credentials, validation messages are joined, everything else is a
    /// generic connectivity problem.
    pub fn login_message(&self) -> String {
        match self {
            ApiError::Unauthorized => "Email o contraseña incorrectos".to_string(),
            ApiError::Validation { messages } => messages.join(", "),
            ApiError::Status { message, .. } if !message.is_empty() => message.clone(),
            _ => "Error de conexión. Verifique su conexión a internet.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_wins_regardless_of_body() {
        assert!(matches!(ApiError::from_response(401, "whatever"), ApiError::Unauthorized));
    }

    #[test]
    fn message_array_becomes_validation() {
        let err = ApiError::from_response(400, r#"{"message":["email inválido","falta empresa"]}"#);
        match &err {
            ApiError::Validation { messages } => assert_eq!(messages.len(), 2),
            other => panic!("expected Validation, got {other:?}"),
        }
        assert_eq!(err.login_message(), "email inválido, falta empresa");
    }

    #[test]
    fn string_message_becomes_status() {
        let err = ApiError::from_response(500, r#"{"message":"se rompió"}"#);
        match err {
            ApiError::Status { status, ref message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "se rompió");
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[test]
    fn unparseable_body_keeps_raw_text() {
        let err = ApiError::from_response(502, "bad gateway");
        assert!(matches!(err, ApiError::Status { status: 502, .. }));
    }

    #[test]
    fn login_messages_classify() {
        assert_eq!(ApiError::Unauthorized.login_message(), "Email o contraseña incorrectos");
        assert_eq!(
            ApiError::Timeout.login_message(),
            "Error de conexión. Verifique su conexión a internet."
        );
        assert_eq!(
            ApiError::Network("refused".into()).login_message(),
            "Error de conexión. Verifique su conexión a internet."
        );
    }
}
