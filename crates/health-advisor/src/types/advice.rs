//! Request and response types for the advice endpoint

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Outcome of one advice turn, the only value crossing the endpoint boundary
///
/// Serialized as `{"status": "success", "response": ...}` or
/// `{"status": "error", "message": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AdviceResult {
    /// Generated answer (or guidance/fallback text)
    Success {
        /// Text to display to the user
        response: String,
    },
    /// Diagnostic message for a failed turn
    Error {
        /// Human-readable failure description
        message: String,
    },
}

impl AdviceResult {
    /// Create a success envelope
    pub fn success(response: impl Into<String>) -> Self {
        Self::Success {
            response: response.into(),
        }
    }

    /// Create an error envelope
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The response text, if this is a success
    pub fn response(&self) -> Option<&str> {
        match self {
            Self::Success { response } => Some(response),
            Self::Error { .. } => None,
        }
    }

    /// The error message, if this is an error
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Error { message } => Some(message),
        }
    }
}

/// A single uploaded file accompanying a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    filename: String,
    data: Bytes,
}

impl Attachment {
    /// Create an attachment from a declared filename and its bytes
    pub fn new(filename: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            data: data.into(),
        }
    }

    /// Filename as declared by the client
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Raw file bytes
    pub fn data(&self) -> &Bytes {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_wire_format() {
        let json = serde_json::to_value(AdviceResult::success("Drink water.")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "success", "response": "Drink water."})
        );
    }

    #[test]
    fn test_error_wire_format() {
        let json = serde_json::to_value(AdviceResult::error("Error: boom")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "error", "message": "Error: boom"})
        );
    }

    #[test]
    fn test_parse_error_envelope() {
        let result: AdviceResult =
            serde_json::from_str(r#"{"status":"error","message":"quota"}"#).unwrap();
        assert!(!result.is_success());
        assert_eq!(result.message(), Some("quota"));
        assert_eq!(result.response(), None);
    }
}
