//! Uniform response envelope: `{success, timestamp, data | error}`.

use serde::{Deserialize, Serialize};
use toolbox_core::{utc_timestamp, ErrorCode, ErrorDetails, ToolboxError};
use utoipa::ToSchema;

/// Failure payload carried in the `error` field of an [`ApiResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorBody {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ErrorDetails>,
}

impl ApiErrorBody {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// A required request field was absent.
    pub fn missing(code: ErrorCode, field: &str) -> Self {
        Self::new(code, format!("{field} is required"))
    }
}

impl From<&ToolboxError> for ApiErrorBody {
    fn from(err: &ToolboxError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
            details: err.details(),
        }
    }
}

impl From<ToolboxError> for ApiErrorBody {
    fn from(err: ToolboxError) -> Self {
        Self::from(&err)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorBody>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            timestamp: utc_timestamp(),
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: ApiErrorBody) -> Self {
        Self {
            success: false,
            timestamp: utc_timestamp(),
            data: None,
            error: Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_omits_error() {
        let json = serde_json::to_value(ApiResponse::ok(42)).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["data"], 42);
        assert!(json.get("error").is_none());
        assert!(json["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn failure_envelope_carries_code_and_details() {
        let err = ToolboxError::InvalidFormat {
            provided: "octal".into(),
            allowed: &["hex", "base64"],
        };
        let json = serde_json::to_value(ApiResponse::<()>::failure(err.into())).unwrap();

        assert_eq!(json["success"], false);
        assert!(json.get("data").is_none());
        assert_eq!(json["error"]["code"], "INVALID_FORMAT");
        assert_eq!(json["error"]["details"]["provided"], "octal");
        assert_eq!(json["error"]["details"]["valid_options"][1], "base64");
    }

    #[test]
    fn missing_field_message() {
        let body = ApiErrorBody::missing(ErrorCode::MissingText, "text");
        assert_eq!(body.message, "text is required");
        assert!(body.details.is_none());
    }
}
