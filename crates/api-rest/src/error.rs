use api_shared::{ApiErrorBody, ApiResponse};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use toolbox_core::{ErrorCode, ToolboxError};

/// Handler failure rendered as an error envelope.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ApiErrorBody,
}

impl ApiError {
    pub fn new(body: ApiErrorBody) -> Self {
        let status = match body.code {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            code if code.is_client_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self { status, body }
    }

    /// A required request field was absent.
    pub fn missing(code: ErrorCode, field: &str) -> Self {
        Self::new(ApiErrorBody::missing(code, field))
    }

    pub fn not_found(path: &str) -> Self {
        Self::new(ApiErrorBody::new(
            ErrorCode::NotFound,
            format!("no route for {path}"),
        ))
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<ToolboxError> for ApiError {
    fn from(err: ToolboxError) -> Self {
        Self::new(ApiErrorBody::from(&err))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(ApiErrorBody::new(
            ErrorCode::InvalidParameter,
            rejection.body_text(),
        ))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(ApiErrorBody::new(
            ErrorCode::InvalidParameter,
            rejection.body_text(),
        ))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(code = %self.body.code, "{}", self.body.message);
        }
        (self.status, Json(ApiResponse::<()>::failure(self.body))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_follows_error_code() {
        let client = ApiError::from(ToolboxError::EmptyCharset);
        assert_eq!(client.status(), StatusCode::BAD_REQUEST);

        let server = ApiError::from(ToolboxError::RequirementsExhausted { attempts: 100 });
        assert_eq!(server.status(), StatusCode::INTERNAL_SERVER_ERROR);

        assert_eq!(ApiError::not_found("/nope").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::missing(ErrorCode::MissingUuid, "uuid").status(),
            StatusCode::BAD_REQUEST
        );
    }
}
