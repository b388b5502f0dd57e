//! # API REST
//!
//! REST API implementation for the developer toolbox.
//!
//! Handles:
//! - HTTP endpoints with axum under `/api/v1`
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON envelope, status codes, CORS, request tracing)
//!
//! Uses `api-shared` for the envelope and request DTOs and `toolbox-core` for every operation.

#![warn(rust_2018_idioms)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod server;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::params::{EncodedBody, TextBody, UrlDecodeBody, UrlEncodeBody};
use api_shared::{ApiErrorBody, HealthRes};
use toolbox_core::{apikey, base64, hash, password, text, url, uuid, ErrorCode, ErrorDetails};

pub use error::ApiError;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::random_text,
        handlers::generate_password,
        handlers::password_batch,
        handlers::generate_apikey,
        handlers::apikey_batch,
        handlers::generate_hash,
        handlers::multiple_hashes,
        handlers::hash_algorithms,
        handlers::hash_algorithm_info,
        handlers::generate_uuid,
        handlers::uuid_batch,
        handlers::validate_uuid,
        handlers::uuid_versions,
        handlers::base64_encode,
        handlers::base64_decode,
        handlers::base64_validate,
        handlers::base64_info,
        handlers::url_encode,
        handlers::url_decode,
        handlers::url_validate,
        handlers::url_info,
    ),
    components(schemas(
        HealthRes,
        ApiErrorBody,
        ErrorCode,
        ErrorDetails,
        TextBody,
        EncodedBody,
        UrlEncodeBody,
        UrlDecodeBody,
        text::TextKind,
        text::GeneratedText,
        password::PasswordOptions,
        password::PasswordStrength,
        password::GeneratedPassword,
        apikey::KeyFormat,
        apikey::SecurityLevel,
        apikey::GeneratedApiKey,
        hash::HashAlgorithm,
        hash::HashOutput,
        hash::HashEntry,
        hash::MultiHashOutput,
        hash::AlgorithmInfo,
        uuid::UuidComponents,
        uuid::UuidFields,
        uuid::UuidMetadata,
        uuid::GeneratedUuid,
        uuid::UuidBatchEntry,
        uuid::UuidBatch,
        uuid::ValidatedMetadata,
        uuid::ValidUuid,
        uuid::InvalidUuid,
        uuid::UuidValidation,
        uuid::VersionInfo,
        uuid::SupportedVersions,
        base64::Base64Encoded,
        base64::Base64Decoded,
        base64::Base64FormatInfo,
        base64::Base64Validation,
        base64::Base64Info,
        url::EncodeMode,
        url::DecodeMode,
        url::UrlEncoded,
        url::UrlDecoded,
        url::UrlStatistics,
        url::UnsafeCharacter,
        url::EncodingIndicators,
        url::EncodingDetection,
        url::UrlValidation,
        url::ModeInfo,
        url::ReservedCharacters,
        url::UnsafeCharacters,
        url::PercentEncodingInfo,
        url::UrlInfo,
    )),
    tags((name = "toolbox", description = "Developer utility toolbox"))
)]
pub struct ApiDoc;

/// The `/api/v1` routes without documentation or middleware.
fn api_routes() -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/text/random", get(handlers::random_text))
        .route("/password/generate", get(handlers::generate_password))
        .route("/password/batch", get(handlers::password_batch))
        .route("/apikey/generate", get(handlers::generate_apikey))
        .route("/apikey/batch", get(handlers::apikey_batch))
        .route("/hash/generate", get(handlers::generate_hash))
        .route("/hash/multiple", get(handlers::multiple_hashes))
        .route("/hash/algorithms", get(handlers::hash_algorithms))
        .route("/hash/algorithms/:name", get(handlers::hash_algorithm_info))
        .route("/uuid/generate", get(handlers::generate_uuid))
        .route("/uuid/batch", get(handlers::uuid_batch))
        .route("/uuid/validate", get(handlers::validate_uuid))
        .route("/uuid/versions", get(handlers::uuid_versions))
        .route("/base64/encode", post(handlers::base64_encode))
        .route("/base64/decode", post(handlers::base64_decode))
        .route("/base64/validate", post(handlers::base64_validate))
        .route("/base64/info", get(handlers::base64_info))
        .route("/url/encode", post(handlers::url_encode))
        .route("/url/decode", post(handlers::url_decode))
        .route("/url/validate", post(handlers::url_validate))
        .route("/url/info", get(handlers::url_info))
}

/// Builds the full application: API routes, Swagger UI, CORS and request tracing.
///
/// Served at `/api/v1`; the OpenAPI document is at `/api-docs/openapi.json` and the UI at
/// `/swagger-ui`. Unmatched paths return a `NOT_FOUND` envelope.
pub fn router() -> Router {
    Router::new()
        .nest("/api/v1", api_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(handlers::not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(request).await
    }

    #[tokio::test]
    async fn health_is_wrapped_in_envelope() {
        let (status, body) = get_json("/api/v1/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["status"], "healthy");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn text_defaults_to_one_paragraph() {
        let (status, body) = get_json("/api/v1/text/random").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["type"], "paragraph");
        assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"]["is_array"], false);
    }

    #[tokio::test]
    async fn unknown_text_type_lists_options() {
        let (status, body) = get_json("/api/v1/text/random?type=poem").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "INVALID_TYPE");
        assert_eq!(body["error"]["details"]["provided"], "poem");
    }

    #[tokio::test]
    async fn password_with_symbols() {
        let (status, body) = get_json("/api/v1/password/generate?length=20&symbols=TRUE").await;

        assert_eq!(status, StatusCode::OK);
        let password = body["data"]["password"].as_str().unwrap();
        assert_eq!(password.len(), 20);
        assert!(password
            .chars()
            .any(|c| toolbox_core::constants::SYMBOLS.contains(c)));
    }

    #[tokio::test]
    async fn password_length_errors_are_bad_requests() {
        let (status, body) = get_json("/api/v1/password/generate?length=4").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_PARAMETER");

        let (status, body) = get_json("/api/v1/password/generate?length=abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_PARAMETER");
    }

    #[tokio::test]
    async fn password_batch_defaults_to_five() {
        let (status, body) = get_json("/api/v1/password/batch").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn base64_apikey_with_prefix() {
        let (status, body) = get_json("/api/v1/apikey/generate?format=base64&prefix=sk_&length=24").await;

        assert_eq!(status, StatusCode::OK);
        let key = body["data"]["api_key"].as_str().unwrap();
        assert!(key.starts_with("sk_"));
        assert_eq!(key.len() - 3, 32);
    }

    #[tokio::test]
    async fn unknown_apikey_format() {
        let (status, body) = get_json("/api/v1/apikey/generate?format=octal").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_FORMAT");
        assert_eq!(body["error"]["details"]["valid_options"][0], "hex");
    }

    #[tokio::test]
    async fn md5_of_test() {
        let (status, body) = get_json("/api/v1/hash/generate?text=test&algorithm=md5").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["hash"], "098f6bcd4621d373cade4e832627b4f6");
    }

    #[tokio::test]
    async fn hash_requires_text() {
        let (status, body) = get_json("/api/v1/hash/generate?algorithm=md5").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "MISSING_TEXT");
    }

    #[tokio::test]
    async fn multiple_hashes_report_inline_failures() {
        let (status, body) = get_json("/api/v1/hash/multiple?text=test&algorithms=md5,nope").await;

        assert_eq!(status, StatusCode::OK);
        let hashes = body["data"]["hashes"].as_array().unwrap();
        assert_eq!(hashes.len(), 2);
        assert!(hashes[0]["hash"].is_string());
        assert!(hashes[1]["error"].is_string());
    }

    #[tokio::test]
    async fn algorithm_info_by_path() {
        let (status, body) = get_json("/api/v1/hash/algorithms/SHA3-256").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["family"], "SHA-3");

        let (status, _) = get_json("/api/v1/hash/algorithms").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn uuid_generate_and_validate() {
        let (status, body) = get_json("/api/v1/uuid/generate?version=1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["version"], "V1");

        let (status, body) =
            get_json("/api/v1/uuid/validate?uuid=550e8400-e29b-41d4-a716-446655440000").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["is_valid"], true);
        assert_eq!(body["data"]["version"], "V4");

        let (status, body) = get_json("/api/v1/uuid/validate?uuid=invalid-uuid-format").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["is_valid"], false);
    }

    #[tokio::test]
    async fn uuid_validate_requires_uuid() {
        let (status, body) = get_json("/api/v1/uuid/validate").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "MISSING_UUID");
    }

    #[tokio::test]
    async fn uuid_batch_rejects_bad_count() {
        let (status, body) = get_json("/api/v1/uuid/batch?count=101").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_PARAMETER");
    }

    #[tokio::test]
    async fn base64_round_trip_over_http() {
        let (status, body) = post_json("/api/v1/base64/encode", json!({"text": "Hello World!"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["encoded"], "SGVsbG8gV29ybGQh");

        let (status, body) =
            post_json("/api/v1/base64/decode", json!({"encoded": "SGVsbG8gV29ybGQh"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["decoded"], "Hello World!");
    }

    #[tokio::test]
    async fn base64_body_errors() {
        let (status, body) = post_json("/api/v1/base64/decode", json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "MISSING_ENCODED");

        let (status, body) = post_json("/api/v1/base64/decode", json!({"encoded": "abc"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "DECODING_ERROR");

        let (status, body) = post_json("/api/v1/base64/encode", json!({"text": 5})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_PARAMETER");
    }

    #[tokio::test]
    async fn base64_validate_is_never_an_error() {
        let (status, body) = post_json("/api/v1/base64/validate", json!({"text": "???"})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["is_valid"], false);
    }

    #[tokio::test]
    async fn url_encode_known_vector() {
        let (status, body) =
            post_json("/api/v1/url/encode", json!({"text": "Hello World! @#$%"})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["encoded"], "Hello%20World%21%20%40%23%24%25");
        assert_eq!(body["data"]["characters_encoded"], 7);
    }

    #[tokio::test]
    async fn url_decode_auto_and_bad_type() {
        let (status, body) =
            post_json("/api/v1/url/decode", json!({"encoded": "a+b", "type": "auto"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["decoded"], "a b");
        assert_eq!(body["data"]["decoding_type"], "plus");

        let (status, body) =
            post_json("/api/v1/url/encode", json!({"text": "x", "type": "weird"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_TYPE");
    }

    #[tokio::test]
    async fn url_validate_reports_issues() {
        let (status, body) = post_json("/api/v1/url/validate", json!({"text": "50%"})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["is_valid"], false);
        assert!(!body["data"]["issues"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn info_endpoints() {
        let (status, body) = get_json("/api/v1/base64/info").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["padding_character"], "=");

        let (status, body) = get_json("/api/v1/url/info").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["standard"], "RFC 3986");

        let (status, body) = get_json("/api/v1/uuid/versions").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["total_length"], 36);
    }

    #[tokio::test]
    async fn unknown_route_is_not_found_envelope() {
        let (status, body) = get_json("/api/v1/nope").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let (status, body) = get_json("/api-docs/openapi.json").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/api/v1/url/encode"].is_object());
    }

    #[test]
    fn openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        assert_eq!(doc.paths.paths.len(), 22);
    }
}
