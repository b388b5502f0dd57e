//! Request handlers for `/api/v1`.
//!
//! Each handler parses its inputs, calls the matching `toolbox-core` operation and wraps the
//! result in the response envelope. Failures become [`ApiError`]s.

use crate::error::ApiError;
use api_shared::params::{
    parse_usize, ApiKeyQuery, EncodedBody, HashQuery, MultiHashQuery, PasswordQuery, TextBody,
    TextQuery, UrlDecodeBody, UrlEncodeBody, UuidQuery, UuidValidateQuery,
};
use api_shared::{ApiErrorBody, ApiResponse, HealthRes, HealthService};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::http::Uri;
use axum::Json;
use toolbox_core::apikey::{self, GeneratedApiKey};
use toolbox_core::base64::{self, Base64Decoded, Base64Encoded, Base64Info, Base64Validation};
use toolbox_core::hash::{self, AlgorithmInfo, HashOutput, MultiHashOutput};
use toolbox_core::password::{self, GeneratedPassword};
use toolbox_core::text::{GeneratedText, TextGenerator, TextKind};
use toolbox_core::url::{self, UrlDecoded, UrlEncoded, UrlInfo, UrlValidation};
use toolbox_core::uuid::{self, GeneratedUuid, SupportedVersions, UuidBatch, UuidValidation};
use toolbox_core::ErrorCode;

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

fn ok<T>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::ok(data)))
}

#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks.
#[axum::debug_handler]
pub async fn health() -> ApiResult<HealthRes> {
    ok(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/api/v1/text/random",
    params(TextQuery),
    responses(
        (status = 200, description = "Generated filler text", body = GeneratedText),
        (status = 400, description = "Invalid type or count", body = ApiErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn random_text(query: Result<Query<TextQuery>, QueryRejection>) -> ApiResult<GeneratedText> {
    let Query(query) = query?;
    let kind = match query.kind.as_deref() {
        Some(k) => k.parse()?,
        None => TextKind::Paragraph,
    };
    let count = parse_usize("count", query.count.as_deref(), 1)?;

    ok(TextGenerator::new().generate(kind, count)?)
}

#[utoipa::path(
    get,
    path = "/api/v1/password/generate",
    params(PasswordQuery),
    responses(
        (status = 200, description = "Generated password", body = GeneratedPassword),
        (status = 400, description = "Invalid parameters", body = ApiErrorBody),
        (status = 500, description = "Requirements could not be met", body = ApiErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn generate_password(
    query: Result<Query<PasswordQuery>, QueryRejection>,
) -> ApiResult<GeneratedPassword> {
    let Query(query) = query?;
    ok(password::generate(&query.options()?)?)
}

#[utoipa::path(
    get,
    path = "/api/v1/password/batch",
    params(PasswordQuery),
    responses(
        (status = 200, description = "Generated passwords", body = [GeneratedPassword]),
        (status = 400, description = "Invalid parameters", body = ApiErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn password_batch(
    query: Result<Query<PasswordQuery>, QueryRejection>,
) -> ApiResult<Vec<GeneratedPassword>> {
    let Query(query) = query?;
    let options = query.options()?;
    ok(password::generate_multiple(query.count()?, &options)?)
}

#[utoipa::path(
    get,
    path = "/api/v1/apikey/generate",
    params(ApiKeyQuery),
    responses(
        (status = 200, description = "Generated API key", body = GeneratedApiKey),
        (status = 400, description = "Invalid format or length", body = ApiErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn generate_apikey(
    query: Result<Query<ApiKeyQuery>, QueryRejection>,
) -> ApiResult<GeneratedApiKey> {
    let Query(query) = query?;
    ok(apikey::generate(&query.options()?)?)
}

#[utoipa::path(
    get,
    path = "/api/v1/apikey/batch",
    params(ApiKeyQuery),
    responses(
        (status = 200, description = "Generated API keys", body = [GeneratedApiKey]),
        (status = 400, description = "Invalid parameters", body = ApiErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn apikey_batch(
    query: Result<Query<ApiKeyQuery>, QueryRejection>,
) -> ApiResult<Vec<GeneratedApiKey>> {
    let Query(query) = query?;
    let options = query.options()?;
    ok(apikey::generate_multiple(query.count()?, &options)?)
}

#[utoipa::path(
    get,
    path = "/api/v1/hash/generate",
    params(HashQuery),
    responses(
        (status = 200, description = "Digest of the text", body = HashOutput),
        (status = 400, description = "Missing text or unknown algorithm", body = ApiErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn generate_hash(query: Result<Query<HashQuery>, QueryRejection>) -> ApiResult<HashOutput> {
    let Query(query) = query?;
    let text = query
        .text
        .ok_or_else(|| ApiError::missing(ErrorCode::MissingText, "text"))?;
    let algorithm = query.algorithm.as_deref().unwrap_or("sha256");

    ok(hash::hash(&text, algorithm)?)
}

#[utoipa::path(
    get,
    path = "/api/v1/hash/multiple",
    params(MultiHashQuery),
    responses(
        (status = 200, description = "Digests per algorithm", body = MultiHashOutput),
        (status = 400, description = "Missing text", body = ApiErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn multiple_hashes(
    query: Result<Query<MultiHashQuery>, QueryRejection>,
) -> ApiResult<MultiHashOutput> {
    let Query(query) = query?;
    let algorithms = query.algorithm_list();
    let text = query
        .text
        .ok_or_else(|| ApiError::missing(ErrorCode::MissingText, "text"))?;

    ok(hash::multiple_hashes(&text, &algorithms))
}

#[utoipa::path(
    get,
    path = "/api/v1/hash/algorithms",
    responses(
        (status = 200, description = "Supported algorithm names", body = [String])
    )
)]
#[axum::debug_handler]
pub async fn hash_algorithms() -> ApiResult<Vec<String>> {
    ok(hash::supported_algorithms())
}

#[utoipa::path(
    get,
    path = "/api/v1/hash/algorithms/{name}",
    params(("name" = String, Path, description = "Algorithm name, e.g. sha3_256")),
    responses(
        (status = 200, description = "Algorithm description", body = AlgorithmInfo),
        (status = 400, description = "Unknown algorithm", body = ApiErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn hash_algorithm_info(Path(name): Path<String>) -> ApiResult<AlgorithmInfo> {
    ok(hash::algorithm_info(&name)?)
}

#[utoipa::path(
    get,
    path = "/api/v1/uuid/generate",
    params(UuidQuery),
    responses(
        (status = 200, description = "Generated UUID", body = GeneratedUuid),
        (status = 400, description = "Unsupported version", body = ApiErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn generate_uuid(query: Result<Query<UuidQuery>, QueryRejection>) -> ApiResult<GeneratedUuid> {
    let Query(query) = query?;
    ok(uuid::generate(query.version())?)
}

#[utoipa::path(
    get,
    path = "/api/v1/uuid/batch",
    params(UuidQuery),
    responses(
        (status = 200, description = "Generated UUIDs", body = UuidBatch),
        (status = 400, description = "Invalid version or count", body = ApiErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn uuid_batch(query: Result<Query<UuidQuery>, QueryRejection>) -> ApiResult<UuidBatch> {
    let Query(query) = query?;
    ok(uuid::generate_multiple(query.version(), query.count()?)?)
}

#[utoipa::path(
    get,
    path = "/api/v1/uuid/validate",
    params(UuidValidateQuery),
    responses(
        (status = 200, description = "Validation result (valid or not)", body = UuidValidation),
        (status = 400, description = "Missing uuid", body = ApiErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn validate_uuid(
    query: Result<Query<UuidValidateQuery>, QueryRejection>,
) -> ApiResult<UuidValidation> {
    let Query(query) = query?;
    let input = query
        .uuid
        .ok_or_else(|| ApiError::missing(ErrorCode::MissingUuid, "uuid"))?;

    ok(uuid::validate(&input))
}

#[utoipa::path(
    get,
    path = "/api/v1/uuid/versions",
    responses(
        (status = 200, description = "Supported UUID versions", body = SupportedVersions)
    )
)]
#[axum::debug_handler]
pub async fn uuid_versions() -> ApiResult<SupportedVersions> {
    ok(uuid::supported_versions())
}

#[utoipa::path(
    post,
    path = "/api/v1/base64/encode",
    request_body = TextBody,
    responses(
        (status = 200, description = "Encoded text", body = Base64Encoded),
        (status = 400, description = "Missing or empty text", body = ApiErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn base64_encode(body: Result<Json<TextBody>, JsonRejection>) -> ApiResult<Base64Encoded> {
    let Json(body) = body?;
    let text = body
        .text
        .ok_or_else(|| ApiError::missing(ErrorCode::MissingText, "text"))?;

    ok(base64::encode(&text)?)
}

#[utoipa::path(
    post,
    path = "/api/v1/base64/decode",
    request_body = EncodedBody,
    responses(
        (status = 200, description = "Decoded text", body = Base64Decoded),
        (status = 400, description = "Missing or malformed input", body = ApiErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn base64_decode(
    body: Result<Json<EncodedBody>, JsonRejection>,
) -> ApiResult<Base64Decoded> {
    let Json(body) = body?;
    let encoded = body
        .encoded
        .ok_or_else(|| ApiError::missing(ErrorCode::MissingEncoded, "encoded"))?;

    ok(base64::decode(&encoded)?)
}

#[utoipa::path(
    post,
    path = "/api/v1/base64/validate",
    request_body = TextBody,
    responses(
        (status = 200, description = "Validation result (valid or not)", body = Base64Validation),
        (status = 400, description = "Missing text", body = ApiErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn base64_validate(
    body: Result<Json<TextBody>, JsonRejection>,
) -> ApiResult<Base64Validation> {
    let Json(body) = body?;
    let text = body
        .text
        .ok_or_else(|| ApiError::missing(ErrorCode::MissingText, "text"))?;

    ok(base64::validate(&text))
}

#[utoipa::path(
    get,
    path = "/api/v1/base64/info",
    responses(
        (status = 200, description = "Base64 reference", body = Base64Info)
    )
)]
#[axum::debug_handler]
pub async fn base64_info() -> ApiResult<Base64Info> {
    ok(base64::info())
}

#[utoipa::path(
    post,
    path = "/api/v1/url/encode",
    request_body = UrlEncodeBody,
    responses(
        (status = 200, description = "Encoded text", body = UrlEncoded),
        (status = 400, description = "Missing text or unknown type", body = ApiErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn url_encode(body: Result<Json<UrlEncodeBody>, JsonRejection>) -> ApiResult<UrlEncoded> {
    let Json(body) = body?;
    let text = body
        .text
        .ok_or_else(|| ApiError::missing(ErrorCode::MissingText, "text"))?;
    let mode = body.kind.as_deref().unwrap_or("standard");

    ok(url::encode(&text, mode)?)
}

#[utoipa::path(
    post,
    path = "/api/v1/url/decode",
    request_body = UrlDecodeBody,
    responses(
        (status = 200, description = "Decoded text", body = UrlDecoded),
        (status = 400, description = "Missing input or unknown type", body = ApiErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn url_decode(body: Result<Json<UrlDecodeBody>, JsonRejection>) -> ApiResult<UrlDecoded> {
    let Json(body) = body?;
    let encoded = body
        .encoded
        .ok_or_else(|| ApiError::missing(ErrorCode::MissingEncoded, "encoded"))?;
    let mode = body.kind.as_deref().unwrap_or("standard");

    ok(url::decode(&encoded, mode)?)
}

#[utoipa::path(
    post,
    path = "/api/v1/url/validate",
    request_body = TextBody,
    responses(
        (status = 200, description = "Validation result (valid or not)", body = UrlValidation),
        (status = 400, description = "Missing text", body = ApiErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn url_validate(body: Result<Json<TextBody>, JsonRejection>) -> ApiResult<UrlValidation> {
    let Json(body) = body?;
    let text = body
        .text
        .ok_or_else(|| ApiError::missing(ErrorCode::MissingText, "text"))?;

    ok(url::validate(&text))
}

#[utoipa::path(
    get,
    path = "/api/v1/url/info",
    responses(
        (status = 200, description = "URL encoding reference", body = UrlInfo)
    )
)]
#[axum::debug_handler]
pub async fn url_info() -> ApiResult<UrlInfo> {
    ok(url::info())
}

/// Fallback for unmatched routes.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(uri.path())
}
