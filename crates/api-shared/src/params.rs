//! Request DTOs and the string-to-value parsing they share.
//!
//! Query parameters arrive as optional strings so that malformed numbers surface as
//! `INVALID_PARAMETER` rather than as an extractor rejection.

use serde::Deserialize;
use toolbox_core::apikey::{ApiKeyOptions, KeyFormat};
use toolbox_core::password::PasswordOptions;
use toolbox_core::{ToolboxError, ToolboxResult};
use utoipa::{IntoParams, ToSchema};

/// Default `count` for batch endpoints.
pub const DEFAULT_BATCH_COUNT: usize = 5;

/// Parses an optional non-negative integer, falling back to `default` when absent.
pub fn parse_usize(name: &str, raw: Option<&str>, default: usize) -> ToolboxResult<usize> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(v) => v.parse().map_err(|_| {
            ToolboxError::InvalidInput(format!("{name} must be a non-negative integer, got '{v}'"))
        }),
    }
}

/// Like [`parse_usize`] but without a default.
pub fn parse_optional_usize(name: &str, raw: Option<&str>) -> ToolboxResult<Option<usize>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(_) => parse_usize(name, raw, 0).map(Some),
    }
}

/// True iff the value equals `true` ignoring case; `default` when absent.
pub fn parse_flag(raw: Option<&str>, default: bool) -> bool {
    raw.map(|v| v.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(default)
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TextQuery {
    /// `word`, `sentence` or `paragraph` (default `paragraph`).
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Number of items (default 1).
    pub count: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PasswordQuery {
    /// 8 to 128 (default 16).
    pub length: Option<String>,
    pub uppercase: Option<String>,
    pub lowercase: Option<String>,
    pub numbers: Option<String>,
    pub symbols: Option<String>,
    pub exclude_ambiguous: Option<String>,
    pub ensure_requirements: Option<String>,
    /// Batch endpoint only (default 5).
    pub count: Option<String>,
}

impl PasswordQuery {
    pub fn options(&self) -> ToolboxResult<PasswordOptions> {
        let defaults = PasswordOptions::default();
        Ok(PasswordOptions {
            length: parse_usize("length", self.length.as_deref(), defaults.length)?,
            uppercase: parse_flag(self.uppercase.as_deref(), defaults.uppercase),
            lowercase: parse_flag(self.lowercase.as_deref(), defaults.lowercase),
            numbers: parse_flag(self.numbers.as_deref(), defaults.numbers),
            symbols: parse_flag(self.symbols.as_deref(), defaults.symbols),
            exclude_ambiguous: parse_flag(
                self.exclude_ambiguous.as_deref(),
                defaults.exclude_ambiguous,
            ),
            ensure_requirements: parse_flag(
                self.ensure_requirements.as_deref(),
                defaults.ensure_requirements,
            ),
        })
    }

    pub fn count(&self) -> ToolboxResult<usize> {
        parse_usize("count", self.count.as_deref(), DEFAULT_BATCH_COUNT)
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ApiKeyQuery {
    /// `hex`, `base64`, `base58` or `custom` (default `hex`).
    pub format: Option<String>,
    /// Bytes (or characters for `custom`); per-format default when absent.
    pub length: Option<String>,
    pub prefix: Option<String>,
    /// Alphabet for the `custom` format.
    pub charset: Option<String>,
    /// Batch endpoint only (default 5).
    pub count: Option<String>,
}

impl ApiKeyQuery {
    pub fn options(&self) -> ToolboxResult<ApiKeyOptions> {
        let format = match self.format.as_deref() {
            Some(f) if !f.trim().is_empty() => f.parse()?,
            _ => KeyFormat::Hex,
        };

        Ok(ApiKeyOptions {
            format,
            length: parse_optional_usize("length", self.length.as_deref())?,
            prefix: self.prefix.clone().unwrap_or_default(),
            charset: self.charset.clone().filter(|c| !c.is_empty()),
        })
    }

    pub fn count(&self) -> ToolboxResult<usize> {
        parse_usize("count", self.count.as_deref(), DEFAULT_BATCH_COUNT)
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HashQuery {
    pub text: Option<String>,
    /// Default `sha256`.
    pub algorithm: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MultiHashQuery {
    pub text: Option<String>,
    /// Comma-separated names; `md5,sha1,sha256,sha512` when absent.
    pub algorithms: Option<String>,
}

impl MultiHashQuery {
    pub fn algorithm_list(&self) -> Vec<String> {
        self.algorithms
            .as_deref()
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UuidQuery {
    /// `1`, `v1`, `4` or `v4` (default `v4`).
    pub version: Option<String>,
    /// Batch endpoint only (default 5).
    pub count: Option<String>,
}

impl UuidQuery {
    pub fn version(&self) -> &str {
        self.version.as_deref().unwrap_or("v4")
    }

    pub fn count(&self) -> ToolboxResult<usize> {
        parse_usize("count", self.count.as_deref(), DEFAULT_BATCH_COUNT)
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UuidValidateQuery {
    pub uuid: Option<String>,
}

/// Body for endpoints that take a single `text` field.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct TextBody {
    pub text: Option<String>,
}

/// Body for `POST /base64/decode`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct EncodedBody {
    pub encoded: Option<String>,
}

/// Body for `POST /url/encode`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UrlEncodeBody {
    pub text: Option<String>,
    /// `standard`, `plus` or `component` (default `standard`).
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Body for `POST /url/decode`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UrlDecodeBody {
    pub encoded: Option<String>,
    /// `standard`, `plus` or `auto` (default `standard`).
    #[serde(rename = "type")]
    pub kind: Option<String>,
}
