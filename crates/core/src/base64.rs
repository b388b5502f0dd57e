//! Standard-alphabet Base64 over UTF-8 text.

use crate::error::{ToolboxError, ToolboxResult};
use crate::shared::{percent_change, percent_decrease};
use ::base64::alphabet;
use ::base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use ::base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Standard alphabet with padding that tolerates non-zero bits in the final quantum.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

const ALPHABET_DESCRIPTION: &str = "A-Z, a-z, 0-9, +, /";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Base64Encoded {
    pub encoded: String,
    /// Input length in characters.
    pub original_length: usize,
    pub encoded_length: usize,
    pub size_increase_percent: f64,
    pub encoding: String,
    pub padding_chars: usize,
    pub is_valid_base64: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Base64Decoded {
    pub decoded: String,
    pub original_encoded: String,
    pub encoded_length: usize,
    /// Output length in characters.
    pub decoded_length: usize,
    pub size_decrease_percent: f64,
    pub encoding: String,
    pub padding_chars: usize,
    pub bytes_decoded: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Base64FormatInfo {
    pub alphabet: String,
    pub padding: String,
    pub line_breaks: String,
}

/// Outcome of [`validate`]. Only the fields relevant to the verdict are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Base64Validation {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_decode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decode_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_chars: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format_info: Option<Base64FormatInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub common_issues: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Base64Info {
    pub name: String,
    pub description: String,
    pub alphabet: String,
    pub padding_character: String,
    pub encoding_ratio: String,
    pub size_increase: String,
    pub use_cases: Vec<String>,
    pub variants: BTreeMap<String, String>,
    pub characteristics: Vec<String>,
}

/// True when `text` (ignoring all whitespace) has a length divisible by four, uses only the
/// standard alphabet, and carries `=` only as a one- or two-character suffix.
pub fn is_well_formed(text: &str) -> bool {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();

    if compact.len() % 4 != 0 {
        return false;
    }
    if !compact
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '='))
    {
        return false;
    }

    match compact.find('=') {
        None => true,
        Some(start) => matches!(&compact[start..], "=" | "=="),
    }
}

fn padding_count(text: &str) -> usize {
    text.matches('=').count()
}

/// Encodes the UTF-8 bytes of `text`.
///
/// # Errors
///
/// Returns [`ToolboxError::EmptyEncodeInput`] for an empty string.
pub fn encode(text: &str) -> ToolboxResult<Base64Encoded> {
    if text.is_empty() {
        return Err(ToolboxError::EmptyEncodeInput);
    }

    let encoded = STANDARD.encode(text.as_bytes());
    let original_length = text.chars().count();
    tracing::debug!(original_length, "base64 encode");

    Ok(Base64Encoded {
        original_length,
        encoded_length: encoded.len(),
        size_increase_percent: percent_change(original_length, encoded.len()),
        encoding: "utf-8".into(),
        padding_chars: padding_count(&encoded),
        is_valid_base64: is_well_formed(&encoded),
        encoded,
    })
}

/// Decodes Base64 text back to a UTF-8 string.
///
/// Surrounding whitespace is trimmed and interior whitespace is ignored.
///
/// # Errors
///
/// - [`ToolboxError::EmptyDecodeInput`] when nothing but whitespace is supplied.
/// - [`ToolboxError::Base64Format`] when the shape check of [`is_well_formed`] fails.
/// - [`ToolboxError::Base64Decode`] or [`ToolboxError::Utf8`] when the payload is undecodable.
pub fn decode(encoded_text: &str) -> ToolboxResult<Base64Decoded> {
    let trimmed = encoded_text.trim();
    if trimmed.is_empty() {
        return Err(ToolboxError::EmptyDecodeInput);
    }
    if !is_well_formed(trimmed) {
        return Err(ToolboxError::Base64Format);
    }

    let compact: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = LENIENT
        .decode(compact.as_bytes())
        .map_err(ToolboxError::Base64Decode)?;
    let bytes_decoded = bytes.len();
    let decoded = String::from_utf8(bytes).map_err(ToolboxError::Utf8)?;

    let encoded_length = trimmed.chars().count();
    let decoded_length = decoded.chars().count();
    tracing::debug!(encoded_length, bytes_decoded, "base64 decode");

    Ok(Base64Decoded {
        decoded,
        original_encoded: trimmed.to_string(),
        encoded_length,
        decoded_length,
        size_decrease_percent: percent_decrease(encoded_length, decoded_length),
        encoding: "utf-8".into(),
        padding_chars: padding_count(trimmed),
        bytes_decoded,
    })
}

/// Reports whether `text` is Base64 and whether it decodes under the strict standard engine.
pub fn validate(text: &str) -> Base64Validation {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return Base64Validation {
            is_valid: false,
            can_decode: None,
            decode_error: None,
            length: None,
            padding_chars: None,
            format_info: None,
            error: Some("Input cannot be empty".into()),
            suggestions: vec!["Provide non-empty Base64 string".into()],
            common_issues: Vec::new(),
        };
    }

    if !is_well_formed(trimmed) {
        return Base64Validation {
            is_valid: false,
            can_decode: None,
            decode_error: None,
            length: None,
            padding_chars: None,
            format_info: None,
            error: Some("Invalid Base64 format".into()),
            suggestions: vec![
                format!("Base64 should contain only {ALPHABET_DESCRIPTION} characters"),
                "Padding with = characters should only be at the end".into(),
                "Length should be multiple of 4 (after padding)".into(),
                "Example: SGVsbG8gV29ybGQ=".into(),
            ],
            common_issues: vec![
                "Invalid characters in string".into(),
                "Incorrect padding".into(),
                "Wrong length (not multiple of 4)".into(),
            ],
        };
    }

    let compact: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();
    let decode_error = STANDARD.decode(compact.as_bytes()).err().map(|e| e.to_string());

    Base64Validation {
        is_valid: true,
        can_decode: Some(decode_error.is_none()),
        decode_error,
        length: Some(trimmed.chars().count()),
        padding_chars: Some(padding_count(trimmed)),
        format_info: Some(Base64FormatInfo {
            alphabet: ALPHABET_DESCRIPTION.into(),
            padding: "= characters".into(),
            line_breaks: "Optional (ignored during decoding)".into(),
        }),
        error: None,
        suggestions: Vec::new(),
        common_issues: Vec::new(),
    }
}

/// Static description of the encoding.
pub fn info() -> Base64Info {
    let to_strings = |items: &[&str]| items.iter().map(|s| (*s).to_string()).collect();

    Base64Info {
        name: "Base64 Encoding".into(),
        description:
            "Binary-to-text encoding scheme that represents binary data in ASCII string format"
                .into(),
        alphabet: ALPHABET_DESCRIPTION.into(),
        padding_character: "=".into(),
        encoding_ratio: "4:3 (4 Base64 characters represent 3 bytes of data)".into(),
        size_increase: "~33% increase from original size".into(),
        use_cases: to_strings(&[
            "Email attachments (MIME)",
            "Data URLs in web development",
            "Storing binary data in text format",
            "API data transmission",
            "Configuration files",
        ]),
        variants: BTreeMap::from([
            ("standard".to_string(), "Uses +, / with = padding".to_string()),
            (
                "url_safe".to_string(),
                "Uses -, _ instead of +, / (RFC 4648)".to_string(),
            ),
            (
                "no_padding".to_string(),
                "Omits = padding characters".to_string(),
            ),
        ]),
        characteristics: to_strings(&[
            "Reversible encoding",
            "Case sensitive",
            "Safe for text-based protocols",
            "No line length restrictions in modern usage",
        ]),
    }
}
