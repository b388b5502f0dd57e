//! Percent-encoding for URLs and form data.
//!
//! Three encode sets are used:
//!
//! - `standard` leaves the RFC 3986 unreserved characters and `/` alone, which is the usual
//!   path-quoting behaviour (`"a b/c!"` becomes `"a%20b/c%21"`).
//! - `component` leaves only the unreserved characters alone.
//! - `plus` is `component` with spaces written as `+` (`application/x-www-form-urlencoded`).
//!
//! Decoding never fails on malformed escapes; a `%` not followed by two hex digits is kept
//! literally and invalid UTF-8 is replaced with U+FFFD. Use [`validate`] to find such problems.

use crate::error::{ToolboxError, ToolboxResult};
use crate::shared::{percent_change, percent_decrease};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Everything except `A-Z a-z 0-9 - . _ ~`.
const COMPONENT_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

const STANDARD_SET: &AsciiSet = &COMPONENT_SET.remove(b'/');

/// Spaces pass through so they can be rewritten as `+` afterwards.
const FORM_SET: &AsciiSet = &COMPONENT_SET.remove(b' ');

const UNSAFE_CHARS: &[char] = &[' ', '"', '<', '>', '{', '}', '|', '\\', '^', '`', '[', ']'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum EncodeMode {
    Standard,
    Plus,
    Component,
}

impl EncodeMode {
    pub const NAMES: &'static [&'static str] = &["standard", "plus", "component"];

    pub fn as_str(&self) -> &'static str {
        match self {
            EncodeMode::Standard => "standard",
            EncodeMode::Plus => "plus",
            EncodeMode::Component => "component",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            EncodeMode::Standard => "Standard percent encoding (RFC 3986)",
            EncodeMode::Plus => "Form data encoding (+ for spaces)",
            EncodeMode::Component => "Component encoding (encode all special characters)",
        }
    }

    /// Human-readable list of the characters left unencoded.
    pub fn safe_characters(&self) -> &'static str {
        match self {
            EncodeMode::Standard => "A-Z a-z 0-9 - . _ ~ /",
            EncodeMode::Plus => "A-Z a-z 0-9 - . _ ~ (space becomes +)",
            EncodeMode::Component => "A-Z a-z 0-9 - . _ ~",
        }
    }
}

impl FromStr for EncodeMode {
    type Err = ToolboxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(EncodeMode::Standard),
            "plus" => Ok(EncodeMode::Plus),
            "component" => Ok(EncodeMode::Component),
            _ => Err(ToolboxError::InvalidType {
                provided: s.to_string(),
                allowed: Self::NAMES,
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum DecodeMode {
    Standard,
    Plus,
    Auto,
}

impl DecodeMode {
    pub const NAMES: &'static [&'static str] = &["standard", "plus", "auto"];

    pub fn as_str(&self) -> &'static str {
        match self {
            DecodeMode::Standard => "standard",
            DecodeMode::Plus => "plus",
            DecodeMode::Auto => "auto",
        }
    }
}

impl FromStr for DecodeMode {
    type Err = ToolboxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(DecodeMode::Standard),
            "plus" => Ok(DecodeMode::Plus),
            "auto" => Ok(DecodeMode::Auto),
            _ => Err(ToolboxError::InvalidType {
                provided: s.to_string(),
                allowed: Self::NAMES,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UrlEncoded {
    pub encoded: String,
    pub encoding_type: EncodeMode,
    pub description: String,
    pub original_length: usize,
    pub encoded_length: usize,
    pub size_increase_percent: f64,
    pub percent_encoded_chars: usize,
    pub plus_encoded_chars: usize,
    pub characters_encoded: usize,
    pub safe_characters: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UrlDecoded {
    pub decoded: String,
    pub original_encoded: String,
    /// Mode actually applied; never `auto`.
    pub decoding_type: DecodeMode,
    pub auto_detected: bool,
    pub description: String,
    pub encoded_length: usize,
    pub decoded_length: usize,
    pub size_decrease_percent: f64,
    pub percent_encoded_chars: usize,
    pub plus_encoded_chars: usize,
    pub characters_decoded: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UrlStatistics {
    pub percent_sequences: usize,
    pub plus_signs: usize,
    pub length: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UnsafeCharacter {
    #[serde(rename = "char")]
    pub character: String,
    /// Character (not byte) offset.
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EncodingIndicators {
    pub has_percent_encoding: bool,
    pub has_plus_encoding: bool,
    pub has_percent20: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EncodingDetection {
    pub likely_type: String,
    pub confidence: String,
    pub indicators: EncodingIndicators,
}

impl EncodingDetection {
    fn of(text: &str) -> Self {
        let has_percent = text.contains('%');
        let has_plus = text.contains('+');
        let has_percent20 = text.contains("%20");

        let (likely_type, confidence) = if has_plus && !has_percent20 {
            ("plus", "high")
        } else if has_percent && !has_plus {
            ("standard", "high")
        } else if has_percent && has_plus {
            ("mixed", "low")
        } else {
            ("none", "high")
        };

        Self {
            likely_type: likely_type.into(),
            confidence: confidence.into(),
            indicators: EncodingIndicators {
                has_percent_encoding: has_percent,
                has_plus_encoding: has_plus,
                has_percent20,
            },
        }
    }
}

/// Outcome of [`validate`]. Problems are reported here, never raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UrlValidation {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub issues: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<UrlStatistics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_decode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decode_error: Option<String>,
    #[serde(default)]
    pub unsafe_characters: Vec<UnsafeCharacter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding_detection: Option<EncodingDetection>,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ModeInfo {
    pub description: String,
    pub spaces: String,
    pub use_case: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ReservedCharacters {
    pub general_delimiters: String,
    pub sub_delimiters: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UnsafeCharacters {
    pub always_encode: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PercentEncodingInfo {
    pub format: String,
    pub example: String,
    pub case_sensitivity: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UrlInfo {
    pub name: String,
    pub description: String,
    pub standard: String,
    pub encoding_types: BTreeMap<String, ModeInfo>,
    pub reserved_characters: ReservedCharacters,
    pub unsafe_characters: UnsafeCharacters,
    pub percent_encoding: PercentEncodingInfo,
    pub common_encodings: BTreeMap<String, String>,
}

fn encode_with(text: &str, mode: EncodeMode) -> String {
    match mode {
        EncodeMode::Standard => utf8_percent_encode(text, STANDARD_SET).to_string(),
        EncodeMode::Component => utf8_percent_encode(text, COMPONENT_SET).to_string(),
        EncodeMode::Plus => utf8_percent_encode(text, FORM_SET)
            .to_string()
            .replace(' ', "+"),
    }
}

fn decode_standard(text: &str) -> String {
    percent_decode_str(text).decode_utf8_lossy().into_owned()
}

fn decode_plus(text: &str) -> String {
    decode_standard(&text.replace('+', " "))
}

/// Percent-encodes `text` under `mode` (`standard`, `plus` or `component`).
///
/// # Errors
///
/// - [`ToolboxError::EmptyEncodeInput`] for an empty string.
/// - [`ToolboxError::InvalidType`] for an unknown mode.
pub fn encode(text: &str, mode: &str) -> ToolboxResult<UrlEncoded> {
    if text.is_empty() {
        return Err(ToolboxError::EmptyEncodeInput);
    }
    let mode: EncodeMode = mode.parse()?;
    tracing::debug!(mode = mode.as_str(), "url encode");

    let encoded = encode_with(text, mode);
    let original_length = text.chars().count();
    let percent_encoded_chars = encoded.matches('%').count();
    let plus_encoded_chars = match mode {
        EncodeMode::Plus => encoded.matches('+').count(),
        _ => 0,
    };

    Ok(UrlEncoded {
        encoding_type: mode,
        description: mode.description().into(),
        original_length,
        encoded_length: encoded.len(),
        size_increase_percent: percent_change(original_length, encoded.len()),
        percent_encoded_chars,
        plus_encoded_chars,
        characters_encoded: percent_encoded_chars + plus_encoded_chars,
        safe_characters: mode.safe_characters().into(),
        encoded,
    })
}

/// Reverses percent-encoding under `mode` (`standard`, `plus` or `auto`).
///
/// `auto` picks `plus` when the input has a `+` and no `%20`, otherwise `standard`.
/// `characters_decoded` counts `%` signs, plus `+` signs only when plus-decoding applied.
pub fn decode(encoded_text: &str, mode: &str) -> ToolboxResult<UrlDecoded> {
    if encoded_text.is_empty() {
        return Err(ToolboxError::EmptyDecodeInput);
    }
    let requested: DecodeMode = mode.parse()?;

    let (effective, description) = match requested {
        DecodeMode::Auto if encoded_text.contains('+') && !encoded_text.contains("%20") => (
            DecodeMode::Plus,
            "Auto-detected: Form data encoding (+ for spaces)",
        ),
        DecodeMode::Auto => (
            DecodeMode::Standard,
            "Auto-detected: Standard percent encoding",
        ),
        DecodeMode::Plus => (DecodeMode::Plus, "Form data decoding (+ to spaces)"),
        DecodeMode::Standard => (DecodeMode::Standard, "Standard percent decoding"),
    };
    tracing::debug!(
        requested = requested.as_str(),
        effective = effective.as_str(),
        "url decode"
    );

    let decoded = match effective {
        DecodeMode::Plus => decode_plus(encoded_text),
        _ => decode_standard(encoded_text),
    };

    let encoded_length = encoded_text.chars().count();
    let decoded_length = decoded.chars().count();
    let percent_encoded_chars = encoded_text.matches('%').count();
    let plus_encoded_chars = encoded_text.matches('+').count();
    let characters_decoded = percent_encoded_chars
        + match effective {
            DecodeMode::Plus => plus_encoded_chars,
            _ => 0,
        };

    Ok(UrlDecoded {
        decoded,
        original_encoded: encoded_text.to_string(),
        decoding_type: effective,
        auto_detected: requested == DecodeMode::Auto,
        description: description.into(),
        encoded_length,
        decoded_length,
        size_decrease_percent: percent_decrease(encoded_length, decoded_length),
        percent_encoded_chars,
        plus_encoded_chars,
        characters_decoded,
    })
}

/// Positions of `%` escapes that are truncated or not followed by two hex digits.
fn malformed_escapes(chars: &[char]) -> Vec<String> {
    let mut issues = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != '%' {
            i += 1;
            continue;
        }

        if i + 2 >= chars.len() {
            issues.push(format!("Incomplete percent sequence at position {i}"));
        } else {
            let hex_part: String = chars[i + 1..i + 3].iter().collect();
            if !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
                issues.push(format!(
                    "Invalid hex characters in percent sequence at position {i}: %{hex_part}"
                ));
            }
        }
        i += 3;
    }

    issues
}

/// Checks `text` for malformed escapes, unsafe literals and undecodable byte sequences.
pub fn validate(text: &str) -> UrlValidation {
    if text.is_empty() {
        return UrlValidation {
            is_valid: false,
            error: Some("Input cannot be empty".into()),
            issues: Vec::new(),
            warnings: Vec::new(),
            statistics: None,
            can_decode: None,
            decode_error: None,
            unsafe_characters: Vec::new(),
            encoding_detection: None,
            suggestions: vec!["Provide non-empty URL-encoded string".into()],
        };
    }

    let chars: Vec<char> = text.chars().collect();
    let mut issues = malformed_escapes(&chars);

    let unsafe_characters: Vec<UnsafeCharacter> = chars
        .iter()
        .enumerate()
        .filter(|(_, c)| UNSAFE_CHARS.contains(*c))
        .map(|(position, c)| UnsafeCharacter {
            character: c.to_string(),
            position,
        })
        .collect();

    let mut warnings = Vec::new();
    if !unsafe_characters.is_empty() {
        warnings.push(format!(
            "Found {} potentially unsafe unencoded characters",
            unsafe_characters.len()
        ));
    }

    let decode_error = percent_decode_str(text)
        .decode_utf8()
        .err()
        .map(|e| e.to_string());
    if let Some(e) = &decode_error {
        issues.push(format!("Cannot decode: {e}"));
    }

    let is_valid = issues.is_empty();
    let suggestions = if is_valid {
        vec![
            "URL encoding appears to be valid".to_string(),
            "Consider the appropriate decoding method based on context".to_string(),
        ]
    } else {
        vec![
            "Fix malformed percent sequences".to_string(),
            "Ensure all % characters are followed by 2 hex digits".to_string(),
            "Consider encoding unsafe characters".to_string(),
        ]
    };

    UrlValidation {
        is_valid,
        error: None,
        issues,
        warnings,
        statistics: Some(UrlStatistics {
            percent_sequences: text.matches('%').count(),
            plus_signs: text.matches('+').count(),
            length: chars.len(),
        }),
        can_decode: Some(decode_error.is_none()),
        decode_error,
        unsafe_characters,
        encoding_detection: Some(EncodingDetection::of(text)),
        suggestions,
    }
}

/// Static description of URL encoding and of the modes offered here.
pub fn info() -> UrlInfo {
    let mode = |description: &str, spaces: &str, use_case: &str| ModeInfo {
        description: description.into(),
        spaces: spaces.into(),
        use_case: use_case.into(),
    };

    let encoding_types = BTreeMap::from([
        (
            "standard".to_string(),
            mode(
                "Standard percent encoding",
                "Encoded as %20",
                "General URL paths",
            ),
        ),
        (
            "plus".to_string(),
            mode(
                "Form data encoding",
                "Encoded as +",
                "HTML form data (application/x-www-form-urlencoded)",
            ),
        ),
        (
            "component".to_string(),
            mode(
                "Component encoding",
                "Encoded as %20",
                "Query values and single path segments (more restrictive)",
            ),
        ),
    ]);

    let common_encodings = [
        (" ", "%20 or +"),
        ("!", "%21"),
        ("\"", "%22"),
        ("#", "%23"),
        ("$", "%24"),
        ("%", "%25"),
        ("&", "%26"),
        ("'", "%27"),
        ("(", "%28"),
        (")", "%29"),
        ("*", "%2A"),
        ("+", "%2B"),
        (",", "%2C"),
        ("/", "%2F"),
        (":", "%3A"),
        (";", "%3B"),
        ("=", "%3D"),
        ("?", "%3F"),
        ("@", "%40"),
        ("[", "%5B"),
        ("]", "%5D"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    UrlInfo {
        name: "URL Encoding (Percent Encoding)".into(),
        description: "Encoding mechanism to represent characters in URLs that are not allowed or have special meaning".into(),
        standard: "RFC 3986".into(),
        encoding_types,
        reserved_characters: ReservedCharacters {
            general_delimiters: ": / ? # [ ] @".into(),
            sub_delimiters: "! $ & ' ( ) * + , ; =".into(),
            description: "Characters with special meaning in URLs".into(),
        },
        unsafe_characters: UnsafeCharacters {
            always_encode: "space \" < > % { } | \\ ^ ` [ ]".into(),
            description: "Characters that should always be encoded in URLs".into(),
        },
        percent_encoding: PercentEncodingInfo {
            format: "%XX where XX is hexadecimal representation".into(),
            example: "Hello World → Hello%20World".into(),
            case_sensitivity: "Hex digits can be upper or lower case".into(),
        },
        common_encodings,
    }
}
