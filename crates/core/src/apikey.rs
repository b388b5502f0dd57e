//! API-key generation in hex, URL-safe Base64, base58 and custom-alphabet formats.
//!
//! Every random byte or character comes from the operating system's CSPRNG. Entropy is
//! computed from the request (byte count or alphabet size), never from the encoded output.

use crate::constants::{
    API_KEY_MAX_BATCH, API_KEY_MAX_BYTES, API_KEY_MAX_CUSTOM_LENGTH, API_KEY_MAX_PREFIX,
    BASE58_ALPHABET, DIGITS, LOWERCASE, UPPERCASE,
};
use crate::error::{ensure_range, ToolboxError, ToolboxResult};
use crate::shared::{entropy_bits, round2};
use ::base64::engine::general_purpose::URL_SAFE_NO_PAD;
use ::base64::Engine as _;
use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum KeyFormat {
    Hex,
    Base64,
    Base58,
    Custom,
}

impl KeyFormat {
    pub const NAMES: &'static [&'static str] = &["hex", "base64", "base58", "custom"];

    pub fn as_str(&self) -> &'static str {
        match self {
            KeyFormat::Hex => "hex",
            KeyFormat::Base64 => "base64",
            KeyFormat::Base58 => "base58",
            KeyFormat::Custom => "custom",
        }
    }

    /// Length used when the caller does not supply one.
    pub fn default_length(&self) -> usize {
        match self {
            KeyFormat::Base64 => 24,
            KeyFormat::Hex | KeyFormat::Base58 | KeyFormat::Custom => 32,
        }
    }
}

impl FromStr for KeyFormat {
    type Err = ToolboxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hex" => Ok(KeyFormat::Hex),
            "base64" => Ok(KeyFormat::Base64),
            "base58" => Ok(KeyFormat::Base58),
            "custom" => Ok(KeyFormat::Custom),
            _ => Err(ToolboxError::InvalidFormat {
                provided: s.to_string(),
                allowed: Self::NAMES,
            }),
        }
    }
}

/// Security label derived from entropy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum SecurityLevel {
    Weak,
    Adequate,
    Strong,
    VeryStrong,
    MilitaryGrade,
}

impl SecurityLevel {
    pub fn from_entropy(bits: f64) -> Self {
        if bits >= 256.0 {
            SecurityLevel::MilitaryGrade
        } else if bits >= 128.0 {
            SecurityLevel::VeryStrong
        } else if bits >= 80.0 {
            SecurityLevel::Strong
        } else if bits >= 64.0 {
            SecurityLevel::Adequate
        } else {
            SecurityLevel::Weak
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SecurityLevel::Weak => "weak",
            SecurityLevel::Adequate => "adequate",
            SecurityLevel::Strong => "strong",
            SecurityLevel::VeryStrong => "very_strong",
            SecurityLevel::MilitaryGrade => "military_grade",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ApiKeyOptions {
    pub format: KeyFormat,
    /// Bytes for hex/base64/base58, characters for custom. `None` selects the format default.
    pub length: Option<usize>,
    pub prefix: String,
    /// Alphabet for the custom format. `None` selects ASCII letters and digits.
    pub charset: Option<String>,
}

impl Default for ApiKeyOptions {
    fn default() -> Self {
        Self {
            format: KeyFormat::Hex,
            length: None,
            prefix: String::new(),
            charset: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct GeneratedApiKey {
    pub api_key: String,
    pub format: KeyFormat,
    /// Length of the encoded body, excluding the prefix.
    pub length: usize,
    pub total_length: usize,
    pub prefix: String,
    pub entropy_bits: f64,
    pub security_level: SecurityLevel,
}

fn random_bytes(length: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; length];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Encodes `bytes` as base58 using the Bitcoin alphabet.
///
/// Each leading zero byte becomes a leading `'1'`.
pub fn base58_encode(bytes: &[u8]) -> String {
    let zeros = bytes.iter().take_while(|b| **b == 0).count();

    // Little-endian base-58 digits of the big-endian integer in `bytes`.
    let mut digits: Vec<u8> = Vec::with_capacity(bytes.len() * 138 / 100 + 1);
    for &byte in &bytes[zeros..] {
        let mut carry = u32::from(byte);
        for digit in digits.iter_mut() {
            carry += u32::from(*digit) << 8;
            *digit = (carry % 58) as u8;
            carry /= 58;
        }
        while carry > 0 {
            digits.push((carry % 58) as u8);
            carry /= 58;
        }
    }

    let mut encoded = String::with_capacity(zeros + digits.len());
    encoded.extend(std::iter::repeat(BASE58_ALPHABET[0] as char).take(zeros));
    encoded.extend(
        digits
            .iter()
            .rev()
            .map(|d| BASE58_ALPHABET[*d as usize] as char),
    );
    encoded
}

/// Deduplicates `charset` keeping first-occurrence order.
fn distinct_chars(charset: &str) -> Vec<char> {
    let mut seen = Vec::new();
    for c in charset.chars() {
        if !seen.contains(&c) {
            seen.push(c);
        }
    }
    seen
}

/// Generates one API key.
///
/// All parameters are validated before any randomness is drawn.
///
/// # Errors
///
/// - [`ToolboxError::InvalidInput`] if the prefix exceeds 20 characters or a custom charset
///   has fewer than two distinct characters.
/// - [`ToolboxError::OutOfRange`] if the length is outside the format's bounds.
pub fn generate(options: &ApiKeyOptions) -> ToolboxResult<GeneratedApiKey> {
    if options.prefix.chars().count() > API_KEY_MAX_PREFIX {
        return Err(ToolboxError::InvalidInput(format!(
            "prefix cannot exceed {API_KEY_MAX_PREFIX} characters"
        )));
    }

    let format = options.format;
    let length = options.length.unwrap_or_else(|| format.default_length());

    let (body, entropy) = match format {
        KeyFormat::Hex => {
            ensure_range("length", length, 1, API_KEY_MAX_BYTES)?;
            (hex::encode(random_bytes(length)), (length * 4) as f64)
        }
        KeyFormat::Base64 => {
            ensure_range("length", length, 1, API_KEY_MAX_BYTES)?;
            (
                URL_SAFE_NO_PAD.encode(random_bytes(length)),
                (length * 6) as f64,
            )
        }
        KeyFormat::Base58 => {
            ensure_range("length", length, 1, API_KEY_MAX_BYTES)?;
            (
                base58_encode(&random_bytes(length)),
                entropy_bits(length, BASE58_ALPHABET.len()),
            )
        }
        KeyFormat::Custom => {
            ensure_range("length", length, 1, API_KEY_MAX_CUSTOM_LENGTH)?;
            let alphabet = match &options.charset {
                Some(charset) => distinct_chars(charset),
                None => distinct_chars(&format!("{LOWERCASE}{UPPERCASE}{DIGITS}")),
            };
            if alphabet.len() < 2 {
                return Err(ToolboxError::InvalidInput(
                    "charset must contain at least 2 distinct characters".into(),
                ));
            }

            let mut rng = OsRng;
            let body: String = (0..length)
                .filter_map(|_| alphabet.choose(&mut rng).copied())
                .collect();
            (body, entropy_bits(length, alphabet.len()))
        }
    };

    tracing::debug!(format = format.as_str(), length, "generated api key");

    let api_key = format!("{}{}", options.prefix, body);
    Ok(GeneratedApiKey {
        length: body.chars().count(),
        total_length: api_key.chars().count(),
        api_key,
        format,
        prefix: options.prefix.clone(),
        entropy_bits: round2(entropy),
        security_level: SecurityLevel::from_entropy(entropy),
    })
}

/// Generates `count` independent keys with the same options.
pub fn generate_multiple(
    count: usize,
    options: &ApiKeyOptions,
) -> ToolboxResult<Vec<GeneratedApiKey>> {
    ensure_range("count", count, 1, API_KEY_MAX_BATCH)?;
    (0..count).map(|_| generate(options)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn options(format: KeyFormat, length: Option<usize>) -> ApiKeyOptions {
        ApiKeyOptions {
            format,
            length,
            ..ApiKeyOptions::default()
        }
    }

    #[test]
    fn hex_key_is_two_chars_per_byte() {
        let key = generate(&options(KeyFormat::Hex, Some(16))).unwrap();

        assert_eq!(key.api_key.len(), 32);
        assert!(key
            .api_key
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        assert_eq!(key.entropy_bits, 64.0);
        assert_eq!(key.security_level, SecurityLevel::Adequate);
    }

    #[test]
    fn default_hex_key_is_very_strong() {
        let key = generate(&ApiKeyOptions::default()).unwrap();

        assert_eq!(key.length, 64);
        assert_eq!(key.entropy_bits, 128.0);
        assert_eq!(key.security_level, SecurityLevel::VeryStrong);
    }

    #[test]
    fn base64_key_with_prefix() {
        let opts = ApiKeyOptions {
            format: KeyFormat::Base64,
            length: Some(24),
            prefix: "sk_".into(),
            charset: None,
        };
        let key = generate(&opts).unwrap();

        assert!(key.api_key.starts_with("sk_"));
        assert_eq!(key.length, 32);
        assert_eq!(key.total_length, 35);
        assert!(!key.api_key.contains('='));
        assert!(!key.api_key[3..].contains('+') && !key.api_key[3..].contains('/'));
    }

    #[test]
    fn base58_key_avoids_ambiguous_glyphs() {
        for _ in 0..20 {
            let key = generate(&options(KeyFormat::Base58, None)).unwrap();
            assert!(!key
                .api_key
                .chars()
                .any(|c| matches!(c, '0' | 'O' | 'I' | 'l')));
        }
    }

    #[test]
    fn base58_known_vectors() {
        assert_eq!(base58_encode(b"hello world"), "StV1DL6CwTryKyV");
        assert_eq!(base58_encode(&[0, 0, 1]), "112");
        assert_eq!(base58_encode(&[0, 0, 0]), "111");
        assert_eq!(base58_encode(&[]), "");
        assert_eq!(base58_encode(&[58]), "21");
    }

    #[test]
    fn custom_charset_is_respected() {
        let opts = ApiKeyOptions {
            format: KeyFormat::Custom,
            length: Some(10),
            prefix: String::new(),
            charset: Some("ABC123".into()),
        };
        let key = generate(&opts).unwrap();

        assert_eq!(key.api_key.len(), 10);
        assert!(key.api_key.chars().all(|c| "ABC123".contains(c)));
    }

    #[test]
    fn custom_charset_needs_two_distinct_characters() {
        let opts = ApiKeyOptions {
            format: KeyFormat::Custom,
            length: Some(10),
            prefix: String::new(),
            charset: Some("aaaa".into()),
        };

        assert!(matches!(
            generate(&opts),
            Err(ToolboxError::InvalidInput(_))
        ));
    }

    #[test]
    fn bounds_are_validated() {
        assert!(generate(&options(KeyFormat::Hex, Some(0))).is_err());
        assert!(generate(&options(KeyFormat::Hex, Some(129))).is_err());
        assert!(generate(&options(KeyFormat::Custom, Some(256))).is_ok());
        assert!(generate(&options(KeyFormat::Custom, Some(257))).is_err());

        let long_prefix = ApiKeyOptions {
            prefix: "x".repeat(21),
            ..ApiKeyOptions::default()
        };
        assert!(generate(&long_prefix).is_err());
    }

    #[test]
    fn format_parsing() {
        assert_eq!("BASE58".parse::<KeyFormat>().unwrap(), KeyFormat::Base58);
        let err = "invalid".parse::<KeyFormat>().unwrap_err();
        assert_eq!(err.code(), crate::ErrorCode::InvalidFormat);
    }

    #[test]
    fn security_thresholds() {
        assert_eq!(SecurityLevel::from_entropy(256.0), SecurityLevel::MilitaryGrade);
        assert_eq!(SecurityLevel::from_entropy(128.0), SecurityLevel::VeryStrong);
        assert_eq!(SecurityLevel::from_entropy(80.0), SecurityLevel::Strong);
        assert_eq!(SecurityLevel::from_entropy(64.0), SecurityLevel::Adequate);
        assert_eq!(SecurityLevel::from_entropy(63.9), SecurityLevel::Weak);
    }

    #[test]
    fn batch_keys_are_distinct() {
        let keys: HashSet<String> = generate_multiple(10, &ApiKeyOptions::default())
            .unwrap()
            .into_iter()
            .map(|k| k.api_key)
            .collect();
        assert_eq!(keys.len(), 10);
        assert!(generate_multiple(51, &ApiKeyOptions::default()).is_err());
    }
}
