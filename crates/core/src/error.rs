use serde::{Deserialize, Serialize};

/// Outward-facing failure classification shared by every surface.
///
/// Each [`ToolboxError`] maps to exactly one code; the REST layer derives its HTTP status
/// from the code and the CLI prints the accompanying message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidParameter,
    InvalidType,
    InvalidFormat,
    MissingText,
    MissingUuid,
    MissingEncoded,
    EncodingError,
    DecodingError,
    GenerationError,
    ValidationError,
    InternalError,
    NotFound,
}

impl ErrorCode {
    /// Returns the wire form of the code, e.g. `INVALID_PARAMETER`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidParameter => "INVALID_PARAMETER",
            ErrorCode::InvalidType => "INVALID_TYPE",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::MissingText => "MISSING_TEXT",
            ErrorCode::MissingUuid => "MISSING_UUID",
            ErrorCode::MissingEncoded => "MISSING_ENCODED",
            ErrorCode::EncodingError => "ENCODING_ERROR",
            ErrorCode::DecodingError => "DECODING_ERROR",
            ErrorCode::GenerationError => "GENERATION_ERROR",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
            ErrorCode::NotFound => "NOT_FOUND",
        }
    }

    /// True for codes caused by the caller's input rather than by the service.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            ErrorCode::GenerationError | ErrorCode::InternalError | ErrorCode::NotFound
        )
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extra context attached to enum-valued argument failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorDetails {
    pub provided: String,
    pub valid_options: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ToolboxError {
    #[error("{name} must be between {min} and {max}, got {value}")]
    OutOfRange {
        name: &'static str,
        min: usize,
        max: usize,
        value: usize,
    },
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid type '{provided}'; must be one of: {}", .allowed.join(", "))]
    InvalidType {
        provided: String,
        allowed: &'static [&'static str],
    },
    #[error("invalid format '{provided}'; must be one of: {}", .allowed.join(", "))]
    InvalidFormat {
        provided: String,
        allowed: &'static [&'static str],
    },
    #[error("unsupported algorithm: {provided}. Supported algorithms: {}", .allowed.join(", "))]
    UnsupportedAlgorithm {
        provided: String,
        allowed: &'static [&'static str],
    },
    #[error("unsupported UUID version: {provided}. Supported versions: {}", .allowed.join(", "))]
    UnsupportedUuidVersion {
        provided: String,
        allowed: &'static [&'static str],
    },

    #[error("at least one character type must be enabled")]
    EmptyCharset,
    #[error("failed to generate password meeting requirements after {attempts} attempts")]
    RequirementsExhausted { attempts: usize },

    #[error("input text cannot be empty")]
    EmptyEncodeInput,
    #[error("input text cannot be empty")]
    EmptyDecodeInput,
    #[error(
        "invalid Base64 format. Base64 should contain only A-Z, a-z, 0-9, +, /, and = for padding"
    )]
    Base64Format,
    #[error("invalid Base64 input: {0}")]
    Base64Decode(::base64::DecodeError),
    #[error("decoded bytes are not valid UTF-8 text: {0}")]
    Utf8(std::string::FromUtf8Error),
}

impl ToolboxError {
    /// Maps this failure onto the outward error taxonomy.
    pub fn code(&self) -> ErrorCode {
        match self {
            ToolboxError::OutOfRange { .. }
            | ToolboxError::InvalidInput(_)
            | ToolboxError::UnsupportedAlgorithm { .. }
            | ToolboxError::UnsupportedUuidVersion { .. } => ErrorCode::InvalidParameter,
            ToolboxError::InvalidType { .. } => ErrorCode::InvalidType,
            ToolboxError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
            ToolboxError::EmptyCharset => ErrorCode::ValidationError,
            ToolboxError::RequirementsExhausted { .. } => ErrorCode::GenerationError,
            ToolboxError::EmptyEncodeInput => ErrorCode::EncodingError,
            ToolboxError::EmptyDecodeInput
            | ToolboxError::Base64Format
            | ToolboxError::Base64Decode(_)
            | ToolboxError::Utf8(_) => ErrorCode::DecodingError,
        }
    }

    /// Provided value and valid set for enum-valued argument failures.
    pub fn details(&self) -> Option<ErrorDetails> {
        let (provided, allowed) = match self {
            ToolboxError::InvalidType { provided, allowed }
            | ToolboxError::InvalidFormat { provided, allowed }
            | ToolboxError::UnsupportedAlgorithm { provided, allowed }
            | ToolboxError::UnsupportedUuidVersion { provided, allowed } => (provided, allowed),
            _ => return None,
        };

        Some(ErrorDetails {
            provided: provided.clone(),
            valid_options: allowed.iter().map(|s| (*s).to_string()).collect(),
        })
    }
}

pub type ToolboxResult<T> = std::result::Result<T, ToolboxError>;

/// Fails with [`ToolboxError::OutOfRange`] unless `min <= value <= max`.
pub(crate) fn ensure_range(
    name: &'static str,
    value: usize,
    min: usize,
    max: usize,
) -> ToolboxResult<()> {
    if value < min || value > max {
        return Err(ToolboxError::OutOfRange {
            name,
            min,
            max,
            value,
        });
    }
    Ok(())
}
