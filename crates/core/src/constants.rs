//! Constants used throughout the toolbox core crate.
//!
//! Character sets, alphabets and parameter bounds live here so the generators and the
//! API/CLI surfaces agree on them.

/// Uppercase ASCII letters.
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Lowercase ASCII letters.
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";

/// ASCII digits.
pub const DIGITS: &str = "0123456789";

/// Symbols available to the password generator.
pub const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Glyphs removed from password charsets when ambiguous characters are excluded.
pub const AMBIGUOUS: &str = "0O1lI|`'";

/// Bitcoin-style base58 alphabet (no `0`, `O`, `I`, `l`).
pub const BASE58_ALPHABET: &[u8; 58] =
    b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Password length bounds.
pub const PASSWORD_MIN_LENGTH: usize = 8;
pub const PASSWORD_MAX_LENGTH: usize = 128;

/// Attempts made to satisfy character-class requirements before giving up.
pub const PASSWORD_MAX_ATTEMPTS: usize = 100;

/// Maximum passwords per batch.
pub const PASSWORD_MAX_BATCH: usize = 100;

/// Maximum byte length for hex/base64/base58 API keys.
pub const API_KEY_MAX_BYTES: usize = 128;

/// Maximum character length for custom-charset API keys.
pub const API_KEY_MAX_CUSTOM_LENGTH: usize = 256;

/// Maximum API-key prefix length in characters.
pub const API_KEY_MAX_PREFIX: usize = 20;

/// Maximum API keys per batch.
pub const API_KEY_MAX_BATCH: usize = 50;

/// Maximum UUIDs per batch.
pub const UUID_MAX_BATCH: usize = 100;

/// Human-readable UUID layout.
pub const UUID_FORMAT: &str = "8-4-4-4-12 hexadecimal digits";
