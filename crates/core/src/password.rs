//! Random password generation.
//!
//! Characters are drawn from the operating system's CSPRNG. When requirements are enforced
//! the generator redraws the whole password until every enabled class is represented, up to
//! [`PASSWORD_MAX_ATTEMPTS`] times.

use crate::constants::{
    AMBIGUOUS, DIGITS, LOWERCASE, PASSWORD_MAX_ATTEMPTS, PASSWORD_MAX_BATCH, PASSWORD_MAX_LENGTH,
    PASSWORD_MIN_LENGTH, SYMBOLS, UPPERCASE,
};
use crate::error::{ensure_range, ToolboxError, ToolboxResult};
use crate::shared::{entropy_bits, round2};
use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Parameters for a single password draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PasswordOptions {
    pub length: usize,
    pub uppercase: bool,
    pub lowercase: bool,
    pub numbers: bool,
    pub symbols: bool,
    pub exclude_ambiguous: bool,
    pub ensure_requirements: bool,
}

impl Default for PasswordOptions {
    fn default() -> Self {
        Self {
            length: 16,
            uppercase: true,
            lowercase: true,
            numbers: true,
            symbols: false,
            exclude_ambiguous: false,
            ensure_requirements: true,
        }
    }
}

/// Strength label derived from entropy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum PasswordStrength {
    VeryWeak,
    Weak,
    Moderate,
    Strong,
    VeryStrong,
}

impl PasswordStrength {
    pub fn from_entropy(bits: f64) -> Self {
        if bits >= 100.0 {
            PasswordStrength::VeryStrong
        } else if bits >= 80.0 {
            PasswordStrength::Strong
        } else if bits >= 60.0 {
            PasswordStrength::Moderate
        } else if bits >= 40.0 {
            PasswordStrength::Weak
        } else {
            PasswordStrength::VeryWeak
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PasswordStrength::VeryWeak => "very_weak",
            PasswordStrength::Weak => "weak",
            PasswordStrength::Moderate => "moderate",
            PasswordStrength::Strong => "strong",
            PasswordStrength::VeryStrong => "very_strong",
        }
    }
}

/// A generated password with its derived metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct GeneratedPassword {
    pub password: String,
    pub length: usize,
    pub entropy_bits: f64,
    pub charset_size: usize,
    pub strength: PasswordStrength,
    pub config: PasswordOptions,
}

/// Assembles the allowed characters for `options`.
///
/// # Errors
///
/// Returns [`ToolboxError::EmptyCharset`] when no class is enabled.
pub fn build_charset(options: &PasswordOptions) -> ToolboxResult<Vec<char>> {
    let classes = [
        (options.uppercase, UPPERCASE),
        (options.lowercase, LOWERCASE),
        (options.numbers, DIGITS),
        (options.symbols, SYMBOLS),
    ];

    let charset: Vec<char> = classes
        .iter()
        .filter(|(enabled, _)| *enabled)
        .flat_map(|(_, class)| class.chars())
        .filter(|c| !options.exclude_ambiguous || !AMBIGUOUS.contains(*c))
        .collect();

    if charset.is_empty() {
        return Err(ToolboxError::EmptyCharset);
    }
    Ok(charset)
}

fn meets_requirements(password: &str, options: &PasswordOptions) -> bool {
    let classes = [
        (options.uppercase, UPPERCASE),
        (options.lowercase, LOWERCASE),
        (options.numbers, DIGITS),
        (options.symbols, SYMBOLS),
    ];

    classes
        .iter()
        .filter(|(enabled, _)| *enabled)
        .all(|(_, class)| password.chars().any(|c| class.contains(c)))
}

fn draw(charset: &[char], length: usize) -> String {
    let mut rng = OsRng;
    (0..length)
        .filter_map(|_| charset.choose(&mut rng).copied())
        .collect()
}

/// Generates one password.
///
/// # Errors
///
/// - [`ToolboxError::OutOfRange`] if `length` is outside 8..=128.
/// - [`ToolboxError::EmptyCharset`] if no character class is enabled.
/// - [`ToolboxError::RequirementsExhausted`] if requirements are enforced and no attempt
///   within the budget contained every enabled class.
pub fn generate(options: &PasswordOptions) -> ToolboxResult<GeneratedPassword> {
    ensure_range(
        "length",
        options.length,
        PASSWORD_MIN_LENGTH,
        PASSWORD_MAX_LENGTH,
    )?;
    let charset = build_charset(options)?;

    tracing::debug!(
        length = options.length,
        charset_size = charset.len(),
        "generating password"
    );

    let password = draw_meeting_requirements(options, PASSWORD_MAX_ATTEMPTS, || {
        draw(&charset, options.length)
    })?;

    let entropy = entropy_bits(options.length, charset.len());
    Ok(GeneratedPassword {
        password,
        length: options.length,
        entropy_bits: round2(entropy),
        charset_size: charset.len(),
        strength: PasswordStrength::from_entropy(entropy),
        config: *options,
    })
}

/// Calls `draw` until a candidate satisfies `options`, at most `attempts` times.
/// Without `ensure_requirements` the first candidate is taken as is.
fn draw_meeting_requirements(
    options: &PasswordOptions,
    attempts: usize,
    mut draw: impl FnMut() -> String,
) -> ToolboxResult<String> {
    for _ in 0..attempts {
        let password = draw();
        if !options.ensure_requirements || meets_requirements(&password, options) {
            return Ok(password);
        }
    }

    tracing::warn!(
        attempts,
        "password requirements not met within attempt budget"
    );
    Err(ToolboxError::RequirementsExhausted { attempts })
}

/// Generates `count` independent passwords with the same options.
pub fn generate_multiple(
    count: usize,
    options: &PasswordOptions,
) -> ToolboxResult<Vec<GeneratedPassword>> {
    ensure_range("count", count, 1, PASSWORD_MAX_BATCH)?;
    (0..count).map(|_| generate(options)).collect()
}
