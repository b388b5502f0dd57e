//! Cryptographic digests over UTF-8 text.
//!
//! The registry is a closed enum, so dispatch is a `match` rather than a lookup table;
//! [`HashAlgorithm::NAMES`] is the externally visible key list.

use crate::error::{ToolboxError, ToolboxResult};
use blake2::{Blake2b512, Blake2s256};
use md5::Md5;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};
use sha3::{Sha3_224, Sha3_256, Sha3_384, Sha3_512};
use std::str::FromStr;

/// Algorithms used by [`multiple_hashes`] when the caller names none.
pub const DEFAULT_MULTI_ALGORITHMS: &[&str] = &["md5", "sha1", "sha256", "sha512"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Sha3_224,
    Sha3_256,
    Sha3_384,
    Sha3_512,
    Blake2b,
    Blake2s,
}

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 12] = [
        HashAlgorithm::Md5,
        HashAlgorithm::Sha1,
        HashAlgorithm::Sha224,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha384,
        HashAlgorithm::Sha512,
        HashAlgorithm::Sha3_224,
        HashAlgorithm::Sha3_256,
        HashAlgorithm::Sha3_384,
        HashAlgorithm::Sha3_512,
        HashAlgorithm::Blake2b,
        HashAlgorithm::Blake2s,
    ];

    pub const NAMES: &'static [&'static str] = &[
        "md5", "sha1", "sha224", "sha256", "sha384", "sha512", "sha3_224", "sha3_256",
        "sha3_384", "sha3_512", "blake2b", "blake2s",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha224 => "sha224",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha384 => "sha384",
            HashAlgorithm::Sha512 => "sha512",
            HashAlgorithm::Sha3_224 => "sha3_224",
            HashAlgorithm::Sha3_256 => "sha3_256",
            HashAlgorithm::Sha3_384 => "sha3_384",
            HashAlgorithm::Sha3_512 => "sha3_512",
            HashAlgorithm::Blake2b => "blake2b",
            HashAlgorithm::Blake2s => "blake2s",
        }
    }

    /// Digest length in hex characters.
    pub fn output_size_hex(&self) -> usize {
        match self {
            HashAlgorithm::Md5 => 32,
            HashAlgorithm::Sha1 => 40,
            HashAlgorithm::Sha224 | HashAlgorithm::Sha3_224 => 56,
            HashAlgorithm::Sha256 | HashAlgorithm::Sha3_256 | HashAlgorithm::Blake2s => 64,
            HashAlgorithm::Sha384 | HashAlgorithm::Sha3_384 => 96,
            HashAlgorithm::Sha512 | HashAlgorithm::Sha3_512 | HashAlgorithm::Blake2b => 128,
        }
    }

    pub fn family(&self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "MD5",
            HashAlgorithm::Sha1 => "SHA-1",
            HashAlgorithm::Sha224
            | HashAlgorithm::Sha256
            | HashAlgorithm::Sha384
            | HashAlgorithm::Sha512 => "SHA-2",
            HashAlgorithm::Sha3_224
            | HashAlgorithm::Sha3_256
            | HashAlgorithm::Sha3_384
            | HashAlgorithm::Sha3_512 => "SHA-3",
            HashAlgorithm::Blake2b | HashAlgorithm::Blake2s => "BLAKE2",
        }
    }

    fn security_level(&self) -> &'static str {
        match self.family() {
            "MD5" | "SHA-1" => "weak",
            "SHA-2" => "good",
            _ => "excellent",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "Fast but cryptographically broken",
            HashAlgorithm::Sha1 => "Deprecated for cryptographic use",
            HashAlgorithm::Sha224 => "SHA-2 family, 224-bit",
            HashAlgorithm::Sha256 => "SHA-2 family, 256-bit (recommended)",
            HashAlgorithm::Sha384 => "SHA-2 family, 384-bit",
            HashAlgorithm::Sha512 => "SHA-2 family, 512-bit",
            HashAlgorithm::Sha3_224 => "SHA-3 family, 224-bit",
            HashAlgorithm::Sha3_256 => "SHA-3 family, 256-bit",
            HashAlgorithm::Sha3_384 => "SHA-3 family, 384-bit",
            HashAlgorithm::Sha3_512 => "SHA-3 family, 512-bit",
            HashAlgorithm::Blake2b => "BLAKE2b, fast and secure",
            HashAlgorithm::Blake2s => "BLAKE2s, optimized for 8-32 bit platforms",
        }
    }

    /// Lowercase hex digest of `data`.
    pub fn digest_hex(&self, data: &[u8]) -> String {
        fn run<D: Digest>(data: &[u8]) -> String {
            hex::encode(D::digest(data))
        }

        match self {
            HashAlgorithm::Md5 => run::<Md5>(data),
            HashAlgorithm::Sha1 => run::<Sha1>(data),
            HashAlgorithm::Sha224 => run::<Sha224>(data),
            HashAlgorithm::Sha256 => run::<Sha256>(data),
            HashAlgorithm::Sha384 => run::<Sha384>(data),
            HashAlgorithm::Sha512 => run::<Sha512>(data),
            HashAlgorithm::Sha3_224 => run::<Sha3_224>(data),
            HashAlgorithm::Sha3_256 => run::<Sha3_256>(data),
            HashAlgorithm::Sha3_384 => run::<Sha3_384>(data),
            HashAlgorithm::Sha3_512 => run::<Sha3_512>(data),
            HashAlgorithm::Blake2b => run::<Blake2b512>(data),
            HashAlgorithm::Blake2s => run::<Blake2s256>(data),
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = ToolboxError;

    /// Parses a registry name. Case, surrounding whitespace and `-`/`_` are not significant.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_ascii_lowercase().replace('-', "_");
        HashAlgorithm::ALL
            .into_iter()
            .find(|alg| alg.as_str() == normalised)
            .ok_or(ToolboxError::UnsupportedAlgorithm {
                provided: normalised,
                allowed: Self::NAMES,
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HashOutput {
    pub hash: String,
    pub algorithm: HashAlgorithm,
    /// Input length in characters.
    pub input_length: usize,
    /// Digest length in hex characters.
    pub hash_length: usize,
    pub encoding: String,
}

/// One entry of a [`MultiHashOutput`]; exactly one of `hash` or `error` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HashEntry {
    pub algorithm: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MultiHashOutput {
    pub hashes: Vec<HashEntry>,
    pub input_length: usize,
    pub algorithms_used: Vec<String>,
    pub encoding: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AlgorithmInfo {
    pub algorithm: HashAlgorithm,
    pub output_size_hex: usize,
    pub security_level: String,
    pub description: String,
    pub family: String,
}

/// Hashes the UTF-8 bytes of `text` with the named algorithm.
///
/// # Errors
///
/// Returns [`ToolboxError::UnsupportedAlgorithm`] listing every supported name.
pub fn hash(text: &str, algorithm: &str) -> ToolboxResult<HashOutput> {
    let algorithm: HashAlgorithm = algorithm.parse()?;
    tracing::debug!(algorithm = algorithm.as_str(), "hashing text");

    let hash = algorithm.digest_hex(text.as_bytes());
    Ok(HashOutput {
        hash_length: hash.len(),
        hash,
        algorithm,
        input_length: text.chars().count(),
        encoding: "utf-8".into(),
    })
}

/// Hashes `text` with each named algorithm; unknown names become per-entry errors.
///
/// An empty list selects [`DEFAULT_MULTI_ALGORITHMS`].
pub fn multiple_hashes<S: AsRef<str>>(text: &str, algorithms: &[S]) -> MultiHashOutput {
    let names: Vec<String> = if algorithms.is_empty() {
        DEFAULT_MULTI_ALGORITHMS
            .iter()
            .map(|s| (*s).to_string())
            .collect()
    } else {
        algorithms.iter().map(|s| s.as_ref().to_string()).collect()
    };

    let hashes = names
        .iter()
        .map(|name| match hash(text, name) {
            Ok(out) => HashEntry {
                algorithm: name.clone(),
                hash: Some(out.hash),
                hash_length: Some(out.hash_length),
                error: None,
            },
            Err(e) => HashEntry {
                algorithm: name.clone(),
                hash: None,
                hash_length: None,
                error: Some(e.to_string()),
            },
        })
        .collect();

    MultiHashOutput {
        hashes,
        input_length: text.chars().count(),
        algorithms_used: names,
        encoding: "utf-8".into(),
    }
}

/// Static description of one algorithm.
pub fn algorithm_info(name: &str) -> ToolboxResult<AlgorithmInfo> {
    let algorithm: HashAlgorithm = name.parse()?;
    Ok(AlgorithmInfo {
        algorithm,
        output_size_hex: algorithm.output_size_hex(),
        security_level: algorithm.security_level().into(),
        description: algorithm.description().into(),
        family: algorithm.family().into(),
    })
}

/// Every registry name, in registry order.
pub fn supported_algorithms() -> Vec<String> {
    HashAlgorithm::NAMES.iter().map(|s| (*s).to_string()).collect()
}
