//! # Toolbox Core
//!
//! Core operations for the developer toolbox.
//!
//! This crate contains pure, stateless generators and codecs:
//! - Filler text, passwords and API keys
//! - Cryptographic hashes and UUIDs
//! - Base64 and URL encoding utilities
//!
//! **No API concerns**: HTTP routing, request parsing and CLI argument handling belong in
//! `api-rest`, `api-shared` and `toolbox-cli`. Every operation here returns either a
//! serialisable result record or a [`ToolboxError`] that maps onto the outward [`ErrorCode`]
//! taxonomy.

pub mod apikey;
pub mod base64;
pub mod constants;
pub mod error;
pub mod hash;
pub mod password;
pub mod text;
pub mod url;
pub mod uuid;

mod shared;

pub use error::{ErrorCode, ErrorDetails, ToolboxError, ToolboxResult};
pub use shared::utc_timestamp;
