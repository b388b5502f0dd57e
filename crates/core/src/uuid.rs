//! UUID generation and analysis.
//!
//! Only versions 1 and 4 are generated. Version 1 values use a 48-bit node identifier chosen
//! once per process from the OS RNG with the multicast bit set, so no hardware address is
//! ever read. [`validate`] accepts any textual form the `uuid` crate can parse (hyphenated,
//! simple, braced or URN) and reports on whichever version it finds.

use crate::constants::{UUID_FORMAT, UUID_MAX_BATCH};
use crate::error::{ensure_range, ToolboxError, ToolboxResult};
use crate::shared::utc_timestamp;
use ::uuid::{Uuid, Variant};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::OnceLock;

const EXAMPLE_UUID: &str = "550e8400-e29b-41d4-a716-446655440000";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum UuidVersion {
    V1,
    V4,
}

impl UuidVersion {
    pub const NAMES: &'static [&'static str] = &["1", "4", "v1", "v4"];

    /// Upper-case tag, e.g. `V4`.
    pub fn tag(&self) -> &'static str {
        match self {
            UuidVersion::V1 => "V1",
            UuidVersion::V4 => "V4",
        }
    }
}

impl FromStr for UuidVersion {
    type Err = ToolboxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_ascii_lowercase();
        match normalised.as_str() {
            "1" | "v1" => Ok(UuidVersion::V1),
            "4" | "v4" => Ok(UuidVersion::V4),
            _ => Err(ToolboxError::UnsupportedUuidVersion {
                provided: normalised,
                allowed: Self::NAMES,
            }),
        }
    }
}

/// Human-readable (type, description) pair for a version number.
fn describe_version(version: usize) -> (&'static str, &'static str) {
    match version {
        1 => ("Time-based UUID", "Based on timestamp and node identifier"),
        4 => ("Random UUID", "Cryptographically random UUID"),
        _ => ("Unknown", "Unknown UUID version"),
    }
}

fn describe_variant(variant: Variant) -> String {
    match variant {
        Variant::NCS => "Reserved for NCS compatibility".into(),
        Variant::RFC4122 => "RFC 4122 variant".into(),
        Variant::Microsoft => "Reserved for Microsoft compatibility".into(),
        Variant::Future => "Reserved for future definition".into(),
        other => format!("Unknown variant ({other:?})"),
    }
}

/// The five hyphen-separated groups, with the fourth split into its two octets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UuidComponents {
    pub time_low: String,
    pub time_mid: String,
    pub time_hi_and_version: String,
    pub clock_seq_hi_and_reserved: String,
    pub clock_seq_low: String,
    pub node: String,
}

impl UuidComponents {
    fn of(id: &Uuid) -> Self {
        let hex = id.simple().to_string();
        Self {
            time_low: hex[0..8].to_string(),
            time_mid: hex[8..12].to_string(),
            time_hi_and_version: hex[12..16].to_string(),
            clock_seq_hi_and_reserved: hex[16..18].to_string(),
            clock_seq_low: hex[18..20].to_string(),
            node: hex[20..32].to_string(),
        }
    }
}

/// Numeric RFC 4122 fields; populated for version 1 only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UuidFields {
    pub time_low: Option<u32>,
    pub time_mid: Option<u16>,
    pub time_hi_version: Option<u16>,
    pub clock_seq_hi_variant: Option<u8>,
    pub clock_seq_low: Option<u8>,
    pub node: Option<u64>,
}

impl UuidFields {
    fn of(id: &Uuid) -> Self {
        let (time_low, time_mid, time_hi_version, tail) = id.as_fields();
        let node = tail[2..]
            .iter()
            .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte));

        Self {
            time_low: Some(time_low),
            time_mid: Some(time_mid),
            time_hi_version: Some(time_hi_version),
            clock_seq_hi_variant: Some(tail[0]),
            clock_seq_low: Some(tail[1]),
            node: Some(node),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UuidMetadata {
    pub variant: String,
    pub is_nil: bool,
    /// 32 lowercase hex digits without hyphens.
    pub hex: String,
    pub bytes: usize,
    pub fields: UuidFields,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct GeneratedUuid {
    pub uuid: String,
    pub version: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub format: String,
    pub length: usize,
    pub timestamp: String,
    pub components: UuidComponents,
    pub metadata: UuidMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UuidBatchEntry {
    pub uuid: String,
    pub timestamp: String,
    pub hex: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UuidBatch {
    pub uuids: Vec<UuidBatchEntry>,
    pub count: usize,
    pub version: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub generated_at: String,
    pub format: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ValidatedMetadata {
    pub is_nil: bool,
    pub hex: String,
    pub bytes_length: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ValidUuid {
    pub is_valid: bool,
    /// Canonical hyphenated form.
    pub uuid: String,
    pub version: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub variant: String,
    pub format: String,
    pub length: usize,
    pub components: UuidComponents,
    pub metadata: ValidatedMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct InvalidUuid {
    pub is_valid: bool,
    pub error: String,
    pub input: String,
    pub suggestions: Vec<String>,
}

/// Outcome of [`validate`]. Malformed input is a negative result, never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(untagged)]
pub enum UuidValidation {
    Valid(ValidUuid),
    Invalid(InvalidUuid),
}

impl UuidValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, UuidValidation::Valid(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct VersionInfo {
    pub name: String,
    pub description: String,
    pub use_case: String,
    pub privacy: String,
    pub uniqueness: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SupportedVersions {
    pub versions: BTreeMap<String, VersionInfo>,
    pub format: String,
    pub total_length: usize,
    pub example: String,
}

fn node_id() -> &'static [u8; 6] {
    static NODE: OnceLock<[u8; 6]> = OnceLock::new();
    NODE.get_or_init(|| {
        let mut node = [0u8; 6];
        OsRng.fill_bytes(&mut node);
        // Multicast bit marks the node as not derived from a hardware address.
        node[0] |= 0x01;
        node
    })
}

fn new_uuid(version: UuidVersion) -> Uuid {
    match version {
        UuidVersion::V1 => Uuid::now_v1(node_id()),
        UuidVersion::V4 => Uuid::new_v4(),
    }
}

/// Generates one UUID of `version` (`1`, `v1`, `4` or `v4`).
pub fn generate(version: &str) -> ToolboxResult<GeneratedUuid> {
    let version: UuidVersion = version.parse()?;
    tracing::debug!(version = version.tag(), "generating uuid");

    let id = new_uuid(version);
    let (kind, description) = describe_version(id.get_version_num());
    let fields = match version {
        UuidVersion::V1 => UuidFields::of(&id),
        UuidVersion::V4 => UuidFields::default(),
    };
    let text = id.hyphenated().to_string();

    Ok(GeneratedUuid {
        length: text.len(),
        uuid: text,
        version: version.tag().into(),
        kind: kind.into(),
        description: description.into(),
        format: UUID_FORMAT.into(),
        timestamp: utc_timestamp(),
        components: UuidComponents::of(&id),
        metadata: UuidMetadata {
            variant: describe_variant(id.get_variant()),
            is_nil: id.is_nil(),
            hex: id.simple().to_string(),
            bytes: id.as_bytes().len(),
            fields,
        },
    })
}

/// Generates `count` UUIDs of the same version.
pub fn generate_multiple(version: &str, count: usize) -> ToolboxResult<UuidBatch> {
    let parsed: UuidVersion = version.parse()?;
    ensure_range("count", count, 1, UUID_MAX_BATCH)?;

    let uuids = (0..count)
        .map(|_| {
            generate(version).map(|g| UuidBatchEntry {
                uuid: g.uuid,
                timestamp: g.timestamp,
                hex: g.metadata.hex,
            })
        })
        .collect::<ToolboxResult<Vec<_>>>()?;

    let (kind, _) = describe_version(match parsed {
        UuidVersion::V1 => 1,
        UuidVersion::V4 => 4,
    });

    Ok(UuidBatch {
        uuids,
        count,
        version: parsed.tag().into(),
        kind: kind.into(),
        generated_at: utc_timestamp(),
        format: UUID_FORMAT.into(),
    })
}

/// Parses and describes `input` after trimming surrounding whitespace.
pub fn validate(input: &str) -> UuidValidation {
    match Uuid::parse_str(input.trim()) {
        Ok(id) => {
            // Version bits only carry meaning under the RFC 4122 variant.
            let version = (id.get_variant() == Variant::RFC4122).then(|| id.get_version_num());
            let (kind, description) = describe_version(version.unwrap_or(0));
            let text = id.hyphenated().to_string();

            UuidValidation::Valid(ValidUuid {
                is_valid: true,
                length: text.len(),
                uuid: text,
                version: version.map_or_else(|| "VNONE".to_string(), |n| format!("V{n}")),
                kind: kind.into(),
                description: description.into(),
                variant: describe_variant(id.get_variant()),
                format: UUID_FORMAT.into(),
                components: UuidComponents::of(&id),
                metadata: ValidatedMetadata {
                    is_nil: id.is_nil(),
                    hex: id.simple().to_string(),
                    bytes_length: id.as_bytes().len(),
                },
            })
        }
        Err(e) => UuidValidation::Invalid(InvalidUuid {
            is_valid: false,
            error: e.to_string(),
            input: input.to_string(),
            suggestions: vec![
                format!("UUID should be in format: {UUID_FORMAT}"),
                format!("Example: {EXAMPLE_UUID}"),
                "Check for correct length (36 characters with dashes)".into(),
            ],
        }),
    }
}

/// Static description of the generated versions.
pub fn supported_versions() -> SupportedVersions {
    let mut versions = BTreeMap::new();
    versions.insert(
        "v1".to_string(),
        VersionInfo {
            name: "Time-based UUID".into(),
            description: "Based on timestamp and node identifier".into(),
            use_case: "When you need UUIDs that can be sorted by creation time".into(),
            privacy: "Node identifier is random per process; no MAC address is embedded".into(),
            uniqueness: "Guaranteed unique across space and time".into(),
        },
    );
    versions.insert(
        "v4".to_string(),
        VersionInfo {
            name: "Random UUID".into(),
            description: "Cryptographically random UUID".into(),
            use_case: "General purpose, most commonly used".into(),
            privacy: "No personally identifiable information".into(),
            uniqueness: "Statistically unique (extremely low collision probability)".into(),
        },
    );

    SupportedVersions {
        versions,
        format: format!("{UUID_FORMAT} separated by hyphens"),
        total_length: 36,
        example: EXAMPLE_UUID.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn is_canonical(s: &str) -> bool {
        let groups: Vec<&str> = s.split('-').collect();
        groups.iter().map(|g| g.len()).collect::<Vec<_>>() == [8, 4, 4, 4, 12]
            && groups
                .iter()
                .all(|g| g.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)))
    }

    #[test]
    fn version_tokens_normalise() {
        for token in ["1", "v1", " V1 "] {
            assert_eq!(token.parse::<UuidVersion>().unwrap(), UuidVersion::V1);
        }
        for token in ["4", "v4", "V4"] {
            assert_eq!(token.parse::<UuidVersion>().unwrap(), UuidVersion::V4);
        }
        let err = "v7".parse::<UuidVersion>().unwrap_err();
        assert_eq!(err.code(), crate::ErrorCode::InvalidParameter);
    }

    #[test]
    fn v4_has_expected_shape() {
        let g = generate("v4").unwrap();

        assert!(is_canonical(&g.uuid));
        assert_eq!(g.version, "V4");
        assert_eq!(g.kind, "Random UUID");
        assert_eq!(g.length, 36);
        assert_eq!(&g.uuid[14..15], "4");
        assert_eq!(g.metadata.variant, "RFC 4122 variant");
        assert_eq!(g.metadata.bytes, 16);
        assert_eq!(g.metadata.hex, g.uuid.replace('-', ""));
        assert_eq!(g.metadata.fields, UuidFields::default());
    }

    #[test]
    fn v1_reports_fields_and_multicast_node() {
        let g = generate("1").unwrap();

        assert_eq!(g.version, "V1");
        assert_eq!(&g.uuid[14..15], "1");
        assert_eq!(g.components.node.len(), 12);

        let node = g.metadata.fields.node.unwrap();
        assert_eq!((node >> 40) & 0x01, 1);
        let time_low = u32::from_str_radix(&g.components.time_low, 16).unwrap();
        assert_eq!(g.metadata.fields.time_low, Some(time_low));
    }

    #[test]
    fn hundred_uuids_are_distinct_for_each_version() {
        for version in ["v1", "v4"] {
            let batch = generate_multiple(version, 100).unwrap();
            let unique: HashSet<&str> = batch.uuids.iter().map(|u| u.uuid.as_str()).collect();

            assert_eq!(unique.len(), 100, "collision in {version}");
            assert!(batch.uuids.iter().all(|u| is_canonical(&u.uuid)));
        }
    }

    #[test]
    fn batch_count_is_bounded() {
        assert!(generate_multiple("v4", 0).is_err());
        assert!(generate_multiple("v4", 101).is_err());
        assert!(generate_multiple("v9", 5).is_err());
    }

    #[test]
    fn validate_known_v4() {
        let result = validate("550e8400-e29b-41d4-a716-446655440000");
        match result {
            UuidValidation::Valid(v) => {
                assert_eq!(v.version, "V4");
                assert_eq!(v.components.time_low, "550e8400");
                assert_eq!(v.components.clock_seq_hi_and_reserved, "a7");
                assert_eq!(v.components.clock_seq_low, "16");
                assert!(!v.metadata.is_nil);
            }
            UuidValidation::Invalid(i) => panic!("expected valid, got {}", i.error),
        }
    }

    #[test]
    fn validate_accepts_other_textual_forms() {
        assert!(validate("  550E8400E29B41D4A716446655440000\n").is_valid());
        assert!(validate("{550e8400-e29b-41d4-a716-446655440000}").is_valid());
    }

    #[test]
    fn validate_nil_uuid() {
        match validate("00000000-0000-0000-0000-000000000000") {
            UuidValidation::Valid(v) => {
                assert!(v.metadata.is_nil);
                assert_eq!(v.kind, "Unknown");
                assert_eq!(v.version, "VNONE");
            }
            UuidValidation::Invalid(_) => panic!("nil uuid should parse"),
        }
    }

    #[test]
    fn validate_non_rfc_variant_has_no_version() {
        // Version nibble says 1, variant bits say NCS.
        match validate("123e4567-e89b-12d3-0456-426614174000") {
            UuidValidation::Valid(v) => {
                assert_eq!(v.version, "VNONE");
                assert_eq!(v.kind, "Unknown");
            }
            UuidValidation::Invalid(_) => panic!("well-formed uuid should parse"),
        }
    }

    #[test]
    fn validate_rejects_garbage_with_suggestions() {
        match validate(" invalid-uuid-format ") {
            UuidValidation::Invalid(i) => {
                assert!(!i.is_valid);
                assert_eq!(i.input, " invalid-uuid-format ");
                assert!(!i.suggestions.is_empty());
                assert!(!i.error.is_empty());
            }
            UuidValidation::Valid(_) => panic!("expected invalid"),
        }
    }

    #[test]
    fn validation_serialises_flat() {
        let json = serde_json::to_value(validate("nope")).unwrap();
        assert_eq!(json["is_valid"], false);
        assert!(json["suggestions"].is_array());
    }

    #[test]
    fn supported_versions_table() {
        let table = supported_versions();
        assert_eq!(table.versions.len(), 2);
        assert_eq!(table.total_length, 36);
        assert_eq!(table.versions["v4"].name, "Random UUID");
    }
}
