//! Subcommand execution.
//!
//! Every command writes its primary value to `out`, one item per line, and any
//! requested metadata to `err`. With `--json` the full core record is written to
//! `out` instead and nothing goes to `err`.

use serde::Serialize;
use std::io::Write;

use toolbox_core::apikey::{self, ApiKeyOptions, KeyFormat};
use toolbox_core::base64;
use toolbox_core::hash;
use toolbox_core::password::{self, PasswordOptions};
use toolbox_core::text::{TextGenerator, TextKind};
use toolbox_core::url;
use toolbox_core::uuid::{self, UuidValidation};

use crate::{
    ApiKeyArgs, Base64Command, Cli, Commands, HashCommand, PasswordArgs, UrlCommand, UuidCommand,
};

struct Output<'a> {
    json: bool,
    out: &'a mut dyn Write,
    err: &'a mut dyn Write,
}

impl Output<'_> {
    /// Writes either the JSON record or the given primary lines.
    fn emit<T, I>(&mut self, record: &T, lines: I) -> anyhow::Result<()>
    where
        T: Serialize + ?Sized,
        I: IntoIterator,
        I::Item: std::fmt::Display,
    {
        if self.json {
            serde_json::to_writer_pretty(&mut *self.out, record)?;
            writeln!(self.out)?;
        } else {
            for line in lines {
                writeln!(self.out, "{line}")?;
            }
        }
        Ok(())
    }

    fn meta(&mut self, enabled: bool, line: impl std::fmt::Display) -> anyhow::Result<()> {
        if enabled && !self.json {
            writeln!(self.err, "{line}")?;
        }
        Ok(())
    }
}

/// Runs a parsed command line.
///
/// Returns `Ok(false)` when a validation command produced a negative verdict, so the
/// caller can exit non-zero without treating it as an error.
pub(crate) fn run(cli: Cli, out: &mut dyn Write, err: &mut dyn Write) -> anyhow::Result<bool> {
    tracing::debug!(command = ?cli.command, json = cli.json, "running command");
    let mut output = Output {
        json: cli.json,
        out,
        err,
    };

    match cli.command {
        Commands::Text {
            kind,
            count,
            verbose,
        } => {
            let kind: TextKind = kind.parse()?;
            let text = TextGenerator::new().generate(kind, count)?;
            output.emit(&text, &text.items)?;
            output.meta(
                verbose,
                format!("type: {}, count: {}", text.kind.as_str(), text.count),
            )?;
            Ok(true)
        }
        Commands::Password(args) => run_password(args, &mut output),
        Commands::Apikey(args) => run_apikey(args, &mut output),
        Commands::Hash(command) => run_hash(command, &mut output),
        Commands::Uuid(command) => run_uuid(command, &mut output),
        Commands::Base64(command) => run_base64(command, &mut output),
        Commands::Url(command) => run_url(command, &mut output),
    }
}

fn run_password(args: PasswordArgs, output: &mut Output<'_>) -> anyhow::Result<bool> {
    let options = PasswordOptions {
        length: args.length,
        uppercase: args.uppercase,
        lowercase: args.lowercase,
        numbers: args.numbers,
        symbols: args.symbols,
        exclude_ambiguous: args.exclude_ambiguous,
        ensure_requirements: args.ensure_requirements,
    };

    let passwords = if args.count == 1 {
        let single = password::generate(&options)?;
        output.emit(&single, [&single.password])?;
        vec![single]
    } else {
        let many = password::generate_multiple(args.count, &options)?;
        output.emit(&many, many.iter().map(|p| &p.password))?;
        many
    };

    for p in &passwords {
        output.meta(
            args.show_entropy,
            format!(
                "length: {}, charset: {}, entropy: {} bits, strength: {}",
                p.length,
                p.charset_size,
                p.entropy_bits,
                p.strength.as_str()
            ),
        )?;
    }
    Ok(true)
}

fn run_apikey(args: ApiKeyArgs, output: &mut Output<'_>) -> anyhow::Result<bool> {
    let options = ApiKeyOptions {
        format: args.format.parse::<KeyFormat>()?,
        length: args.length,
        prefix: args.prefix,
        charset: args.charset,
    };

    let keys = if args.count == 1 {
        let single = apikey::generate(&options)?;
        output.emit(&single, [&single.api_key])?;
        vec![single]
    } else {
        let many = apikey::generate_multiple(args.count, &options)?;
        output.emit(&many, many.iter().map(|k| &k.api_key))?;
        many
    };

    for k in &keys {
        output.meta(
            args.show_entropy,
            format!(
                "format: {}, length: {}, entropy: {} bits, security: {}",
                k.format.as_str(),
                k.length,
                k.entropy_bits,
                k.security_level.as_str()
            ),
        )?;
    }
    Ok(true)
}

fn run_hash(command: HashCommand, output: &mut Output<'_>) -> anyhow::Result<bool> {
    match command {
        HashCommand::Digest {
            text,
            algorithm,
            verbose,
        } => {
            let digest = hash::hash(&text, &algorithm)?;
            output.emit(&digest, [&digest.hash])?;
            output.meta(
                verbose,
                format!(
                    "algorithm: {}, input length: {}, hash length: {}",
                    digest.algorithm.as_str(),
                    digest.input_length,
                    digest.hash_length
                ),
            )?;
        }
        HashCommand::Multi { text, algorithms } => {
            let result = hash::multiple_hashes(&text, &algorithms);
            let lines = result.hashes.iter().map(|entry| match (&entry.hash, &entry.error) {
                (Some(h), _) => format!("{}: {}", entry.algorithm, h),
                (None, Some(e)) => format!("{}: error: {}", entry.algorithm, e),
                (None, None) => format!("{}:", entry.algorithm),
            });
            output.emit(&result, lines)?;
        }
        HashCommand::Info { name } => {
            let info = hash::algorithm_info(&name)?;
            output.emit(
                &info,
                [format!(
                    "{} ({}): {} hex chars, {}. {}",
                    info.algorithm.as_str(),
                    info.family,
                    info.output_size_hex,
                    info.security_level,
                    info.description
                )],
            )?;
        }
        HashCommand::List => {
            let names = hash::supported_algorithms();
            output.emit(&names, &names)?;
        }
    }
    Ok(true)
}

fn run_uuid(command: UuidCommand, output: &mut Output<'_>) -> anyhow::Result<bool> {
    match command {
        UuidCommand::Generate {
            version,
            count,
            verbose,
        } => {
            if count == 1 {
                let generated = uuid::generate(&version)?;
                output.emit(&generated, [&generated.uuid])?;
                output.meta(
                    verbose,
                    format!(
                        "version: {}, type: {}, variant: {}",
                        generated.version, generated.kind, generated.metadata.variant
                    ),
                )?;
            } else {
                let batch = uuid::generate_multiple(&version, count)?;
                output.emit(&batch, batch.uuids.iter().map(|u| &u.uuid))?;
                output.meta(
                    verbose,
                    format!(
                        "version: {}, type: {}, count: {}",
                        batch.version, batch.kind, batch.count
                    ),
                )?;
            }
            Ok(true)
        }
        UuidCommand::Validate { uuid, verbose } => {
            let verdict = uuid::validate(&uuid);
            match &verdict {
                UuidValidation::Valid(valid) => {
                    output.emit(&verdict, [&valid.uuid])?;
                    output.meta(
                        verbose,
                        format!(
                            "version: {}, type: {}, variant: {}",
                            valid.version, valid.kind, valid.variant
                        ),
                    )?;
                }
                UuidValidation::Invalid(invalid) => {
                    output.emit(&verdict, [format!("invalid: {}", invalid.error)])?;
                    for suggestion in &invalid.suggestions {
                        output.meta(verbose, format!("suggestion: {suggestion}"))?;
                    }
                }
            }
            Ok(verdict.is_valid())
        }
        UuidCommand::Versions => {
            let versions = uuid::supported_versions();
            let lines = versions
                .versions
                .iter()
                .map(|(tag, info)| format!("{tag}: {} - {}", info.name, info.description));
            output.emit(&versions, lines)?;
            Ok(true)
        }
    }
}

fn run_base64(command: Base64Command, output: &mut Output<'_>) -> anyhow::Result<bool> {
    match command {
        Base64Command::Encode { text, verbose } => {
            let encoded = base64::encode(&text)?;
            output.emit(&encoded, [&encoded.encoded])?;
            output.meta(
                verbose,
                format!(
                    "original length: {}, encoded length: {}, size increase: {}%, padding: {}",
                    encoded.original_length,
                    encoded.encoded_length,
                    encoded.size_increase_percent,
                    encoded.padding_chars
                ),
            )?;
            Ok(true)
        }
        Base64Command::Decode { encoded, verbose } => {
            let decoded = base64::decode(&encoded)?;
            output.emit(&decoded, [&decoded.decoded])?;
            output.meta(
                verbose,
                format!(
                    "encoded length: {}, decoded length: {}, bytes: {}",
                    decoded.encoded_length, decoded.decoded_length, decoded.bytes_decoded
                ),
            )?;
            Ok(true)
        }
        Base64Command::Validate { text } => {
            let verdict = base64::validate(&text);
            let line = match (&verdict.error, verdict.can_decode) {
                (Some(e), _) => format!("invalid: {e}"),
                (None, Some(false)) => match &verdict.decode_error {
                    Some(e) => format!("well-formed but not decodable: {e}"),
                    None => "well-formed but not decodable".to_string(),
                },
                _ => "valid".to_string(),
            };
            output.emit(&verdict, [line])?;
            Ok(verdict.is_valid)
        }
    }
}

fn run_url(command: UrlCommand, output: &mut Output<'_>) -> anyhow::Result<bool> {
    match command {
        UrlCommand::Encode {
            text,
            kind,
            verbose,
        } => {
            let encoded = url::encode(&text, &kind)?;
            output.emit(&encoded, [&encoded.encoded])?;
            output.meta(
                verbose,
                format!(
                    "type: {}, characters encoded: {}, size increase: {}%",
                    encoded.encoding_type.as_str(),
                    encoded.characters_encoded,
                    encoded.size_increase_percent
                ),
            )?;
            Ok(true)
        }
        UrlCommand::Decode {
            encoded,
            kind,
            verbose,
        } => {
            let decoded = url::decode(&encoded, &kind)?;
            output.emit(&decoded, [&decoded.decoded])?;
            output.meta(
                verbose,
                format!(
                    "type: {}{}, characters decoded: {}",
                    decoded.decoding_type.as_str(),
                    if decoded.auto_detected {
                        " (auto-detected)"
                    } else {
                        ""
                    },
                    decoded.characters_decoded
                ),
            )?;
            Ok(true)
        }
        UrlCommand::Validate { text } => {
            let verdict = url::validate(&text);
            let mut lines = vec![if verdict.is_valid {
                "valid".to_string()
            } else {
                match &verdict.error {
                    Some(e) => format!("invalid: {e}"),
                    None => "invalid".to_string(),
                }
            }];
            lines.extend(verdict.issues.iter().map(|i| format!("issue: {i}")));
            lines.extend(verdict.warnings.iter().map(|w| format!("warning: {w}")));
            output.emit(&verdict, lines)?;
            Ok(verdict.is_valid)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn exec(args: &[&str]) -> (anyhow::Result<bool>, String, String) {
        let cli = Cli::try_parse_from(args).expect("arguments should parse");
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = run(cli, &mut out, &mut err);
        (
            result,
            String::from_utf8(out).expect("utf8 stdout"),
            String::from_utf8(err).expect("utf8 stderr"),
        )
    }

    #[test]
    fn text_words_one_per_line() {
        let (result, out, err) = exec(&["toolbox", "text", "--type", "word", "--count", "3"]);
        assert!(result.expect("text should succeed"));
        assert_eq!(out.lines().count(), 3);
        assert!(err.is_empty());
    }

    #[test]
    fn text_rejects_unknown_type() {
        let (result, out, _) = exec(&["toolbox", "text", "--type", "chapter"]);
        let e = result.expect_err("unknown type should fail");
        assert!(e.to_string().contains("chapter"));
        assert!(out.is_empty());
    }

    #[test]
    fn password_length_and_entropy_on_stderr() {
        let (result, out, err) = exec(&[
            "toolbox",
            "password",
            "--length",
            "24",
            "--symbols",
            "true",
            "--show-entropy",
        ]);
        assert!(result.expect("password should succeed"));
        assert_eq!(out.trim_end().chars().count(), 24);
        assert!(err.contains("entropy"));
    }

    #[test]
    fn password_out_of_range_is_error() {
        let (result, _, _) = exec(&["toolbox", "password", "--length", "4"]);
        assert!(result.is_err());
    }

    #[test]
    fn password_batch_json_is_array() {
        let (result, out, _) = exec(&["toolbox", "--json", "password", "--count", "3"]);
        assert!(result.expect("batch should succeed"));
        let value: serde_json::Value = serde_json::from_str(&out).expect("valid json");
        assert_eq!(value.as_array().map(Vec::len), Some(3));
    }

    #[test]
    fn apikey_prefix_is_applied() {
        let (result, out, _) = exec(&["toolbox", "apikey", "--prefix", "sk_", "--length", "16"]);
        assert!(result.expect("apikey should succeed"));
        let key = out.trim_end();
        assert!(key.starts_with("sk_"));
        assert_eq!(key.len(), 3 + 32);
    }

    #[test]
    fn hash_digest_prints_hex() {
        let (result, out, _) = exec(&["toolbox", "hash", "digest", "hello", "--algorithm", "md5"]);
        assert!(result.expect("hash should succeed"));
        assert_eq!(out.trim_end(), "5d41402abc4b2a76b9719d911017c592");
    }

    #[test]
    fn hash_multi_reports_unknown_inline() {
        let (result, out, _) = exec(&[
            "toolbox",
            "hash",
            "multi",
            "hello",
            "--algorithms",
            "sha1,whirlpool",
        ]);
        assert!(result.expect("multi should succeed"));
        assert!(out.contains("sha1: aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d"));
        assert!(out.contains("whirlpool: error:"));
    }

    #[test]
    fn hash_unknown_algorithm_is_error() {
        let (result, _, _) = exec(&["toolbox", "hash", "digest", "x", "--algorithm", "crc32"]);
        assert!(result.is_err());
    }

    #[test]
    fn uuid_generate_v4_by_default() {
        let (result, out, err) = exec(&["toolbox", "uuid", "generate", "--verbose"]);
        assert!(result.expect("uuid should succeed"));
        let id = out.trim_end();
        assert_eq!(id.len(), 36);
        assert_eq!(&id[14..15], "4");
        assert!(err.contains("version: V4"));
    }

    #[test]
    fn uuid_validate_negative_exits_false() {
        let (result, out, _) = exec(&["toolbox", "uuid", "validate", "not-a-uuid"]);
        assert!(!result.expect("validate never errors"));
        assert!(out.starts_with("invalid:"));
    }

    #[test]
    fn uuid_validate_json_keeps_verdict() {
        let (result, out, err) = exec(&[
            "toolbox",
            "--json",
            "uuid",
            "validate",
            "550e8400-e29b-41d4-a716-446655440000",
        ]);
        assert!(result.expect("validate never errors"));
        let value: serde_json::Value = serde_json::from_str(&out).expect("valid json");
        assert_eq!(value["is_valid"], true);
        assert_eq!(value["version"], "V4");
        assert!(err.is_empty());
    }

    #[test]
    fn base64_encode_and_decode() {
        let (result, out, _) = exec(&["toolbox", "base64", "encode", "Hello, World!"]);
        assert!(result.expect("encode should succeed"));
        assert_eq!(out.trim_end(), "SGVsbG8sIFdvcmxkIQ==");

        let (result, out, _) = exec(&["toolbox", "base64", "decode", "SGVsbG8sIFdvcmxkIQ=="]);
        assert!(result.expect("decode should succeed"));
        assert_eq!(out.trim_end(), "Hello, World!");
    }

    #[test]
    fn base64_validate_bad_length_exits_false() {
        let (result, out, _) = exec(&["toolbox", "base64", "validate", "abc"]);
        assert!(!result.expect("validate never errors"));
        assert!(out.starts_with("invalid"));
    }

    #[test]
    fn base64_decode_garbage_is_error() {
        let (result, _, _) = exec(&["toolbox", "base64", "decode", "@@@@"]);
        assert!(result.is_err());
    }

    #[test]
    fn url_encode_component_mode() {
        let (result, out, _) = exec(&["toolbox", "url", "encode", "a/b c", "--type", "component"]);
        assert!(result.expect("encode should succeed"));
        assert_eq!(out.trim_end(), "a%2Fb%20c");
    }

    #[test]
    fn url_decode_plus_mode() {
        let (result, out, _) = exec(&["toolbox", "url", "decode", "a+b%21", "--type", "plus"]);
        assert!(result.expect("decode should succeed"));
        assert_eq!(out.trim_end(), "a b!");
    }

    #[test]
    fn url_validate_malformed_escape_exits_false() {
        let (result, out, _) = exec(&["toolbox", "url", "validate", "100%zz"]);
        assert!(!result.expect("validate never errors"));
        assert!(out.starts_with("invalid"));
    }

    #[test]
    fn global_json_flag_after_subcommand() {
        let (result, out, _) = exec(&["toolbox", "hash", "list", "--json"]);
        assert!(result.expect("list should succeed"));
        let value: serde_json::Value = serde_json::from_str(&out).expect("valid json");
        assert!(value
            .as_array()
            .is_some_and(|names| names.iter().any(|n| n == "sha256")));
    }
}
