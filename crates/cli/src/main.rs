use clap::{ArgAction, Args, Parser, Subcommand};
use std::process::ExitCode;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "toolbox")]
#[command(about = "Developer utility toolbox: text, secrets, hashes, UUIDs and encoders")]
struct Cli {
    /// Write the full result record as pretty JSON instead of the bare value
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate lorem-ipsum filler text
    Text {
        /// word, sentence or paragraph
        #[arg(long = "type", default_value = "paragraph")]
        kind: String,
        #[arg(long, default_value_t = 1)]
        count: usize,
        /// Print type and count to stderr
        #[arg(long)]
        verbose: bool,
    },
    /// Generate passwords
    Password(PasswordArgs),
    /// Generate API keys
    Apikey(ApiKeyArgs),
    /// Hash text
    #[command(subcommand)]
    Hash(HashCommand),
    /// Generate or validate UUIDs
    #[command(subcommand)]
    Uuid(UuidCommand),
    /// Base64 encode, decode or validate
    #[command(subcommand)]
    Base64(Base64Command),
    /// URL encode, decode or validate
    #[command(subcommand)]
    Url(UrlCommand),
}

#[derive(Args, Debug)]
struct PasswordArgs {
    /// Password length (8-128)
    #[arg(long, default_value_t = 16)]
    length: usize,
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    uppercase: bool,
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    lowercase: bool,
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    numbers: bool,
    #[arg(long, default_value_t = false, action = ArgAction::Set)]
    symbols: bool,
    #[arg(long, default_value_t = false, action = ArgAction::Set)]
    exclude_ambiguous: bool,
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    ensure_requirements: bool,
    /// Number of passwords (1-100)
    #[arg(long, default_value_t = 1)]
    count: usize,
    /// Print length, entropy and strength to stderr
    #[arg(long)]
    show_entropy: bool,
}

#[derive(Args, Debug)]
struct ApiKeyArgs {
    /// hex, base64, base58 or custom
    #[arg(long, default_value = "hex")]
    format: String,
    /// Bytes, or characters for custom; per-format default when omitted
    #[arg(long)]
    length: Option<usize>,
    #[arg(long, default_value = "")]
    prefix: String,
    /// Alphabet for the custom format
    #[arg(long)]
    charset: Option<String>,
    /// Number of keys (1-50)
    #[arg(long, default_value_t = 1)]
    count: usize,
    /// Print entropy and security level to stderr
    #[arg(long)]
    show_entropy: bool,
}

#[derive(Subcommand, Debug)]
enum HashCommand {
    /// Hash text with one algorithm
    Digest {
        text: String,
        #[arg(long, default_value = "sha256")]
        algorithm: String,
        #[arg(long)]
        verbose: bool,
    },
    /// Hash text with several algorithms
    Multi {
        text: String,
        /// Comma-separated; md5,sha1,sha256,sha512 when omitted
        #[arg(long, value_delimiter = ',')]
        algorithms: Vec<String>,
    },
    /// Describe one algorithm
    Info { name: String },
    /// List supported algorithms
    List,
}

#[derive(Subcommand, Debug)]
enum UuidCommand {
    /// Generate UUIDs
    Generate {
        /// 1, v1, 4 or v4
        #[arg(long, default_value = "v4")]
        version: String,
        /// Number of UUIDs (1-100)
        #[arg(long, default_value_t = 1)]
        count: usize,
        #[arg(long)]
        verbose: bool,
    },
    /// Validate and describe a UUID
    Validate {
        uuid: String,
        #[arg(long)]
        verbose: bool,
    },
    /// Describe supported versions
    Versions,
}

#[derive(Subcommand, Debug)]
enum Base64Command {
    Encode {
        text: String,
        #[arg(long)]
        verbose: bool,
    },
    Decode {
        encoded: String,
        #[arg(long)]
        verbose: bool,
    },
    Validate {
        text: String,
    },
}

#[derive(Subcommand, Debug)]
enum UrlCommand {
    Encode {
        text: String,
        /// standard, plus or component
        #[arg(long = "type", default_value = "standard")]
        kind: String,
        #[arg(long)]
        verbose: bool,
    },
    Decode {
        encoded: String,
        /// standard, plus or auto
        #[arg(long = "type", default_value = "standard")]
        kind: String,
        #[arg(long)]
        verbose: bool,
    },
    Validate {
        text: String,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let stdout = std::io::stdout();
    let stderr = std::io::stderr();

    match commands::run(cli, &mut stdout.lock(), &mut stderr.lock()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
