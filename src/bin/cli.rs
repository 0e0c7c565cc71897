//! hostwire CLI Client
//!
//! Command-line interface for driving a host process by hand.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use hostwire::{
    AckPolicy, ByteOrder, Endpoint, HostStream, HostwireError, Payload, Result, Session,
    SessionConfig,
};
use tracing_subscriber::{fmt, EnvFilter};

/// hostwire CLI
#[derive(Parser, Debug)]
#[command(name = "hostwire-cli")]
#[command(about = "Talk to a host process over the hostwire protocol")]
#[command(version)]
struct Args {
    /// Host endpoint (host:port, tcp:host:port or unix:/path)
    #[arg(short, long, env = "HOSTWIRE_ENDPOINT")]
    endpoint: String,

    /// Maximum bytes per body read
    #[arg(long, default_value = "4096")]
    chunk_size: usize,

    /// Read timeout in milliseconds (0 = none)
    #[arg(long, default_value = "0")]
    read_timeout_ms: u64,

    /// Write timeout in milliseconds (0 = none)
    #[arg(long, default_value = "0")]
    write_timeout_ms: u64,

    /// Decode the inbound length field as big-endian
    #[arg(long)]
    big_endian: bool,

    /// Require handshake replies to equal these hex bytes (e.g. "00")
    #[arg(long, value_parser = parse_hex)]
    expect_ack: Option<HexBytes>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Send a bare command and print the reply
    Command {
        /// The command token
        token: String,
    },

    /// Send a payload frame after a command handshake
    Write {
        /// The command token
        command: String,

        #[command(flatten)]
        input: Input,
    },

    /// Read a payload frame after a command handshake
    Read {
        /// The command token
        command: String,

        /// Print the body base64-encoded
        #[arg(long)]
        base64: bool,

        /// Write the body to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Send a payload and read back the result in one round trip
    Request {
        /// The command token
        header: String,

        #[command(flatten)]
        input: Input,

        /// Return the raw body instead of base64
        #[arg(long)]
        raw: bool,

        /// Write the result to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Payload source
#[derive(ClapArgs, Debug)]
#[group(required = true, multiple = false)]
struct Input {
    /// Inline payload
    #[arg(short, long)]
    data: Option<String>,

    /// Read the payload from a file
    #[arg(short, long)]
    file: Option<PathBuf>,
}

impl Input {
    fn load(&self) -> Result<Vec<u8>> {
        match (&self.data, &self.file) {
            (Some(data), _) => Ok(data.clone().into_bytes()),
            (None, Some(path)) => Ok(fs::read(path)?),
            (None, None) => Err(HostwireError::InvalidArgument(
                "either --data or --file is required".to_string(),
            )),
        }
    }
}

/// Bytes given on the command line as hex digits
#[derive(Debug, Clone)]
struct HexBytes(Vec<u8>);

fn parse_hex(s: &str) -> std::result::Result<HexBytes, String> {
    if s.is_empty() {
        return Err("expected at least one hex byte".to_string());
    }
    hex::decode(s).map(HexBytes).map_err(|e| e.to_string())
}

fn main() {
    // Logs go to stderr; stdout carries payloads
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,hostwire=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let endpoint: Endpoint = args.endpoint.parse()?;

    let mut builder = SessionConfig::builder()
        .chunk_size(args.chunk_size)
        .read_timeout_ms(args.read_timeout_ms)
        .write_timeout_ms(args.write_timeout_ms);
    if args.big_endian {
        builder = builder.inbound_byte_order(ByteOrder::Big);
    }
    if let Some(HexBytes(expected)) = args.expect_ack {
        builder = builder.ack_policy(AckPolicy::Exact(expected));
    }
    let config = builder.build();

    tracing::info!("hostwire v{} connecting to {}", hostwire::VERSION, endpoint);
    let mut session: Session<HostStream> = Session::connect(&endpoint, config)?;

    match args.command {
        Commands::Command { token } => {
            let reply = session.send_command(token.as_bytes())?;
            emit(&reply, None, true)
        }
        Commands::Write { command, input } => {
            let payload = input.load()?;
            let ack = session.write_frame(&payload, true, Some(command.as_bytes()))?;
            tracing::info!("wrote {} bytes", payload.len());
            emit(&ack, None, true)
        }
        Commands::Read {
            command,
            base64,
            output,
        } => {
            let payload = session.read_frame(true, Some(command.as_bytes()), base64)?;
            emit_payload(&payload, output)
        }
        Commands::Request {
            header,
            input,
            raw,
            output,
        } => {
            let payload = input.load()?;
            let result = session.request(header.as_bytes(), &payload, !raw)?;
            emit_payload(&result, output)
        }
    }
}

fn emit_payload(payload: &Payload, output: Option<PathBuf>) -> Result<()> {
    tracing::info!("received {} bytes", payload.len());
    emit(payload.as_bytes(), output, payload.is_text())
}

/// Write `bytes` to `output` or stdout. Only text gets a trailing newline,
/// and only on stdout; raw bodies go out untouched.
fn emit(bytes: &[u8], output: Option<PathBuf>, text: bool) -> Result<()> {
    match output {
        Some(path) => fs::write(path, bytes)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(bytes)?;
            if text {
                stdout.write_all(b"\n")?;
            }
            stdout.flush()?;
        }
    }
    Ok(())
}
