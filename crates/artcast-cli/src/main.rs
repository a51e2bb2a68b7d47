use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use artcast_core::{Client, ClientConfig, Packet};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("ARTCAST_BUILD_COMMIT"),
    " ",
    env!("ARTCAST_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "artcast")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Stream DMX512 test patterns to an Art-Net node (ArtDMX over UDP).",
    long_about = None,
    after_help = "Examples:\n  artcast send 192.168.0.60\n  artcast send 2.255.255.255 --broadcast --universe 1 --pattern full\n  artcast send node.local --count 40 --json"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Send ArtDMX frames at a fixed rate.
    Send(SendArgs),
}

#[derive(clap::Args, Debug)]
struct SendArgs {
    /// Node address: IP, ip:port or host name (optional with --config)
    destination: Option<String>,

    /// Destination UDP port (default 6454)
    #[arg(short, long)]
    port: Option<u16>,

    /// Art-Net net (high address byte)
    #[arg(long, default_value_t = 0)]
    net: u8,

    /// Art-Net universe (low address byte)
    #[arg(long, default_value_t = 0)]
    universe: u8,

    /// Frames per second
    #[arg(long, default_value_t = 40.0)]
    rate: f64,

    /// Number of frames to send (unbounded when omitted)
    #[arg(long)]
    count: Option<u64>,

    /// DMX content of every frame
    #[arg(long, value_enum, default_value_t = Pattern::Ramp)]
    pattern: Pattern,

    /// Channel value used by `--pattern level`
    #[arg(long, default_value_t = 0)]
    level: u8,

    /// Local address to bind
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Allow sending to a broadcast address
    #[arg(long)]
    broadcast: bool,

    /// JSON client configuration; flags above override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print a JSON summary on stdout when done
    #[arg(long)]
    json: bool,

    /// Suppress non-error output
    #[arg(long)]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
enum Pattern {
    /// Channel n carries n mod 256
    Ramp,
    /// All channels at 0
    Blackout,
    /// All channels at 255
    Full,
    /// All channels at --level
    Level,
}

#[derive(Debug, Serialize)]
struct SendSummary {
    destination: String,
    local_addr: String,
    net: u8,
    universe: u8,
    pattern: Pattern,
    frames_sent: u64,
    last_sequence: Option<u8>,
    started_at: String,
    finished_at: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Send(args) => cmd_send(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{:#}", err), None)
    }
}

fn cmd_send(args: SendArgs) -> Result<(), CliError> {
    let config = build_config(&args)?;
    let frame_interval = frame_interval(args.rate)?;

    let client = Client::with_config(&config).map_err(|err| {
        CliError::new(
            format!("cannot open Art-Net client: {}", err),
            Some("check the destination address and port".to_string()),
        )
    })?;
    info!(destination = %client.destination(), "streaming ArtDMX");

    let mut packet = Packet::new(args.net, args.universe);
    fill_pattern(&mut packet, args.pattern, args.level);

    let started_at = now_rfc3339()?;
    let mut frames_sent = 0u64;
    let mut next_frame = Instant::now();
    while args.count.is_none_or(|count| frames_sent < count) {
        client
            .send(&mut packet)
            .with_context(|| format!("failed to send frame {}", frames_sent + 1))?;
        frames_sent += 1;
        debug!(frames_sent, sequence = ?packet.sequence(), "frame sent");

        if args.count.is_some_and(|count| frames_sent >= count) {
            break;
        }
        next_frame += frame_interval;
        let now = Instant::now();
        if next_frame > now {
            thread::sleep(next_frame - now);
        } else {
            next_frame = now;
        }
    }
    let finished_at = now_rfc3339()?;

    let summary = SendSummary {
        destination: client.destination().to_string(),
        local_addr: client.local_addr().to_string(),
        net: args.net,
        universe: args.universe,
        pattern: args.pattern,
        frames_sent,
        last_sequence: packet.sequence(),
        started_at,
        finished_at,
    };
    client
        .close()
        .context("failed to close Art-Net client")?;

    if args.json {
        let json = serde_json::to_string(&summary).context("JSON serialization failed")?;
        println!("{}", json);
    }
    if !args.quiet {
        eprintln!(
            "OK: {} frame(s) sent -> {}",
            summary.frames_sent, summary.destination
        );
    }
    Ok(())
}

fn build_config(args: &SendArgs) -> Result<ClientConfig, CliError> {
    let mut config = match args.config.as_ref() {
        Some(path) => load_config(path)?,
        None => {
            let destination = args.destination.clone().ok_or_else(|| {
                CliError::new(
                    "missing destination",
                    Some("pass a node address or use --config".to_string()),
                )
            })?;
            ClientConfig::new(destination)
        }
    };

    if let Some(destination) = args.destination.as_ref() {
        config.destination = destination.clone();
    }
    if let Some(port) = args.port {
        config.port = Some(port);
    }
    if let Some(bind) = args.bind {
        config.bind = Some(bind);
    }
    if args.broadcast {
        config.broadcast = true;
    }
    Ok(config)
}

fn load_config(path: &PathBuf) -> Result<ClientConfig, CliError> {
    if !path.is_file() {
        return Err(CliError::new(
            format!("config file not found: {}", path.display()),
            Some("pass a JSON file such as {\"destination\": \"10.0.0.5\"}".to_string()),
        ));
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    serde_json::from_str(&text).map_err(|err| {
        CliError::new(
            format!("invalid config file {}: {}", path.display(), err),
            Some("expected fields: destination, port, bind, broadcast".to_string()),
        )
    })
}

fn frame_interval(rate: f64) -> Result<Duration, CliError> {
    let invalid = || {
        CliError::new(
            format!("invalid rate: {}", rate),
            Some("use a positive number of frames per second, e.g. --rate 40".to_string()),
        )
    };
    if !rate.is_finite() || rate <= 0.0 {
        return Err(invalid());
    }
    Duration::try_from_secs_f64(1.0 / rate).map_err(|_| invalid())
}

fn fill_pattern(packet: &mut Packet, pattern: Pattern, level: u8) {
    match pattern {
        Pattern::Ramp => {
            for (i, slot) in packet.dmx_mut().iter_mut().enumerate() {
                *slot = i as u8;
            }
        }
        Pattern::Blackout => packet.blackout(),
        Pattern::Full => packet.fill(u8::MAX),
        Pattern::Level => packet.fill(level),
    }
}

fn now_rfc3339() -> Result<String, CliError> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .context("timestamp formatting failed")
        .map_err(Into::into)
}
