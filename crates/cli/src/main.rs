//! Nyuzi remote debug stub CLI.
//!
//! This binary serves the debug stub over TCP. It performs:
//! 1. **Configuration:** Defaults, an optional JSON config file, then flag overrides.
//! 2. **Target setup:** Builds the reference core and loads an optional hex program image.
//! 3. **Serving:** Accepts one debugger at a time until the process is killed.

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use nyuzi_stub::target::image;
use nyuzi_stub::{Config, ReferenceCore, Server, StubResult};

#[derive(Parser, Debug)]
#[command(
    name = "nyuzi-gdbstub",
    author,
    version,
    about = "Remote debug stub for the Nyuzi simulator",
    long_about = "Listens for a GDB/LLDB remote-protocol client and lets it control a simulated Nyuzi core.\n\nExamples:\n  nyuzi-gdbstub --image program.hex\n  nyuzi-gdbstub --config stub.json --port 2159 -v"
)]
struct Cli {
    /// JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// TCP port to listen on (overrides the config file).
    #[arg(short, long)]
    port: Option<u16>,

    /// Hardware strands on the reference core (overrides the config file).
    #[arg(long)]
    strands: Option<usize>,

    /// Program image: one big-endian hex word per line, loaded at address 0.
    #[arg(short, long)]
    image: Option<PathBuf>,

    /// Log more (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        error!("{e}");
        process::exit(1);
    }
}

/// Installs the `tracing` subscriber; `RUST_LOG` overrides the verbosity flag.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Builds the configuration and target, then serves debuggers.
fn run(cli: &Cli) -> StubResult<()> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(strands) = cli.strands {
        config.target.strands = strands;
    }

    let mut core = ReferenceCore::from_config(&config.target);
    if let Some(path) = &cli.image {
        let bytes = image::load_hex_file(path)?;
        core.load_image(&bytes)?;
        info!(path = %path.display(), bytes = bytes.len(), "loaded program image");
    }

    let mut server = Server::bind(&config)?;
    server.run(&mut core)
}
