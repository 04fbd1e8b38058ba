//! rebind-cli - double-bind probe for the reuse-forcing shim.

mod probe;

use std::net::SocketAddr;

use anyhow::Result;
use clap::Parser;
use log::debug;

use probe::Transport;

/// Bind the same address twice and report whether reuse was forced on from
/// outside, e.g. by the rebind shim loaded via LD_PRELOAD.
#[derive(Parser)]
#[command(name = "rebind-cli", version, about)]
struct Cli {
    /// Address to probe, e.g. 127.0.0.1:8080 or [::1]:9090
    addr: SocketAddr,

    /// Probe a datagram socket instead of a listener
    #[arg(long)]
    udp: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let transport = if cli.udp {
        Transport::Udp
    } else {
        Transport::Tcp
    };
    debug!("probing {} over {}", cli.addr, transport.as_str());

    let outcome = probe::run(transport, cli.addr)?;
    println!("{outcome}");
    Ok(())
}
