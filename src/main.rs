//! Relay DNS
//!
//! A small UDP DNS server that answers each question with one A record,
//! optionally forwarding questions to an upstream resolver.

use std::net::SocketAddr;

use clap::Parser;
use log::info;
use tokio::signal;

use relay_dns::{config::ServerConfig, errors::DnsError, handlers::run_udp_server};

#[derive(Parser)]
#[command(name = "relay-dns")]
#[command(about = "UDP DNS relay with optional upstream forwarding")]
struct Cli {
    /// Upstream resolver to forward questions to
    #[arg(long, value_name = "IP:PORT")]
    resolver: Option<SocketAddr>,

    /// Address to listen on
    #[arg(short = 'b', long, value_name = "IP:PORT")]
    bind: Option<SocketAddr>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), DnsError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::from_env()?
        .with_resolver(cli.resolver)
        .with_bind_addr(cli.bind);

    let shutdown_signal = async {
        if signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
        }
    };

    tokio::select! {
        _ = shutdown_signal => Ok(()),
        res = run_udp_server(config) => res,
    }
}
