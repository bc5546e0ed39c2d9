//! Request handlers for the DNS relay.
//!
//! This module runs the client-facing UDP loop. Requests are handled one at a
//! time: the next datagram is not read until the previous response is sent.

use std::net::SocketAddr;

use log::{debug, error, info, warn};
use tokio::net::UdpSocket;

use crate::config::ServerConfig;
use crate::dns::{response::build_response, Message};
use crate::errors::DnsError;
use crate::forwarder::Forwarder;

/// Run the UDP DNS relay.
///
/// # Arguments
/// * `config` - The server configuration.
///
/// # Returns
/// Only returns on a setup error; per-request failures are logged and the
/// offending datagram dropped.
pub async fn run_udp_server(config: ServerConfig) -> Result<(), DnsError> {
    let socket = UdpSocket::bind(config.bind_addr).await?;
    info!("UDP DNS relay listening on {}", socket.local_addr()?);

    let forwarder = match config.resolver {
        Some(target) => Some(Forwarder::bind(target).await?),
        None => {
            info!("No resolver configured, answering with static records");
            None
        }
    };

    serve(&socket, forwarder.as_ref(), config.max_packet_size).await
}

/// Serve requests arriving on `socket`, one at a time, forever.
pub async fn serve(
    socket: &UdpSocket,
    forwarder: Option<&Forwarder>,
    max_packet_size: usize,
) -> Result<(), DnsError> {
    let mut buf = vec![0u8; max_packet_size];

    loop {
        let (amt, src) = match socket.recv_from(&mut buf).await {
            Ok(received) => received,
            Err(e) => {
                error!("UDP receive error: {}", e);
                continue;
            }
        };
        let query = &buf[..amt];
        if let Err(e) = handle_udp_query(query, src, socket, forwarder, max_packet_size).await {
            warn!("Dropping query from {}: {}", src, e);
        }
    }
}

/// Handle a UDP DNS query.
///
/// # Arguments
/// * `query` - The raw DNS query.
/// * `src` - The source address of the query.
/// * `socket` - The UDP socket to send the response on.
/// * `forwarder` - The upstream forwarder, if one is configured.
/// * `max_packet_size` - Size above which a response is flagged in the log.
///
/// # Returns
/// A `Result` indicating success or failure.
pub async fn handle_udp_query(
    query: &[u8],
    src: SocketAddr,
    socket: &UdpSocket,
    forwarder: Option<&Forwarder>,
    max_packet_size: usize,
) -> Result<(), DnsError> {
    debug!("Received {} bytes from {}: {}", query.len(), src, hex::encode(query));

    let response = handle_query(query, forwarder).await?;
    if response.len() > max_packet_size {
        warn!(
            "Response to {} is {} bytes, over the {} byte limit",
            src,
            response.len(),
            max_packet_size
        );
    }

    socket.send_to(&response, src).await?;
    debug!("Sent {} byte response to {}", response.len(), src);
    Ok(())
}

/// Decode a raw request, assemble the response and encode it.
pub async fn handle_query(
    query: &[u8],
    forwarder: Option<&Forwarder>,
) -> Result<Vec<u8>, DnsError> {
    let request = Message::decode(query)?;
    info!(
        "Processing query id {} with {} question(s)",
        request.header.id,
        request.questions.len()
    );

    let response = build_response(&request, forwarder).await;
    Ok(response.encode())
}
