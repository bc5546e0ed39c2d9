//! Upstream forwarding.
//!
//! Each question is proxied on its own to the configured resolver and the
//! first A record of the reply is spliced into our response.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU16, Ordering};

use log::{debug, info};
use tokio::net::UdpSocket;

use crate::config::MAX_PACKET_SIZE;
use crate::dns::{Header, Message, Question, ResourceRecord};
use crate::errors::{DnsError, Result};

/// Forwards single questions to one upstream resolver over a long-lived socket.
#[derive(Debug)]
pub struct Forwarder {
    socket: UdpSocket,
    target: SocketAddr,
    next_id: AtomicU16,
}

impl Forwarder {
    /// Open the outbound socket for `target`.
    ///
    /// The socket is connected so that only datagrams from the resolver are
    /// received on it.
    pub async fn bind(target: SocketAddr) -> Result<Self> {
        let local: SocketAddr = if target.is_ipv4() {
            SocketAddr::from(([0, 0, 0, 0], 0))
        } else {
            SocketAddr::from(([0u16; 8], 0))
        };
        let socket = UdpSocket::bind(local).await?;
        socket.connect(target).await?;
        info!("Forwarding questions to resolver {}", target);
        Ok(Self {
            socket,
            target,
            next_id: AtomicU16::new(1),
        })
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }

    /// The single-question query sent upstream for `question`.
    pub fn build_query(id: u16, question: &Question) -> Message {
        Message {
            header: Header {
                id,
                flags: Header::query_flags(),
                question_count: 1,
                ..Default::default()
            },
            questions: vec![question.clone()],
            answers: Vec::new(),
        }
    }

    /// Resolve one question through the upstream resolver.
    ///
    /// Sends one datagram and waits for one reply. There is no timeout: if
    /// the resolver never replies this future never completes.
    pub async fn resolve(&self, question: &Question) -> Result<ResourceRecord> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let query = Self::build_query(id, question).encode();

        debug!("Forwarding {} as id {} to {}", question.name, id, self.target);
        self.socket
            .send(&query)
            .await
            .map_err(DnsError::ResolverUnreachable)?;

        let mut buf = vec![0u8; MAX_PACKET_SIZE];
        let size = self
            .socket
            .recv(&mut buf)
            .await
            .map_err(DnsError::ResolverUnreachable)?;

        parse_reply(id, &buf[..size])
    }
}

/// Extract the answer to query `id` from a resolver reply.
pub fn parse_reply(id: u16, reply: &[u8]) -> Result<ResourceRecord> {
    let message = Message::decode(reply)
        .map_err(|e| DnsError::ResolverProtocolError(format!("undecodable reply: {e}")))?;

    if message.header.id != id {
        return Err(DnsError::ResolverProtocolError(format!(
            "reply id {} does not match query id {}",
            message.header.id, id
        )));
    }
    if !message.header.is_response() {
        return Err(DnsError::ResolverProtocolError("reply is not a response".into()));
    }

    message
        .answers
        .into_iter()
        .find(|rr| rr.ipv4().is_some())
        .ok_or_else(|| {
            DnsError::ResolverProtocolError(format!(
                "no A record among {} answers (rcode {})",
                message.header.answer_count,
                message.header.rcode()
            ))
        })
}
