//! Configuration for the DNS relay.
//!
//! This module defines the configuration structure and methods to load
//! configuration from environment variables.

use std::{env, net::Ipv4Addr, net::SocketAddr};

use crate::dns::header::HEADER_LEN;
use crate::errors::DnsError;

/// Port the relay listens on when `DNS_BIND` is not set.
pub const DEFAULT_PORT: u16 = 2053;

/// Maximum size of DNS packets in bytes (no EDNS0).
pub const MAX_PACKET_SIZE: usize = 512;

/// TTL of synthesized answers, in seconds.
pub const STATIC_TTL: u32 = 60;

/// Address returned in synthesized answers.
pub const STATIC_ADDR: Ipv4Addr = Ipv4Addr::new(8, 8, 8, 8);

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind the client-facing socket to.
    pub bind_addr: SocketAddr,

    /// Upstream resolver to forward questions to, if any.
    pub resolver: Option<SocketAddr>,

    /// Maximum size of DNS packets.
    pub max_packet_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            resolver: None,
            max_packet_size: MAX_PACKET_SIZE,
        }
    }
}

impl ServerConfig {
    /// Load server configuration from environment variables.
    ///
    /// # Returns
    /// A `Result` containing either the loaded `ServerConfig` or a `DnsError`.
    pub fn from_env() -> Result<Self, DnsError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    ///
    /// `from_env` delegates here; tests pass a closure over a map instead of
    /// mutating the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DnsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let bind_addr = match lookup("DNS_BIND") {
            Some(v) => parse_socket_addr(&v, "DNS_BIND")?,
            None => defaults.bind_addr,
        };

        let resolver = lookup("DNS_RESOLVER")
            .filter(|v| !v.trim().is_empty())
            .map(|v| parse_socket_addr(&v, "DNS_RESOLVER"))
            .transpose()?;

        let max_packet_size = match lookup("DNS_MAX_PACKET_SIZE") {
            Some(v) => v
                .trim()
                .parse()
                .map_err(|_| DnsError::Config(format!("Invalid DNS_MAX_PACKET_SIZE: {v}")))?,
            None => defaults.max_packet_size,
        };
        if max_packet_size < HEADER_LEN {
            return Err(DnsError::Config(format!(
                "DNS_MAX_PACKET_SIZE {max_packet_size} is smaller than a {HEADER_LEN} byte header"
            )));
        }

        Ok(Self {
            bind_addr,
            resolver,
            max_packet_size,
        })
    }

    /// Override the upstream resolver, e.g. from the `--resolver` flag.
    pub fn with_resolver(mut self, resolver: Option<SocketAddr>) -> Self {
        if resolver.is_some() {
            self.resolver = resolver;
        }
        self
    }

    /// Override the bind address, e.g. from the `--bind` flag.
    pub fn with_bind_addr(mut self, bind_addr: Option<SocketAddr>) -> Self {
        if let Some(addr) = bind_addr {
            self.bind_addr = addr;
        }
        self
    }
}

/// Parse an `ip:port` pair, reporting the offending setting on failure.
pub fn parse_socket_addr(value: &str, setting: &str) -> Result<SocketAddr, DnsError> {
    value
        .trim()
        .parse()
        .map_err(|_| DnsError::Config(format!("Invalid {setting} address: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_addr.port(), 2053);
        assert!(config.resolver.is_none());
    }

    #[test]
    fn reads_resolver_and_bind() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("DNS_BIND", "127.0.0.1:5353"),
            ("DNS_RESOLVER", "1.1.1.1:53"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:5353".parse::<SocketAddr>().unwrap());
        assert_eq!(config.resolver, Some("1.1.1.1:53".parse::<SocketAddr>().unwrap()));
    }

    #[test]
    fn rejects_bad_resolver() {
        let err = ServerConfig::from_lookup(lookup(&[("DNS_RESOLVER", "not-an-addr")]));
        assert!(matches!(err, Err(DnsError::Config(_))));
    }

    #[test]
    fn rejects_packet_size_below_header() {
        for size in ["0", "11"] {
            let err = ServerConfig::from_lookup(lookup(&[("DNS_MAX_PACKET_SIZE", size)]));
            assert!(matches!(err, Err(DnsError::Config(_))), "size {size} accepted");
        }
        let config = ServerConfig::from_lookup(lookup(&[("DNS_MAX_PACKET_SIZE", "12")])).unwrap();
        assert_eq!(config.max_packet_size, 12);
    }

    #[test]
    fn cli_override_wins() {
        let config = ServerConfig::from_lookup(lookup(&[("DNS_RESOLVER", "1.1.1.1:53")]))
            .unwrap()
            .with_resolver(Some("9.9.9.9:53".parse().unwrap()))
            .with_bind_addr(None);
        assert_eq!(config.resolver, Some("9.9.9.9:53".parse::<SocketAddr>().unwrap()));
        assert_eq!(config.bind_addr.port(), DEFAULT_PORT);
    }
}
