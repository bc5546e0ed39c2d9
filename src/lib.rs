//! Relay DNS Library
//!
//! Decodes DNS queries received over UDP and answers every question with a
//! single A record, either forwarded from an upstream resolver or
//! synthesized locally.

pub mod config;
pub mod dns;
pub mod errors;
pub mod forwarder;
pub mod handlers;

// Re-export commonly used items
pub use config::ServerConfig;
pub use errors::DnsError;
pub use forwarder::Forwarder;
