//! Error types for the DNS relay.
//!
//! This module defines the error types used throughout the codec, the
//! forwarder and the serve loop.

use std::io;
use thiserror::Error;

/// Represents errors that can occur while relaying DNS messages.
#[derive(Debug, Error)]
pub enum DnsError {
    /// Fewer bytes were available than a fixed-size field requires.
    #[error("truncated input: needed {needed} bytes, {available} available")]
    TruncatedInput { needed: usize, available: usize },

    /// A domain name could not be decoded.
    #[error("malformed name: {0}")]
    MalformedName(String),

    /// The upstream resolver could not be reached.
    #[error("resolver unreachable: {0}")]
    ResolverUnreachable(#[source] io::Error),

    /// The upstream resolver replied with something we cannot use.
    #[error("resolver protocol error: {0}")]
    ResolverProtocolError(String),

    /// I/O errors from the client-facing socket.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration errors.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, DnsError>;
