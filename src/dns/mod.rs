//! DNS wire format.
//!
//! Header, names, questions and resource records as laid out by RFC 1035,
//! plus the response assembly that ties them together.

pub mod header;
pub mod message;
pub mod name;
pub mod question;
pub mod record;
pub mod response;

pub use header::Header;
pub use message::Message;
pub use name::Name;
pub use question::Question;
pub use record::ResourceRecord;

use crate::errors::{DnsError, Result};

/// Record type A (IPv4 host address).
pub const TYPE_A: u16 = 1;

/// Class IN (Internet).
pub const CLASS_IN: u16 = 1;

/// Borrow `len` bytes at `pos`, failing with `TruncatedInput` when short.
pub(crate) fn read_slice(buf: &[u8], pos: usize, len: usize) -> Result<&[u8]> {
    buf.get(pos..pos + len).ok_or(DnsError::TruncatedInput {
        needed: len,
        available: buf.len().saturating_sub(pos),
    })
}

pub(crate) fn read_u16(buf: &[u8], pos: usize) -> Result<u16> {
    let b = read_slice(buf, pos, 2)?;
    Ok(u16::from_be_bytes([b[0], b[1]]))
}

pub(crate) fn read_u32(buf: &[u8], pos: usize) -> Result<u32> {
    let b = read_slice(buf, pos, 4)?;
    Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
}
