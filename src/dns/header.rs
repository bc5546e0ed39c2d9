//! The fixed 12-byte message header.

use crate::errors::{DnsError, Result};

/// Encoded size of a header.
pub const HEADER_LEN: usize = 12;

const QR_MASK: u16 = 0x8000;
const OPCODE_SHIFT: u16 = 11;
const OPCODE_MASK: u16 = 0x0F;
const RD_MASK: u16 = 0x0100;
const RCODE_MASK: u16 = 0x000F;

/// Standard query opcode.
pub const OPCODE_QUERY: u8 = 0;

/// Response codes this relay produces.
pub const RCODE_NO_ERROR: u8 = 0;
pub const RCODE_NOT_IMPLEMENTED: u8 = 4;

/// DNS message header.
///
/// `flags` is kept packed exactly as on the wire:
/// QR(1) OPCODE(4) AA(1) TC(1) RD(1) RA(1) Z(3) RCODE(4).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Header {
    pub id: u16,
    pub flags: u16,
    pub question_count: u16,
    pub answer_count: u16,
    pub authority_count: u16,
    pub additional_count: u16,
}

impl Header {
    /// Decode a header from the first 12 bytes of `buf`.
    pub fn decode(buf: &[u8]) -> Result<Self> {
        if buf.len() < HEADER_LEN {
            return Err(DnsError::TruncatedInput {
                needed: HEADER_LEN,
                available: buf.len(),
            });
        }
        let field = |i: usize| u16::from_be_bytes([buf[i], buf[i + 1]]);
        Ok(Header {
            id: field(0),
            flags: field(2),
            question_count: field(4),
            answer_count: field(6),
            authority_count: field(8),
            additional_count: field(10),
        })
    }

    /// Append the 12 wire bytes of this header to `out`.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.encode());
    }

    pub fn encode(&self) -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];
        let fields = [
            self.id,
            self.flags,
            self.question_count,
            self.answer_count,
            self.authority_count,
            self.additional_count,
        ];
        for (chunk, field) in bytes.chunks_exact_mut(2).zip(fields) {
            chunk.copy_from_slice(&field.to_be_bytes());
        }
        bytes
    }

    pub fn is_response(&self) -> bool {
        self.flags & QR_MASK != 0
    }

    pub fn opcode(&self) -> u8 {
        ((self.flags >> OPCODE_SHIFT) & OPCODE_MASK) as u8
    }

    pub fn recursion_desired(&self) -> bool {
        self.flags & RD_MASK != 0
    }

    pub fn rcode(&self) -> u8 {
        (self.flags & RCODE_MASK) as u8
    }

    /// Flags for an outbound recursive query: QR=0, OPCODE=0, RD=1.
    pub fn query_flags() -> u16 {
        RD_MASK
    }

    /// Flags answering a request carrying `request_flags`.
    ///
    /// QR is set, OPCODE and RD are echoed, everything else is cleared and
    /// RCODE is NOTIMP for anything but a standard query.
    pub fn response_flags(request_flags: u16) -> u16 {
        let opcode = (request_flags >> OPCODE_SHIFT) & OPCODE_MASK;
        let rcode = if opcode == OPCODE_QUERY as u16 {
            RCODE_NO_ERROR
        } else {
            RCODE_NOT_IMPLEMENTED
        };
        QR_MASK | (opcode << OPCODE_SHIFT) | (request_flags & RD_MASK) | rcode as u16
    }
}
