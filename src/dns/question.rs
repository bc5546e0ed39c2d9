//! Question section entries.

use super::{read_u16, Name, CLASS_IN, TYPE_A};
use crate::errors::Result;

/// A single question: name, type and class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: Name,
    pub qtype: u16,
    pub qclass: u16,
}

impl Question {
    pub fn new(name: Name, qtype: u16, qclass: u16) -> Self {
        Self { name, qtype, qclass }
    }

    /// An `A`/`IN` question for `name`.
    pub fn a(name: Name) -> Self {
        Self::new(name, TYPE_A, CLASS_IN)
    }

    /// Decode a question at `offset`, returning it with the offset just past it.
    pub fn decode(buf: &[u8], offset: usize) -> Result<(Question, usize)> {
        let (name, used) = Name::decode(buf, offset)?;
        let pos = offset + used;
        let qtype = read_u16(buf, pos)?;
        let qclass = read_u16(buf, pos + 2)?;
        Ok((Question { name, qtype, qclass }, pos + 4))
    }

    pub fn encode_into(&self, out: &mut Vec<u8>) {
        self.name.encode_into(out);
        out.extend_from_slice(&self.qtype.to_be_bytes());
        out.extend_from_slice(&self.qclass.to_be_bytes());
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.name.encoded_len() + 4);
        self.encode_into(&mut out);
        out
    }
}
