//! Resource records.

use std::net::Ipv4Addr;

use super::{read_slice, read_u16, read_u32, Name, CLASS_IN, TYPE_A};
use crate::errors::Result;

/// A resource record with opaque RDATA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: Name,
    pub rtype: u16,
    pub rclass: u16,
    pub ttl: u32,
    pub rdata: Vec<u8>,
}

impl ResourceRecord {
    /// An `A`/`IN` record pointing `name` at `addr`.
    pub fn a(name: Name, ttl: u32, addr: Ipv4Addr) -> Self {
        Self {
            name,
            rtype: TYPE_A,
            rclass: CLASS_IN,
            ttl,
            rdata: addr.octets().to_vec(),
        }
    }

    /// The address carried by this record, if it has A shape.
    pub fn ipv4(&self) -> Option<Ipv4Addr> {
        if self.rtype != TYPE_A {
            return None;
        }
        let octets: [u8; 4] = self.rdata.as_slice().try_into().ok()?;
        Some(Ipv4Addr::from(octets))
    }

    /// Decode a record at `offset`, returning it with the offset just past it.
    ///
    /// RDATA is copied as-is; names inside it are not decompressed.
    pub fn decode(buf: &[u8], offset: usize) -> Result<(ResourceRecord, usize)> {
        let (name, used) = Name::decode(buf, offset)?;
        let mut pos = offset + used;
        let rtype = read_u16(buf, pos)?;
        let rclass = read_u16(buf, pos + 2)?;
        let ttl = read_u32(buf, pos + 4)?;
        let rdlength = read_u16(buf, pos + 8)? as usize;
        pos += 10;
        let rdata = read_slice(buf, pos, rdlength)?.to_vec();
        Ok((
            ResourceRecord {
                name,
                rtype,
                rclass,
                ttl,
                rdata,
            },
            pos + rdlength,
        ))
    }

    pub fn encode_into(&self, out: &mut Vec<u8>) {
        self.name.encode_into(out);
        out.extend_from_slice(&self.rtype.to_be_bytes());
        out.extend_from_slice(&self.rclass.to_be_bytes());
        out.extend_from_slice(&self.ttl.to_be_bytes());
        out.extend_from_slice(&(self.rdata.len() as u16).to_be_bytes());
        out.extend_from_slice(&self.rdata);
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.name.encoded_len() + 10 + self.rdata.len());
        self.encode_into(&mut out);
        out
    }
}
