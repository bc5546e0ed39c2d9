//! Domain names and their label encoding.
//!
//! Decoding follows compression pointers; encoding always writes plain
//! labels.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::errors::{DnsError, Result};

/// Longest permitted label, in bytes.
pub const MAX_LABEL_LEN: usize = 63;

/// Longest permitted encoded name, including length bytes and the root.
pub const MAX_NAME_LEN: usize = 255;

const POINTER_TAG: u8 = 0xC0;
const POINTER_OFFSET_MASK: u16 = 0x3FFF;

/// A domain name as an ordered list of labels, root excluded.
///
/// Labels are raw bytes so that whatever a client sent is echoed back
/// unchanged, even when it is not valid UTF-8.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Name {
    labels: Vec<Vec<u8>>,
}

impl Name {
    /// The root name (no labels).
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a name from labels, checking label and total lengths.
    pub fn from_labels<I, L>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = L>,
        L: Into<Vec<u8>>,
    {
        let mut name = Name::root();
        for label in labels {
            name.push_label(label.into())?;
        }
        Ok(name)
    }

    pub fn labels(&self) -> &[Vec<u8>] {
        &self.labels
    }

    pub fn is_root(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of bytes `encode` produces for this name.
    pub fn encoded_len(&self) -> usize {
        self.labels.iter().map(|l| l.len() + 1).sum::<usize>() + 1
    }

    fn push_label(&mut self, label: Vec<u8>) -> Result<()> {
        if label.is_empty() || label.len() > MAX_LABEL_LEN {
            return Err(DnsError::MalformedName(format!(
                "label length {} outside 1..={}",
                label.len(),
                MAX_LABEL_LEN
            )));
        }
        if self.encoded_len() + label.len() + 1 > MAX_NAME_LEN {
            return Err(DnsError::MalformedName(format!(
                "name exceeds {MAX_NAME_LEN} bytes"
            )));
        }
        self.labels.push(label);
        Ok(())
    }

    /// Decode a name starting at `start`.
    ///
    /// Returns the name and the number of bytes it occupies at `start`. A
    /// compression pointer always counts as two bytes there, however long
    /// the suffix it refers to. Every pointer must target an offset before
    /// the pointer itself and no offset may be jumped to twice.
    pub fn decode(buf: &[u8], start: usize) -> Result<(Name, usize)> {
        let mut name = Name::root();
        let mut pos = start;
        let mut consumed: Option<usize> = None;
        let mut visited = HashSet::new();

        loop {
            let len = *buf.get(pos).ok_or_else(|| {
                DnsError::MalformedName(format!("name runs past end of packet at offset {pos}"))
            })?;

            match len & POINTER_TAG {
                0x00 if len == 0 => {
                    pos += 1;
                    break;
                }
                0x00 => {
                    let len = len as usize;
                    let label = buf.get(pos + 1..pos + 1 + len).ok_or_else(|| {
                        DnsError::MalformedName(format!(
                            "label of {len} bytes at offset {pos} overruns packet"
                        ))
                    })?;
                    name.push_label(label.to_vec())?;
                    pos += 1 + len;
                }
                POINTER_TAG => {
                    let low = *buf.get(pos + 1).ok_or_else(|| {
                        DnsError::MalformedName(format!("pointer at offset {pos} is cut short"))
                    })?;
                    let target = (u16::from_be_bytes([len, low]) & POINTER_OFFSET_MASK) as usize;
                    if target >= pos {
                        return Err(DnsError::MalformedName(format!(
                            "pointer at offset {pos} targets {target}, not an earlier offset"
                        )));
                    }
                    if !visited.insert(target) {
                        return Err(DnsError::MalformedName(format!(
                            "pointer loop through offset {target}"
                        )));
                    }
                    consumed.get_or_insert(pos + 2 - start);
                    pos = target;
                }
                other => {
                    return Err(DnsError::MalformedName(format!(
                        "reserved label type {other:#04x} at offset {pos}"
                    )));
                }
            }
        }

        Ok((name, consumed.unwrap_or_else(|| pos - start)))
    }

    /// Append the uncompressed wire form of this name to `out`.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        for label in &self.labels {
            out.push(label.len() as u8);
            out.extend_from_slice(label);
        }
        out.push(0);
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.encode_into(&mut out);
        out
    }
}

impl FromStr for Name {
    type Err = DnsError;

    /// Parse dotted text; a single trailing dot is accepted, `"."` is root.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.strip_suffix('.').unwrap_or(s);
        if trimmed.is_empty() {
            return Ok(Name::root());
        }
        Name::from_labels(trimmed.split('.').map(|l| l.as_bytes().to_vec()))
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.labels.is_empty() {
            return f.write_str(".");
        }
        for (i, label) in self.labels.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(&String::from_utf8_lossy(label))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> Name {
        s.parse().unwrap()
    }

    #[test]
    fn plain_round_trip() {
        let original = name("codecrafters.io");
        let bytes = original.encode();
        assert_eq!(bytes, b"\x0ccodecrafters\x02io\x00");
        let (decoded, used) = Name::decode(&bytes, 0).unwrap();
        assert_eq!(decoded, original);
        assert_eq!(used, bytes.len());
    }

    #[test]
    fn root_name() {
        let (decoded, used) = Name::decode(&[0], 0).unwrap();
        assert!(decoded.is_root());
        assert_eq!(used, 1);
        assert_eq!(decoded.to_string(), ".");
        assert_eq!(name("."), Name::root());
    }

    #[test]
    fn follows_compression_pointer() {
        let mut buf = vec![0u8; 12];
        buf.extend_from_slice(b"\x07example\x03com\x00");
        buf.resize(30, 0);
        buf.extend_from_slice(b"\x03www\xc0\x0c");

        let (decoded, used) = Name::decode(&buf, 30).unwrap();
        assert_eq!(decoded.to_string(), "www.example.com");
        // 4 bytes of label plus the 2-byte pointer
        assert_eq!(used, 6);
    }

    #[test]
    fn name_entirely_a_pointer() {
        let mut buf = vec![0u8; 12];
        buf.extend_from_slice(b"\x07example\x03com\x00");
        let at = buf.len();
        buf.extend_from_slice(&[0xc0, 0x0c]);

        let (decoded, used) = Name::decode(&buf, at).unwrap();
        assert_eq!(decoded, name("example.com"));
        assert_eq!(used, 2);
    }

    #[test]
    fn chained_pointers() {
        let mut buf = vec![0u8; 12];
        buf.extend_from_slice(b"\x03com\x00"); // 12..17
        buf.extend_from_slice(b"\x07example\xc0\x0c"); // 17..27
        buf.extend_from_slice(b"\x03www\xc0\x11"); // 27..33

        let (decoded, used) = Name::decode(&buf, 27).unwrap();
        assert_eq!(decoded, name("www.example.com"));
        assert_eq!(used, 6);
    }

    #[test]
    fn pointer_far_behind_start() {
        // the suffix lives at offset 12 and the name starts much later, so
        // the cursor ends up well before where decoding began
        let mut buf = vec![0u8; 12];
        buf.extend_from_slice(b"\x03com\x00");
        buf.resize(200, 0);
        buf.extend_from_slice(&[0xc0, 0x0c]);

        let (decoded, used) = Name::decode(&buf, 200).unwrap();
        assert_eq!(decoded, name("com"));
        assert_eq!(used, 2);
    }

    #[test]
    fn self_pointer_is_rejected() {
        let buf = [0u8, 0, 0xc0, 0x02];
        let err = Name::decode(&buf, 2).unwrap_err();
        assert!(matches!(err, DnsError::MalformedName(_)));
    }

    #[test]
    fn forward_pointer_is_rejected() {
        let buf = [0xc0, 0x03, 0x00, 0x01, b'a', 0x00];
        let err = Name::decode(&buf, 0).unwrap_err();
        assert!(matches!(err, DnsError::MalformedName(_)));
    }

    #[test]
    fn pointer_loop_is_rejected() {
        // offset 0: "a" then pointer back to 0 -- each hop is backwards but
        // the chain revisits offset 0.
        let buf = [0x01, b'a', 0xc0, 0x00];
        let err = Name::decode(&buf, 0).unwrap_err();
        assert!(matches!(err, DnsError::MalformedName(_)));
    }

    #[test]
    fn label_overrunning_buffer_is_rejected() {
        let buf = b"\x05ab";
        assert!(matches!(
            Name::decode(buf, 0),
            Err(DnsError::MalformedName(_))
        ));
    }

    #[test]
    fn missing_terminator_is_rejected() {
        let buf = b"\x03www";
        assert!(matches!(
            Name::decode(buf, 0),
            Err(DnsError::MalformedName(_))
        ));
    }

    #[test]
    fn overlong_name_is_rejected() {
        let mut buf = Vec::new();
        for _ in 0..5 {
            buf.push(63);
            buf.extend_from_slice(&[b'x'; 63]);
        }
        buf.push(0);
        assert!(matches!(
            Name::decode(&buf, 0),
            Err(DnsError::MalformedName(_))
        ));
    }

    #[test]
    fn reserved_label_type_is_rejected() {
        assert!(matches!(
            Name::decode(&[0x40, 0x00], 0),
            Err(DnsError::MalformedName(_))
        ));
    }

    #[test]
    fn parse_rejects_bad_labels() {
        assert!("a..b".parse::<Name>().is_err());
        assert!(format!("{}.com", "x".repeat(64)).parse::<Name>().is_err());
    }
}
