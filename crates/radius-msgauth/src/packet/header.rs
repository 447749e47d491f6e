use super::Code;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PacketError {
    #[error("Invalid packet length: {0}")]
    InvalidLength(usize),
    #[error("Invalid attribute length {length} at offset {offset}")]
    InvalidAttributeLength { offset: usize, length: u8 },
    #[error("Attribute at offset {offset} ends at {end}, past the end of the packet ({available} bytes)")]
    TruncatedAttribute {
        offset: usize,
        end: usize,
        available: usize,
    },
}

/// Fixed RADIUS header as defined in RFC 2865 Section 3
///
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |     Code      |  Identifier   |            Length             |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                         Authenticator                         |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |  Attributes ...
/// +-+-+-+-+-+-+-+-+-+-+-+-+-
/// ```
///
/// Only the header is decoded. The attribute list is walked lazily by
/// [`Attributes`](crate::attributes::Attributes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketHeader {
    /// Code byte as it appears on the wire, known or not
    pub raw_code: u8,
    pub identifier: u8,
    /// Length field (big-endian), covering header and attributes
    pub length: u16,
    pub authenticator: [u8; 16],
}

impl PacketHeader {
    /// Header size: 1 code + 1 id + 2 length + 16 authenticator
    pub const SIZE: usize = 20;

    pub fn decode(data: &[u8]) -> Result<Self, PacketError> {
        if data.len() < Self::SIZE {
            return Err(PacketError::InvalidLength(data.len()));
        }

        let length = u16::from_be_bytes([data[2], data[3]]);
        if (length as usize) < Self::SIZE {
            return Err(PacketError::InvalidLength(length as usize));
        }

        let mut authenticator = [0u8; 16];
        authenticator.copy_from_slice(&data[4..Self::SIZE]);

        Ok(PacketHeader {
            raw_code: data[0],
            identifier: data[1],
            length,
            authenticator,
        })
    }

    pub fn code(&self) -> Option<Code> {
        Code::from_u8(self.raw_code)
    }

    /// End of the attribute region for a buffer of `available` bytes.
    ///
    /// Octets past the Length field are padding (RFC 2865 Section 3) and are
    /// not attributes; a Length larger than the buffer is clipped so a
    /// truncated capture surfaces as a truncated attribute.
    pub fn attributes_end(&self, available: usize) -> usize {
        (self.length as usize).min(available)
    }

    /// Whether the Length field accounts for exactly `available` bytes
    pub fn length_matches(&self, available: usize) -> bool {
        self.length as usize == available
    }
}
