use crate::packet::PacketError;

/// Borrowed view of one attribute inside a packet buffer (RFC 2865 Section 5)
///
/// ```text
///  0                   1                   2
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |     Type      |    Length     |  Value ...
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawAttribute<'a> {
    /// Byte index of the Type octet within the packet
    pub offset: usize,
    pub attr_type: u8,
    pub value: &'a [u8],
}

impl<'a> RawAttribute<'a> {
    /// Type + Length octets
    pub const HEADER_LENGTH: usize = 2;

    /// Decode the attribute starting at `offset`, reading no further than `end`
    pub fn decode_at(data: &'a [u8], offset: usize, end: usize) -> Result<Self, PacketError> {
        let end = end.min(data.len());
        if offset + Self::HEADER_LENGTH > end {
            return Err(PacketError::TruncatedAttribute {
                offset,
                end: offset + Self::HEADER_LENGTH,
                available: end,
            });
        }

        let attr_type = data[offset];
        let length = data[offset + 1];
        if (length as usize) < Self::HEADER_LENGTH {
            return Err(PacketError::InvalidAttributeLength { offset, length });
        }

        let attr_end = offset + length as usize;
        if attr_end > end {
            return Err(PacketError::TruncatedAttribute {
                offset,
                end: attr_end,
                available: end,
            });
        }

        Ok(RawAttribute {
            offset,
            attr_type,
            value: &data[offset + Self::HEADER_LENGTH..attr_end],
        })
    }

    pub fn encoded_length(&self) -> usize {
        Self::HEADER_LENGTH + self.value.len()
    }
}

/// Forward walk over a (type, length, value) list.
///
/// Yields each attribute in wire order. The first decoding error is yielded
/// once and ends the walk, since nothing after a bad length can be trusted.
#[derive(Debug, Clone)]
pub struct Attributes<'a> {
    data: &'a [u8],
    position: usize,
    end: usize,
    failed: bool,
}

impl<'a> Attributes<'a> {
    pub fn new(data: &'a [u8], start: usize, end: usize) -> Self {
        Attributes {
            data,
            position: start,
            end: end.min(data.len()),
            failed: false,
        }
    }
}

impl<'a> Iterator for Attributes<'a> {
    type Item = Result<RawAttribute<'a>, PacketError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.position >= self.end {
            return None;
        }

        match RawAttribute::decode_at(self.data, self.position, self.end) {
            Ok(attr) => {
                self.position += attr.encoded_length();
                Some(Ok(attr))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
