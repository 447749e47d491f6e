//! Locating the Message-Authenticator attribute inside a packet buffer.
//!
//! Two strategies are available:
//!
//! - [`LocateStrategy::Walk`] (default) decodes the RADIUS header and walks
//!   the attribute list type by type. Marker octets that happen to appear
//!   inside another attribute's value are never matched.
//! - [`LocateStrategy::Scan`] searches for the first `0x50 0x12` octet pair
//!   anywhere in the buffer. It accepts fragments that are not a complete
//!   packet, at the cost of possible false positives.
//!
//! A walk over a malformed attribute list falls back to a scan of the whole
//! buffer. A clean walk without a match falls back to a scan of the octets
//! the walk never read as attributes: the 20 octet header and anything past
//! the Length field. Candidates inside walked attributes stay excluded.

use crate::attributes::{
    attribute_name, Attributes, MESSAGE_AUTHENTICATOR_LENGTH, MESSAGE_AUTHENTICATOR_TYPE,
    MESSAGE_AUTHENTICATOR_VALUE_LENGTH,
};
use crate::encoding::decode_message_hex;
use crate::error::VerifyError;
use crate::packet::{PacketError, PacketHeader};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;
use tracing::{debug, trace, warn};

/// Type and Length octets of a Message-Authenticator attribute
pub const MARKER: [u8; 2] = [MESSAGE_AUTHENTICATOR_TYPE, MESSAGE_AUTHENTICATOR_LENGTH];

/// Position of a Message-Authenticator attribute within a buffer.
///
/// Only the locator constructs references, and only when the whole
/// attribute (2 header octets + 16 value octets) fits in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttributeReference {
    attr_type: u8,
    offset: usize,
    value_length: usize,
}

impl AttributeReference {
    fn message_authenticator(offset: usize) -> Self {
        AttributeReference {
            attr_type: MESSAGE_AUTHENTICATOR_TYPE,
            offset,
            value_length: MESSAGE_AUTHENTICATOR_VALUE_LENGTH,
        }
    }

    pub fn attr_type(&self) -> u8 {
        self.attr_type
    }

    /// Byte index of the Type octet
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn value_length(&self) -> usize {
        self.value_length
    }

    /// Byte index of the first value octet
    pub fn value_offset(&self) -> usize {
        self.offset + MARKER.len()
    }

    pub fn value_range(&self) -> Range<usize> {
        self.value_offset()..self.end()
    }

    /// One past the last value octet
    pub fn end(&self) -> usize {
        self.value_offset() + self.value_length
    }

    fn fits(&self, len: usize) -> bool {
        self.end() <= len
    }
}

/// How [`AttributeLocator`] searches a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocateStrategy {
    /// Structured walk of the attribute list, falling back to `Scan`
    #[default]
    Walk,
    /// First `50 12` octet pair found by forward search
    Scan,
}

impl fmt::Display for LocateStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocateStrategy::Walk => write!(f, "walk"),
            LocateStrategy::Scan => write!(f, "scan"),
        }
    }
}

impl FromStr for LocateStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "walk" => Ok(LocateStrategy::Walk),
            "scan" => Ok(LocateStrategy::Scan),
            other => Err(format!(
                "unknown locate strategy '{}' (expected 'walk' or 'scan')",
                other
            )),
        }
    }
}

/// Finds the Message-Authenticator attribute in raw packet bytes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttributeLocator {
    strategy: LocateStrategy,
}

impl AttributeLocator {
    pub fn new(strategy: LocateStrategy) -> Self {
        AttributeLocator { strategy }
    }

    pub fn strategy(&self) -> LocateStrategy {
        self.strategy
    }

    /// Locate the first Message-Authenticator attribute in `buffer`.
    ///
    /// Fails with [`VerifyError::AttributeNotFound`] when no complete
    /// attribute exists.
    pub fn locate(&self, buffer: &[u8]) -> Result<AttributeReference, VerifyError> {
        let found = match self.strategy {
            LocateStrategy::Scan => scan(buffer),
            LocateStrategy::Walk => match walk(buffer) {
                Ok(Walked::Found(reference)) => Some(reference),
                Ok(Walked::Clean { attributes }) => {
                    debug!(
                        start = attributes.start,
                        end = attributes.end,
                        len = buffer.len(),
                        "No Message-Authenticator in attribute list, scanning header and trailing octets"
                    );
                    scan_where(buffer, |offset| !attributes.contains(&offset))
                }
                Err(e) => {
                    warn!(
                        error = %e,
                        len = buffer.len(),
                        "Attribute list is not well formed, falling back to marker scan"
                    );
                    scan(buffer)
                }
            },
        };

        let reference = found.ok_or(VerifyError::AttributeNotFound)?;
        debug!(
            strategy = %self.strategy,
            offset = reference.offset(),
            "Located Message-Authenticator"
        );
        Ok(reference)
    }

    /// Decode a hex stream and locate on the resulting bytes.
    ///
    /// The returned offset counts bytes, exactly as [`locate`](Self::locate)
    /// would on the decoded buffer.
    pub fn locate_hex(&self, text: &str) -> Result<AttributeReference, VerifyError> {
        let buffer = decode_message_hex(text)?;
        self.locate(&buffer)
    }
}

fn scan(buffer: &[u8]) -> Option<AttributeReference> {
    scan_where(buffer, |_| true)
}

/// First fitting marker whose offset passes `accept`
fn scan_where<F>(buffer: &[u8], accept: F) -> Option<AttributeReference>
where
    F: Fn(usize) -> bool,
{
    buffer
        .windows(MARKER.len())
        .enumerate()
        .filter(|(offset, pair)| *pair == &MARKER[..] && accept(*offset))
        .map(|(offset, _)| AttributeReference::message_authenticator(offset))
        .find(|reference| {
            let fits = reference.fits(buffer.len());
            if !fits {
                trace!(
                    offset = reference.offset(),
                    len = buffer.len(),
                    "Marker too close to end of buffer, skipping"
                );
            }
            fits
        })
}

enum Walked {
    Found(AttributeReference),
    /// Well formed list without a Message-Authenticator; `attributes` is the
    /// region that was read as (type, length, value) triples
    Clean { attributes: Range<usize> },
}

fn walk(buffer: &[u8]) -> Result<Walked, PacketError> {
    let header = PacketHeader::decode(buffer)?;
    let end = header.attributes_end(buffer.len());

    for attr in Attributes::new(buffer, PacketHeader::SIZE, end) {
        let attr = attr?;
        trace!(
            offset = attr.offset,
            attr_type = attr.attr_type,
            name = attribute_name(attr.attr_type).unwrap_or("unknown"),
            len = attr.encoded_length(),
            "Attribute"
        );

        if attr.attr_type == MESSAGE_AUTHENTICATOR_TYPE
            && attr.value.len() == MESSAGE_AUTHENTICATOR_VALUE_LENGTH
        {
            return Ok(Walked::Found(AttributeReference::message_authenticator(
                attr.offset,
            )));
        }
    }

    Ok(Walked::Clean {
        attributes: PacketHeader::SIZE..end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packet(attributes: &[u8]) -> Vec<u8> {
        let length = (PacketHeader::SIZE + attributes.len()) as u16;
        let mut data = vec![1, 7];
        data.extend_from_slice(&length.to_be_bytes());
        data.extend_from_slice(&[0x11; 16]);
        data.extend_from_slice(attributes);
        data
    }

    fn message_authenticator(fill: u8) -> Vec<u8> {
        let mut attr = MARKER.to_vec();
        attr.extend_from_slice(&[fill; 16]);
        attr
    }

    #[test]
    fn test_scan_finds_marker() {
        let mut buffer = vec![0x01, 0x02, 0x03];
        buffer.extend(message_authenticator(0xAA));

        let reference = AttributeLocator::new(LocateStrategy::Scan)
            .locate(&buffer)
            .unwrap();
        assert_eq!(reference.offset(), 3);
        assert_eq!(reference.value_offset(), 5);
        assert_eq!(reference.value_range(), 5..21);
        assert_eq!(reference.attr_type(), 80);
        assert_eq!(reference.value_length(), 16);
    }

    #[test]
    fn test_scan_first_occurrence_wins() {
        let mut buffer = message_authenticator(0x01);
        buffer.extend(message_authenticator(0x02));

        let reference = AttributeLocator::new(LocateStrategy::Scan)
            .locate(&buffer)
            .unwrap();
        assert_eq!(reference.offset(), 0);
    }

    #[test]
    fn test_scan_skips_marker_without_room_for_value() {
        // Only the first candidate has a full value behind it
        let mut buffer = message_authenticator(0x00);
        buffer.extend_from_slice(&MARKER);
        buffer.extend_from_slice(&[0u8; 15]);
        let reference = AttributeLocator::new(LocateStrategy::Scan)
            .locate(&buffer)
            .unwrap();
        assert_eq!(reference.offset(), 0);

        let short = [0x50, 0x12, 0x00, 0x00];
        assert_eq!(
            AttributeLocator::new(LocateStrategy::Scan).locate(&short),
            Err(VerifyError::AttributeNotFound)
        );
    }

    #[test]
    fn test_empty_buffer() {
        for strategy in [LocateStrategy::Scan, LocateStrategy::Walk] {
            assert_eq!(
                AttributeLocator::new(strategy).locate(&[]),
                Err(VerifyError::AttributeNotFound)
            );
        }
    }

    #[test]
    fn test_marker_in_reverse_order_is_not_matched() {
        let mut buffer = vec![0x12, 0x50];
        buffer.extend_from_slice(&[0u8; 32]);
        assert_eq!(
            AttributeLocator::new(LocateStrategy::Scan).locate(&buffer),
            Err(VerifyError::AttributeNotFound)
        );
    }

    #[test]
    fn test_walk_finds_attribute() {
        let mut attrs = vec![0x01, 0x07, b'a', b'l', b'i', b'c', b'e'];
        attrs.extend(message_authenticator(0x00));
        let buffer = packet(&attrs);

        let reference = AttributeLocator::default().locate(&buffer).unwrap();
        assert_eq!(reference.offset(), 27);
    }

    #[test]
    fn test_walk_ignores_marker_inside_value() {
        // User-Name whose value contains 50 12 followed by 16 octets
        let mut attrs = vec![0x01, 0x14, 0x50, 0x12];
        attrs.extend_from_slice(&[b'x'; 16]);
        attrs.extend(message_authenticator(0x00));
        let buffer = packet(&attrs);

        let walked = AttributeLocator::new(LocateStrategy::Walk)
            .locate(&buffer)
            .unwrap();
        let scanned = AttributeLocator::new(LocateStrategy::Scan)
            .locate(&buffer)
            .unwrap();

        assert_eq!(walked.offset(), 40);
        assert_eq!(scanned.offset(), 22);
    }

    #[test]
    fn test_walk_well_formed_without_attribute() {
        // The marker exists only inside a value, so a walk must not find it
        let mut attrs = vec![0x01, 0x14, 0x50, 0x12];
        attrs.extend_from_slice(&[b'x'; 16]);
        let buffer = packet(&attrs);

        assert_eq!(
            AttributeLocator::new(LocateStrategy::Walk).locate(&buffer),
            Err(VerifyError::AttributeNotFound)
        );
    }

    #[test]
    fn test_walk_skips_type_80_with_wrong_length() {
        let mut attrs = vec![0x50, 0x04, 0x00, 0x00];
        attrs.extend(message_authenticator(0x00));
        let buffer = packet(&attrs);

        let reference = AttributeLocator::default().locate(&buffer).unwrap();
        assert_eq!(reference.offset(), 24);
    }

    #[test]
    fn test_walk_falls_back_on_malformed_list() {
        // Zero length attribute breaks the walk; the scan still finds it
        let mut attrs = vec![0x01, 0x00];
        attrs.extend(message_authenticator(0x00));
        let buffer = packet(&attrs);

        let reference = AttributeLocator::default().locate(&buffer).unwrap();
        assert_eq!(reference.offset(), 22);
    }

    #[test]
    fn test_walk_falls_back_on_fragment() {
        let buffer = message_authenticator(0x00);
        let reference = AttributeLocator::default().locate(&buffer).unwrap();
        assert_eq!(reference.offset(), 0);
    }

    #[test]
    fn test_clean_walk_scans_past_length() {
        // Attribute list ends at 23; the attribute sits in the trailing octets
        let mut buffer = packet(&[0x01, 0x03, b'a']);
        buffer.extend(message_authenticator(0x00));

        let reference = AttributeLocator::default().locate(&buffer).unwrap();
        assert_eq!(reference.offset(), 23);
    }

    #[test]
    fn test_clean_walk_scans_header_region() {
        // Code 0x50, identifier 0x12 and Length 20 decode as an empty packet
        let mut buffer = vec![0x50, 0x12, 0x00, 0x14];
        buffer.extend_from_slice(&[0xAB; 14]);
        buffer.extend_from_slice(&[0x04, 0x06, 0x0a, 0x00, 0x00, 0x01]);

        let reference = AttributeLocator::default().locate(&buffer).unwrap();
        assert_eq!(reference.offset(), 0);
        assert_eq!(
            AttributeLocator::new(LocateStrategy::Scan).locate(&buffer),
            Ok(reference)
        );
    }

    #[test]
    fn test_clean_walk_right_after_empty_header() {
        let mut buffer = packet(&[]);
        buffer.extend(message_authenticator(0x00));

        let reference = AttributeLocator::default().locate(&buffer).unwrap();
        assert_eq!(reference.offset(), 20);
    }

    #[test]
    fn test_locate_hex_matches_binary() {
        let mut attrs = vec![0x01, 0x03, b'a'];
        attrs.extend(message_authenticator(0x5A));
        let buffer = packet(&attrs);
        let text = hex::encode(&buffer);

        for strategy in [LocateStrategy::Scan, LocateStrategy::Walk] {
            let locator = AttributeLocator::new(strategy);
            assert_eq!(locator.locate_hex(&text), locator.locate(&buffer));
        }
    }

    #[test]
    fn test_locate_hex_never_matches_across_nibbles() {
        // As text "0501 2..." contains "5012" at an odd nibble offset
        let text = format!("0501{}", "20".repeat(20));
        assert_eq!(
            AttributeLocator::new(LocateStrategy::Scan).locate_hex(&text),
            Err(VerifyError::AttributeNotFound)
        );
    }

    #[test]
    fn test_locate_hex_malformed() {
        assert!(matches!(
            AttributeLocator::default().locate_hex("5012z"),
            Err(VerifyError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("walk".parse::<LocateStrategy>(), Ok(LocateStrategy::Walk));
        assert_eq!("SCAN".parse::<LocateStrategy>(), Ok(LocateStrategy::Scan));
        assert!("grep".parse::<LocateStrategy>().is_err());
        assert_eq!(LocateStrategy::Scan.to_string(), "scan");
    }
}
