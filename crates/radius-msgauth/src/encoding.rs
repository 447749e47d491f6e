//! Hex text form of a packet.
//!
//! Captures are often shared as hex streams (Wireshark "Copy as Hex Stream")
//! rather than raw byte exports. Text is decoded to bytes up front so that
//! every offset in this crate counts octets, never nibbles.

use crate::error::VerifyError;

/// Decode a hex stream into packet bytes.
///
/// ASCII whitespace anywhere and a single leading `0x`/`0X` are ignored.
/// Odd digit counts and non-hex characters are rejected.
pub fn decode_message_hex(text: &str) -> Result<Vec<u8>, VerifyError> {
    let trimmed = text.trim_start();
    let body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    let digits: String = body.chars().filter(|c| !c.is_ascii_whitespace()).collect();

    hex::decode(&digits).map_err(|e| match e {
        hex::FromHexError::OddLength => VerifyError::MalformedInput(format!(
            "hex input has an odd number of digits ({})",
            digits.len()
        )),
        hex::FromHexError::InvalidHexCharacter { c, index } => VerifyError::MalformedInput(
            format!("invalid hex character {:?} at digit {}", c, index),
        ),
        other => VerifyError::MalformedInput(other.to_string()),
    })
}

/// Lowercase hex, the form Wireshark and the reports print digests in
pub fn encode_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_plain() {
        assert_eq!(decode_message_hex("0150121a").unwrap(), vec![0x01, 0x50, 0x12, 0x1a]);
    }

    #[test]
    fn test_decode_uppercase_and_whitespace() {
        let text = "01 50\n12\t1A\r\n";
        assert_eq!(decode_message_hex(text).unwrap(), vec![0x01, 0x50, 0x12, 0x1a]);
    }

    #[test]
    fn test_decode_prefix() {
        assert_eq!(decode_message_hex("0x5012").unwrap(), vec![0x50, 0x12]);
        assert_eq!(decode_message_hex("  0X5012").unwrap(), vec![0x50, 0x12]);
    }

    #[test]
    fn test_decode_empty() {
        assert!(decode_message_hex("").unwrap().is_empty());
        assert!(decode_message_hex(" \n").unwrap().is_empty());
    }

    #[test]
    fn test_odd_length_rejected() {
        let err = decode_message_hex("50120").unwrap_err();
        assert!(matches!(err, VerifyError::MalformedInput(ref msg) if msg.contains("odd")));
    }

    #[test]
    fn test_non_hex_rejected() {
        let err = decode_message_hex("50zz").unwrap_err();
        assert!(matches!(err, VerifyError::MalformedInput(ref msg) if msg.contains("'z'")));
    }

    #[test]
    fn test_encode_lowercase() {
        assert_eq!(encode_hex(&[0xAB, 0x01]), "ab01");
    }
}
