//! Message-Authenticator Verification (RFC 2869)
//!
//! Message-Authenticator provides integrity protection using HMAC-MD5.
//!
//! Per RFC 2869 Section 5.14 and RFC 3579 Section 3.2:
//! - Computed as HMAC-MD5(shared_secret, packet)
//! - Always 16 bytes (128 bits)
//! - The Message-Authenticator value is set to 16 zero octets while hashing;
//!   every other octet, including the attribute's own Type and Length, is
//!   hashed as captured
//!
//! Verification of a captured packet therefore locates the attribute, reads
//! the embedded value, zeroes it in a copy of the packet and recomputes the
//! HMAC over that copy.

use crate::attributes::MESSAGE_AUTHENTICATOR_VALUE_LENGTH;
use crate::encoding::{decode_message_hex, encode_hex};
use crate::error::VerifyError;
use crate::locator::{AttributeLocator, AttributeReference, LocateStrategy};
use hmac::{Hmac, Mac};
use md5_digest::Md5;
use subtle::ConstantTimeEq;
use tracing::debug;

type HmacMd5 = Hmac<Md5>;

/// Calculate Message-Authenticator for a RADIUS packet
///
/// # Arguments
/// * `packet_bytes` - The complete RADIUS packet bytes with Message-Authenticator set to zeros
/// * `secret` - The shared secret
///
/// # Returns
/// 16-byte HMAC-MD5 hash
pub fn calculate_message_authenticator(packet_bytes: &[u8], secret: &[u8]) -> [u8; 16] {
    let mut mac = HmacMd5::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(packet_bytes);

    let mut output = [0u8; MESSAGE_AUTHENTICATOR_VALUE_LENGTH];
    output.copy_from_slice(&mac.finalize().into_bytes());
    output
}

/// Copy `buffer` with the referenced Message-Authenticator value zeroed.
///
/// All octets outside the value region are copied unchanged. Fails if the
/// reference was taken from a different, shorter buffer.
pub fn canonicalize(
    buffer: &[u8],
    reference: &AttributeReference,
) -> Result<Vec<u8>, VerifyError> {
    let mut canonical = buffer.to_vec();
    canonical
        .get_mut(reference.value_range())
        .ok_or_else(|| {
            VerifyError::MalformedInput(format!(
                "attribute at offset {} ends at {}, past the end of a {} byte buffer",
                reference.offset(),
                reference.end(),
                buffer.len()
            ))
        })?
        .fill(0);
    Ok(canonical)
}

/// Outcome of one verification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigestResult {
    /// Where the attribute was found
    pub reference: AttributeReference,
    /// Value carried in the packet
    pub embedded_value: [u8; 16],
    /// HMAC-MD5 over the canonical packet
    pub computed_value: [u8; 16],
    pub matches: bool,
}

impl DigestResult {
    pub fn embedded_hex(&self) -> String {
        encode_hex(&self.embedded_value)
    }

    pub fn computed_hex(&self) -> String {
        encode_hex(&self.computed_value)
    }
}

/// Recomputes and checks the Message-Authenticator of captured packets.
///
/// Holds no state besides the locator configuration, so one verifier can be
/// shared across threads and reused for any number of packets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageAuthenticatorVerifier {
    locator: AttributeLocator,
}

impl MessageAuthenticatorVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategy(strategy: LocateStrategy) -> Self {
        MessageAuthenticatorVerifier {
            locator: AttributeLocator::new(strategy),
        }
    }

    pub fn locator(&self) -> &AttributeLocator {
        &self.locator
    }

    /// Verify the Message-Authenticator embedded in `buffer`.
    ///
    /// `buffer` must hold only the RADIUS layer of the packet. A digest
    /// mismatch is reported through [`DigestResult::matches`]; the only
    /// error is a missing attribute.
    pub fn verify(&self, buffer: &[u8], shared_secret: &str) -> Result<DigestResult, VerifyError> {
        let reference = self.locator.locate(buffer)?;

        let mut embedded_value = [0u8; MESSAGE_AUTHENTICATOR_VALUE_LENGTH];
        embedded_value.copy_from_slice(&buffer[reference.value_range()]);

        let canonical = canonicalize(buffer, &reference)?;
        let computed_value = calculate_message_authenticator(&canonical, shared_secret.as_bytes());

        let matches: bool = embedded_value[..].ct_eq(&computed_value[..]).into();

        debug!(
            offset = reference.offset(),
            embedded = %encode_hex(&embedded_value),
            computed = %encode_hex(&computed_value),
            matches,
            "Verified Message-Authenticator"
        );

        Ok(DigestResult {
            reference,
            embedded_value,
            computed_value,
            matches,
        })
    }

    /// Decode a hex stream, then [`verify`](Self::verify) it
    pub fn verify_hex(&self, text: &str, shared_secret: &str) -> Result<DigestResult, VerifyError> {
        let buffer = decode_message_hex(text)?;
        self.verify(&buffer, shared_secret)
    }

    /// Compute the Message-Authenticator for `buffer` and write it in place.
    ///
    /// The attribute must already be present; its current value is ignored.
    pub fn sign(
        &self,
        buffer: &mut [u8],
        shared_secret: &str,
    ) -> Result<AttributeReference, VerifyError> {
        let reference = self.locator.locate(buffer)?;
        let range = reference.value_range();

        buffer[range.clone()].fill(0);
        let value = calculate_message_authenticator(buffer, shared_secret.as_bytes());
        buffer[range].copy_from_slice(&value);

        Ok(reference)
    }
}
