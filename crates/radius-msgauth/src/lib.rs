//! RADIUS Message-Authenticator Verification
//!
//! This crate checks the Message-Authenticator attribute (type 80, RFC 2869
//! Section 5.14) of a captured RADIUS packet against the value recomputed
//! from the packet bytes and the shared secret.
//!
//! # Features
//!
//! - Locating the attribute by structured attribute walk or raw marker scan
//! - Canonicalization (zeroing the 16 octet value) and HMAC-MD5 recomputation
//! - Constant-time comparison of embedded and computed values
//! - Hex stream input decoded to bytes before any offset arithmetic
//!
//! # Example
//!
//! ```rust
//! use radius_msgauth::{MessageAuthenticatorVerifier, VerifyError};
//!
//! // Access-Request with a single, still zeroed, Message-Authenticator
//! let mut packet = vec![0x01, 0x01, 0x00, 0x26];
//! packet.extend_from_slice(&[0u8; 16]);
//! packet.extend_from_slice(&[0x50, 0x12]);
//! packet.extend_from_slice(&[0u8; 16]);
//!
//! let verifier = MessageAuthenticatorVerifier::new();
//! verifier.sign(&mut packet, "testing123")?;
//!
//! let result = verifier.verify(&packet, "testing123")?;
//! assert!(result.matches);
//! assert_eq!(result.reference.offset(), 20);
//!
//! let result = verifier.verify(&packet, "wrong-secret")?;
//! assert!(!result.matches);
//! # Ok::<(), VerifyError>(())
//! ```

pub mod attributes;
pub mod encoding;
pub mod error;
pub mod locator;
pub mod message_auth;
pub mod packet;


pub use encoding::{decode_message_hex, encode_hex};
pub use error::VerifyError;
pub use locator::{AttributeLocator, AttributeReference, LocateStrategy};
pub use message_auth::{
    calculate_message_authenticator, canonicalize, DigestResult, MessageAuthenticatorVerifier,
};
pub use packet::{Code, PacketError, PacketHeader};
