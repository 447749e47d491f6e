use thiserror::Error;

/// Failures surfaced by [`AttributeLocator`](crate::AttributeLocator) and
/// [`MessageAuthenticatorVerifier`](crate::MessageAuthenticatorVerifier).
///
/// A digest mismatch is not an error; it is reported through
/// [`DigestResult::matches`](crate::DigestResult::matches).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    #[error("Message-Authenticator attribute (type 80, length 18) not found in packet")]
    AttributeNotFound,
    #[error("Malformed input: {0}")]
    MalformedInput(String),
}
