use crate::error::CliError;
use crate::source::{BufferSource, InputFormat};
use radius_msgauth::{DigestResult, LocateStrategy, MessageAuthenticatorVerifier, PacketHeader};
use tracing::{debug, info};

/// Everything one check needs, gathered from flags, config and prompts
#[derive(Debug, Clone)]
pub struct CheckRequest {
    pub source: BufferSource,
    pub format: InputFormat,
    pub shared_secret: String,
    pub strategy: LocateStrategy,
}

/// Verification result plus the context the report needs
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    /// Decoded header, when the buffer starts with a plausible one
    pub header: Option<PacketHeader>,
    pub buffer_len: usize,
    pub result: DigestResult,
}

impl CheckOutcome {
    /// True when the header Length disagrees with the number of bytes read,
    /// the usual sign of UDP framing or a truncated export
    pub fn length_mismatch(&self) -> bool {
        self.header
            .map(|h| !h.length_matches(self.buffer_len))
            .unwrap_or(false)
    }
}

/// Load and verify one packet.
///
/// An empty shared secret is rejected whichever source it came from.
pub fn run_check(request: &CheckRequest) -> Result<CheckOutcome, CliError> {
    if request.shared_secret.is_empty() {
        return Err(CliError::EmptySecret);
    }

    info!(source = %request.source, format = %request.format, "Loading packet");
    let buffer = request.source.load(request.format)?;

    let header = PacketHeader::decode(&buffer).ok();
    if let Some(h) = header {
        debug!(
            code = h.raw_code,
            identifier = h.identifier,
            length = h.length,
            "Decoded RADIUS header"
        );
    }

    let verifier = MessageAuthenticatorVerifier::with_strategy(request.strategy);
    let result = verifier.verify(&buffer, &request.shared_secret)?;
    info!(matches = result.matches, "Check complete");

    Ok(CheckOutcome {
        header,
        buffer_len: buffer.len(),
        result,
    })
}
