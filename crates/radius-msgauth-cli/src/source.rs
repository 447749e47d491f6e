use radius_msgauth::{decode_message_hex, VerifyError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{0} contains no packet bytes")]
    Empty(String),
    #[error(transparent)]
    Malformed(#[from] VerifyError),
}

/// Encoding of an input file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// Hex when the file holds only hex digits and whitespace, else binary
    #[default]
    Auto,
    /// Raw octets, as written by Wireshark "Export Packet Bytes"
    Binary,
    /// Hex stream, as copied by Wireshark "Copy as Hex Stream"
    Hex,
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputFormat::Auto => write!(f, "auto"),
            InputFormat::Binary => write!(f, "binary"),
            InputFormat::Hex => write!(f, "hex"),
        }
    }
}

impl FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(InputFormat::Auto),
            "binary" | "bin" => Ok(InputFormat::Binary),
            "hex" => Ok(InputFormat::Hex),
            other => Err(format!(
                "unknown input format '{}' (expected 'auto', 'binary' or 'hex')",
                other
            )),
        }
    }
}

/// Where the packet bytes come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferSource {
    File(PathBuf),
    /// Hex stream given directly on the command line
    Hex(String),
}

impl BufferSource {
    /// Read the packet bytes. `format` applies to files only.
    pub fn load(&self, format: InputFormat) -> Result<Vec<u8>, SourceError> {
        let bytes = match self {
            BufferSource::Hex(text) => decode_message_hex(text)?,
            BufferSource::File(path) => {
                let raw = fs::read(path).map_err(|source| SourceError::Io {
                    path: path.clone(),
                    source,
                })?;

                let as_hex = match format {
                    InputFormat::Hex => true,
                    InputFormat::Binary => false,
                    InputFormat::Auto => looks_like_hex(&raw),
                };
                debug!(path = %path.display(), len = raw.len(), as_hex, "Read input file");

                if as_hex {
                    let text = String::from_utf8(raw).map_err(|e| {
                        VerifyError::MalformedInput(format!(
                            "hex input is not valid UTF-8: {}",
                            e.utf8_error()
                        ))
                    })?;
                    decode_message_hex(&text)?
                } else {
                    raw
                }
            }
        };

        if bytes.is_empty() {
            return Err(SourceError::Empty(self.to_string()));
        }
        Ok(bytes)
    }
}

impl fmt::Display for BufferSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferSource::File(path) => write!(f, "{}", path.display()),
            BufferSource::Hex(_) => write!(f, "hex argument"),
        }
    }
}

/// Whether `data` reads as a hex stream.
///
/// Hex digits and ASCII whitespace only, after an optional `0x` prefix. The
/// header length octets and random authenticator of a binary export are all
/// but certain to fall outside that set.
pub fn looks_like_hex(data: &[u8]) -> bool {
    let start = data
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(data.len());
    let body = &data[start..];
    let body = body
        .strip_prefix(b"0x")
        .or_else(|| body.strip_prefix(b"0X"))
        .unwrap_or(body);

    let mut digits = 0usize;
    for &b in body {
        if b.is_ascii_hexdigit() {
            digits += 1;
        } else if !b.is_ascii_whitespace() {
            return false;
        }
    }
    digits > 0
}
