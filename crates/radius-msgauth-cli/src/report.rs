use crate::check::CheckOutcome;
use crate::error::CliError;
use serde::Serialize;
use std::io::{self, Write};

/// JSON form of a check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Byte offset of the attribute's Type octet
    pub offset: usize,
    pub embedded: String,
    pub computed: String,
    pub matches: bool,
    pub header: Option<HeaderSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderSummary {
    pub code: String,
    pub identifier: u8,
    pub length: u16,
}

impl Report {
    pub fn from_outcome(outcome: &CheckOutcome) -> Self {
        Report {
            offset: outcome.result.reference.offset(),
            embedded: outcome.result.embedded_hex(),
            computed: outcome.result.computed_hex(),
            matches: outcome.result.matches,
            header: outcome.header.map(|h| HeaderSummary {
                code: h
                    .code()
                    .map(|c| c.name().to_string())
                    .unwrap_or_else(|| format!("Unknown({})", h.raw_code)),
                identifier: h.identifier,
                length: h.length,
            }),
        }
    }
}

pub fn render_json<W: Write>(outcome: &CheckOutcome, out: &mut W) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, &Report::from_outcome(outcome))?;
    writeln!(out).map_err(CliError::Output)
}

pub fn render_text<W: Write>(outcome: &CheckOutcome, out: &mut W) -> io::Result<()> {
    let report = Report::from_outcome(outcome);

    if let Some(ref header) = report.header {
        writeln!(
            out,
            "Packet: {} (id {}, length {}, {} bytes read)",
            header.code, header.identifier, header.length, outcome.buffer_len
        )?;
    } else {
        writeln!(out, "Packet: {} bytes read, no RADIUS header", outcome.buffer_len)?;
    }
    writeln!(out, "Message-Authenticator found at offset {}", report.offset)?;
    writeln!(out)?;
    writeln!(out, "Message-Authenticator in packet:")?;
    writeln!(out, "{}", report.embedded)?;
    writeln!(out)?;
    writeln!(out, "Calculated hash:")?;
    writeln!(out, "{}", report.computed)?;
    writeln!(out)?;

    if report.matches {
        writeln!(out, "Hash in packet and calculation match!")?;
        return Ok(());
    }

    writeln!(out, "!!! HASH IN PACKET AND CALCULATION DO NOT MATCH")?;
    writeln!(out, "!!! Check the following:")?;
    writeln!(
        out,
        "!!! 1. make sure to only export the RADIUS part of the packet, no other parts, like UDP"
    )?;
    writeln!(out, "!!! 2. check the shared secret")?;
    if outcome.length_mismatch() {
        if let Some(ref header) = report.header {
            writeln!(
                out,
                "!!! note: the RADIUS Length field says {} bytes but {} were read; \
                 the export likely includes lower-layer framing or is truncated",
                header.length, outcome.buffer_len
            )?;
        }
    }
    Ok(())
}
