//! Interactive fallback for input missing from the command line.

use std::io::{self, BufRead, Write};

/// Capture instructions shown before asking for a file
pub fn print_capture_guidance<W: Write>(out: &mut W) -> io::Result<()> {
    let rule = "#".repeat(64);
    writeln!(out, "{}", rule)?;
    writeln!(out, "### Export the RADIUS message from your packet capture.")?;
    writeln!(out, "### Open the capture in Wireshark and filter \"radius.code == 1\".")?;
    writeln!(out, "### Right-click only the RADIUS layer of the packet and choose")?;
    writeln!(out, "### \"Export Packet Bytes\" (or \"Copy as Hex Stream\" into a file).")?;
    writeln!(out, "{}", rule)?;
    writeln!(out)
}

/// Ask `question` and return the answer with the line ending removed.
///
/// Fails with `UnexpectedEof` when input ends before an answer, and with
/// `InvalidInput` on a blank answer.
pub fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    question: &str,
) -> io::Result<String> {
    writeln!(out, "{}", question)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("no answer to '{}'", question.trim_end_matches(':')),
        ));
    }

    let answer = line.trim_end_matches(['\r', '\n']).to_string();
    if answer.trim().is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("empty answer to '{}'", question.trim_end_matches(':')),
        ));
    }
    Ok(answer)
}
