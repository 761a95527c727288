pub mod collector;
pub mod query;
pub mod session;

use std::io::{self, BufRead, Write};

/// Reads one trimmed line. `None` once the input is exhausted.
///
/// Bytes that are not UTF-8 become U+FFFD, so they surface as an invalid
/// answer instead of an I/O failure.
pub(crate) fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = Vec::new();
    if input.read_until(b'\n', &mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&line).trim().to_string()))
}

/// Writes a prompt without a newline and flushes it so it shows before the read.
pub(crate) fn prompt<W: Write>(output: &mut W, text: &str) -> io::Result<()> {
    write!(output, "{text}")?;
    output.flush()
}
