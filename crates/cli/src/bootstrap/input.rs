use bulkdns_domain::InputLine;
use std::borrow::Cow;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tracing::{debug, warn};

/// Reads every line up front so the run knows how many results to wait
/// for. Blank lines are dropped; invalid UTF-8 is replaced, not fatal.
pub async fn read_input<R: AsyncRead + Unpin>(reader: R) -> anyhow::Result<Vec<InputLine>> {
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    let mut input = Vec::new();
    let mut skipped = 0usize;
    let mut line_no = 0usize;

    while reader.read_until(b'\n', &mut buf).await? > 0 {
        line_no += 1;
        let line = String::from_utf8_lossy(&buf);
        if matches!(line, Cow::Owned(_)) {
            warn!(line = line_no, "Input line is not valid UTF-8, replacing invalid bytes");
        }
        match InputLine::parse(&line) {
            Some(parsed) => input.push(parsed),
            None => skipped += 1,
        }
        buf.clear();
    }

    debug!(lines = input.len(), skipped, "Input read");
    Ok(input)
}
