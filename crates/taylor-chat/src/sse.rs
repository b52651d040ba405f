//! Server-sent-event line framing
//!
//! The chat endpoint streams SSE-style lines, but transport chunk
//! boundaries fall anywhere: mid-line, mid-JSON, even mid-UTF-8-sequence.
//! The buffer therefore carries raw bytes and only decodes once a full
//! line is available.

/// Prefix of event lines that carry a payload
pub const DATA_PREFIX: &str = "data: ";

/// Payload marking the end of the event stream
pub const DONE_SENTINEL: &str = "[DONE]";

/// Carry-over buffer that reassembles logical lines from arbitrary chunks
#[derive(Debug, Default)]
pub struct LineBuffer {
    buf: Vec<u8>,
}

impl LineBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and drain all complete lines.
    ///
    /// The trailing fragment without a newline stays buffered until a
    /// later chunk completes it. A single trailing `\r` is stripped from
    /// each returned line.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buf.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
            let mut line: Vec<u8> = self.buf.drain(..=pos).collect();
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            lines.push(String::from_utf8_lossy(&line).into_owned());
        }
        lines
    }

    /// Whether an incomplete fragment is currently held back
    pub fn has_partial(&self) -> bool {
        !self.buf.is_empty()
    }
}

/// Extract the payload of a data line.
///
/// Returns `None` for blank lines, comments/heartbeats (leading `:`), and
/// lines without the data prefix.
pub fn data_payload(line: &str) -> Option<&str> {
    if line.trim().is_empty() || line.starts_with(':') {
        return None;
    }
    line.strip_prefix(DATA_PREFIX).map(str::trim)
}
