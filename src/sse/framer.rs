//! Byte-chunk to line framing
//!
//! The network hands the response body over in chunks that split lines at
//! arbitrary byte positions. LineFramer owns the carry-over buffer so the
//! stream loop can feed chunks exactly as they arrive and only ever sees
//! complete lines.

/// Accumulates raw response bytes and drains complete lines.
///
/// Lines end at `\n` or `\r\n`; the terminator is stripped. Bytes after the
/// last terminator stay buffered until the next `push` or the final
/// `finish`. The buffer holds bytes rather than text so a UTF-8 sequence
/// split across chunks reassembles before decoding.
#[derive(Debug, Default)]
pub struct LineFramer {
    buf: Vec<u8>,
}

impl LineFramer {
    /// Create a framer with an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and return every line it completes, in order.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buf.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
            let mut line: Vec<u8> = self.buf.drain(..=pos).collect();
            line.pop(); // the \n
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            lines.push(String::from_utf8_lossy(&line).into_owned());
        }
        lines
    }

    /// Flush the trailing partial line once the stream has ended.
    ///
    /// Returns `None` when the buffer is empty or holds only a stray `\r`.
    pub fn finish(&mut self) -> Option<String> {
        if self.buf.is_empty() {
            return None;
        }
        let mut line = std::mem::take(&mut self.buf);
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        if line.is_empty() {
            return None;
        }
        Some(String::from_utf8_lossy(&line).into_owned())
    }
}
