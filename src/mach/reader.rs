use super::io::{CharResult, Io};

/// A logical line pulled from the character source.
#[derive(Debug, PartialEq)]
pub enum LineResult {
    Line(Vec<u8>),
    EndOfStream,
    Waiting,
}

/// Accumulates source bytes into logical lines.
///
/// The partial buffer persists across `Waiting` results, so a host can
/// deliver characters one at a time over many calls without losing
/// progress. Tabs become a single space; other non-graphic bytes are
/// dropped. There is no maximum line length.
#[derive(Debug, Default)]
pub struct LineReader {
    buffer: Vec<u8>,
}

impl LineReader {
    pub fn next_line<IO: Io>(&mut self, io: &mut IO) -> LineResult {
        loop {
            match io.next_char() {
                CharResult::Value(b'\n') => {
                    return LineResult::Line(std::mem::take(&mut self.buffer));
                }
                CharResult::Value(b'\t') => self.buffer.push(b' '),
                CharResult::Value(ch) if (0x20..=0x7e).contains(&ch) => self.buffer.push(ch),
                CharResult::Value(_) => {}
                CharResult::EndOfStream => {
                    // An unterminated last line still counts.
                    if self.buffer.is_empty() {
                        return LineResult::EndOfStream;
                    }
                    return LineResult::Line(std::mem::take(&mut self.buffer));
                }
                CharResult::Waiting => return LineResult::Waiting,
            }
        }
    }

    /// The partial line accumulated so far.
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }

    pub fn set_pending(&mut self, bytes: &[u8]) {
        self.buffer = bytes.to_vec();
    }
}
