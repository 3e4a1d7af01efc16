use std::io;

/// Result of asking the character source for one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharResult {
    /// The next byte of input.
    Value(u8),
    /// The source is exhausted.
    EndOfStream,
    /// Nothing available yet; ask again later.
    Waiting,
}

/// Everything the interpreter wants from its host.
///
/// Interactive sources may answer `Waiting`; file and string playback
/// sources must not. The capability methods default to "unsupported"
/// so a minimal host only has to provide the character stream and the
/// output sinks; a statement that needs a missing capability aborts
/// with an ordinary run-time error.
pub trait Io {
    fn next_char(&mut self) -> CharResult;

    fn write_char(&mut self, ch: u8);

    /// A statement or command is about to be read.
    fn show_prompt(&mut self);

    /// An INPUT statement is about to read values.
    fn show_input_prompt(&mut self);

    fn show_error(&mut self, message: &str);

    /// One line of TRON trace output.
    fn show_trace_line(&mut self, text: &str);

    fn read_program(&mut self, _name: &str) -> io::Result<String> {
        Err(unsupported("NO FILE STORAGE"))
    }

    fn write_program(&mut self, _name: &str, _text: &str) -> io::Result<()> {
        Err(unsupported("NO FILE STORAGE"))
    }

    fn list_files(&mut self) -> io::Result<Vec<String>> {
        Err(unsupported("NO FILE STORAGE"))
    }

    fn clipboard_text(&mut self) -> Option<String> {
        None
    }

    fn set_clipboard_text(&mut self, _text: &str) -> io::Result<()> {
        Err(unsupported("NO CLIPBOARD"))
    }

    /// BYE was executed; the session is over.
    fn bye(&mut self) {}
}

fn unsupported(what: &str) -> io::Error {
    io::Error::new(io::ErrorKind::Unsupported, what)
}
