#![allow(dead_code)]

use basic::mach::{CharResult, Io, Runtime, Step};
use std::collections::{HashMap, VecDeque};
use std::io;

/// Scripted host: canned input, captured output. INPUT prompts show
/// as `? `; errors and trace lines each end with a newline. Files and
/// the clipboard are plain maps so SAVE/LOAD/FILES run without disk.
pub struct ScriptIo {
    feed: VecDeque<CharResult>,
    waits_when_empty: bool,
    pub output: String,
    pub files: HashMap<String, String>,
    pub clipboard: Option<String>,
    pub bye_called: bool,
}

impl ScriptIo {
    pub fn new(input: &str) -> ScriptIo {
        ScriptIo {
            feed: input.bytes().map(CharResult::Value).collect(),
            waits_when_empty: false,
            output: String::new(),
            files: HashMap::new(),
            clipboard: None,
            bye_called: false,
        }
    }

    /// Like an interactive source: an empty feed means "not yet",
    /// not end-of-stream.
    pub fn interactive(input: &str) -> ScriptIo {
        let mut io = ScriptIo::new(input);
        io.waits_when_empty = true;
        io
    }

    /// Append a point where the source reports Waiting once.
    pub fn push_wait(&mut self) {
        self.feed.push_back(CharResult::Waiting);
    }

    pub fn push_text(&mut self, text: &str) {
        self.feed.extend(text.bytes().map(CharResult::Value));
    }
}

impl Io for ScriptIo {
    fn next_char(&mut self) -> CharResult {
        match self.feed.pop_front() {
            Some(result) => result,
            None if self.waits_when_empty => CharResult::Waiting,
            None => CharResult::EndOfStream,
        }
    }

    fn write_char(&mut self, ch: u8) {
        self.output.push(ch as char);
    }

    fn show_prompt(&mut self) {}

    fn show_input_prompt(&mut self) {
        self.output.push_str("? ");
    }

    fn show_error(&mut self, message: &str) {
        self.output.push_str(message);
        self.output.push('\n');
    }

    fn show_trace_line(&mut self, text: &str) {
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn read_program(&mut self, name: &str) -> io::Result<String> {
        match self.files.get(name) {
            Some(text) => Ok(text.clone()),
            None => Err(io::Error::new(io::ErrorKind::NotFound, name.to_string())),
        }
    }

    fn write_program(&mut self, name: &str, text: &str) -> io::Result<()> {
        self.files.insert(name.to_string(), text.to_string());
        Ok(())
    }

    fn list_files(&mut self) -> io::Result<Vec<String>> {
        let mut names: Vec<String> = self.files.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    fn clipboard_text(&mut self) -> Option<String> {
        self.clipboard.clone()
    }

    fn set_clipboard_text(&mut self, text: &str) -> io::Result<()> {
        self.clipboard = Some(text.to_string());
        Ok(())
    }

    fn bye(&mut self) {
        self.bye_called = true;
    }
}

pub fn runtime(input: &str) -> Runtime<ScriptIo> {
    Runtime::new(ScriptIo::new(input))
}

/// Engine over an interactive-style host that suspends when its feed
/// runs dry.
pub fn interactive_runtime(input: &str) -> Runtime<ScriptIo> {
    Runtime::new(ScriptIo::interactive(input))
}

/// Drive until the script is exhausted or the engine suspends, then
/// return everything written so far.
pub fn exec(runtime: &mut Runtime<ScriptIo>) -> String {
    exec_n(runtime, 10_000)
}

pub fn exec_n(runtime: &mut Runtime<ScriptIo>, steps: usize) -> String {
    for _ in 0..steps {
        match runtime.step() {
            Step::Ran => {}
            Step::Waiting | Step::EndOfInput => return runtime.io().output.clone(),
        }
    }
    panic!("{} execution steps exceeded", steps);
}
