/*!
### Terminal module

The interactive frontend: wires a line-editing terminal, Ctrl-C
handling, and local file storage to the interpreter's `Io` seam.
*/

extern crate ansi_term;
extern crate ctrlc;
extern crate linefeed;

use crate::mach::{CharResult, Io, Runtime, Step};
use ansi_term::Style;
use linefeed::{DefaultTerminal, Interface, ReadResult, Signal};
use std::collections::VecDeque;
use std::fs;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub fn main() {
    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl-C handler");
    if let Err(error) = main_loop(interrupted) {
        eprintln!("{}", error);
    }
}

fn main_loop(interrupted: Arc<AtomicBool>) -> io::Result<()> {
    println!("TINY BASIC");
    let term = TermIo::new(interrupted.clone())?;
    let mut runtime = Runtime::new(term);
    loop {
        if interrupted.swap(false, Ordering::SeqCst) {
            runtime.break_execution();
        }
        match runtime.step() {
            Step::Ran => {}
            // Waiting only happens when a read was interrupted; the
            // loop top turns it into a break.
            Step::Waiting => {}
            Step::EndOfInput => break,
        }
    }
    Ok(())
}

/// Host I/O backed by a line-editing terminal. Whole edited lines are
/// fed to the engine one byte at a time.
struct TermIo {
    interface: Interface<DefaultTerminal>,
    interrupted: Arc<AtomicBool>,
    pending: VecDeque<u8>,
    out: String,
    prompt: &'static str,
    eof: bool,
}

impl TermIo {
    fn new(interrupted: Arc<AtomicBool>) -> io::Result<TermIo> {
        let interface = Interface::new("BASIC")?;
        interface.set_report_signal(Signal::Interrupt, true);
        Ok(TermIo {
            interface,
            interrupted,
            pending: VecDeque::new(),
            out: String::new(),
            prompt: "> ",
            eof: false,
        })
    }

    fn flush_output(&mut self) {
        if !self.out.is_empty() {
            let _ = self.interface.write_fmt(format_args!("{}", self.out));
            self.out.clear();
        }
    }
}

impl Io for TermIo {
    fn next_char(&mut self) -> CharResult {
        if let Some(ch) = self.pending.pop_front() {
            return CharResult::Value(ch);
        }
        if self.eof {
            return CharResult::EndOfStream;
        }
        self.flush_output();
        if self.interface.set_prompt(self.prompt).is_err() {
            self.eof = true;
            return CharResult::EndOfStream;
        }
        match self.interface.read_line() {
            Ok(ReadResult::Input(line)) => {
                if !line.trim().is_empty() {
                    self.interface.add_history_unique(line.clone());
                }
                self.pending.extend(line.bytes());
                self.pending.push_back(b'\n');
                CharResult::Value(self.pending.pop_front().unwrap())
            }
            Ok(ReadResult::Signal(_)) => {
                self.interrupted.store(true, Ordering::SeqCst);
                CharResult::Waiting
            }
            Ok(ReadResult::Eof) | Err(_) => {
                self.eof = true;
                CharResult::EndOfStream
            }
        }
    }

    fn write_char(&mut self, ch: u8) {
        self.out.push(ch as char);
        if ch == b'\n' {
            self.flush_output();
        }
    }

    fn show_prompt(&mut self) {
        self.flush_output();
        self.prompt = "> ";
    }

    fn show_input_prompt(&mut self) {
        self.flush_output();
        self.prompt = "? ";
    }

    fn show_error(&mut self, message: &str) {
        self.flush_output();
        let _ = self
            .interface
            .write_fmt(format_args!("{}\n", Style::new().bold().paint(message)));
    }

    fn show_trace_line(&mut self, text: &str) {
        self.flush_output();
        let _ = self
            .interface
            .write_fmt(format_args!("{}\n", Style::new().dimmed().paint(text)));
    }

    fn read_program(&mut self, name: &str) -> io::Result<String> {
        if name.starts_with("http://") || name.starts_with("https://") {
            return fetch_url(name);
        }
        fs::read_to_string(name)
    }

    fn write_program(&mut self, name: &str, text: &str) -> io::Result<()> {
        fs::write(name, text)
    }

    fn list_files(&mut self) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(".")? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    fn bye(&mut self) {
        self.flush_output();
    }
}

fn fetch_url(url: &str) -> io::Result<String> {
    let response = reqwest::blocking::get(url)
        .map_err(|error| io::Error::new(io::ErrorKind::Other, error.to_string()))?;
    if !response.status().is_success() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} {}", response.status(), url),
        ));
    }
    response
        .text()
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error.to_string()))
}
