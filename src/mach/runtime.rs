use super::io::Io;
use super::program::Program;
use super::reader::{LineReader, LineResult};
use super::snapshot::Snapshot;
use super::var::Env;
use crate::error;
use crate::lang::ast::*;
use crate::lang::{self, Error, Line, Number};
use serde::{Deserialize, Serialize};

type Result<T> = std::result::Result<T, Error>;

/// What a single `step` accomplished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The engine did some work; call `step` again.
    Ran,
    /// The character source had nothing; call `step` again once more
    /// input might be available.
    Waiting,
    /// The session is over: the source is exhausted or BYE ran.
    EndOfInput,
}

/// Interpreter state between steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum State {
    /// About to show the command prompt.
    Idle,
    /// Reading a statement or command line.
    ReadingStatement,
    /// Executing the stored program.
    Running,
    /// Collecting values for an INPUT statement.
    ReadingInput,
}

enum InputAttempt {
    Committed,
    Malformed,
    Aborted,
}

/// The execution engine.
///
/// Owns the program, the bindings, the array, and the return stack,
/// and advances them one cooperative step at a time. Every piece of
/// resume state lives in a field here, never on the call stack, so
/// the host can stop driving at any `Waiting` and pick up later.
pub struct Runtime<IO> {
    io: IO,
    reader: LineReader,
    program: Program,
    env: Env,
    return_stack: Vec<usize>,
    pc: usize,
    state: State,
    trace: bool,
    end_of_input: bool,
    input_lvalues: Vec<Lvalue>,
    state_before_input: State,
}

impl<IO: Io> Runtime<IO> {
    pub fn new(io: IO) -> Runtime<IO> {
        Runtime {
            io,
            reader: LineReader::default(),
            program: Program::default(),
            env: Env::default(),
            return_stack: Vec::new(),
            pc: 0,
            state: State::Idle,
            trace: false,
            end_of_input: false,
            input_lvalues: Vec::new(),
            state_before_input: State::Idle,
        }
    }

    pub fn io(&self) -> &IO {
        &self.io
    }

    pub fn io_mut(&mut self) -> &mut IO {
        &mut self.io
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Perform one unit of work and report how it went. Never blocks
    /// beyond what the character source itself does.
    pub fn step(&mut self) -> Step {
        if self.end_of_input {
            return Step::EndOfInput;
        }
        match self.state {
            State::Idle => {
                self.io.show_prompt();
                self.state = State::ReadingStatement;
                Step::Ran
            }
            State::ReadingStatement => match self.reader.next_line(&mut self.io) {
                LineResult::Line(line) => {
                    // Back to Idle first; the statement may move us to
                    // Running or ReadingInput instead.
                    self.state = State::Idle;
                    self.process_line(&line);
                    Step::Ran
                }
                LineResult::EndOfStream => {
                    self.end_of_input = true;
                    Step::EndOfInput
                }
                LineResult::Waiting => Step::Waiting,
            },
            State::Running => {
                self.execute_next_statement();
                Step::Ran
            }
            State::ReadingInput => self.continue_input(),
        }
    }

    /// Drive the engine until its character source is exhausted.
    ///
    /// Only for sources that never answer `Waiting`, such as file or
    /// string playback; an interactive host should call `step` itself.
    pub fn run_until_end_of_input(&mut self) {
        while self.step() != Step::EndOfInput {}
    }

    /// Host-triggered break: stop a running program or a pending
    /// INPUT, report the interrupted line, and go Idle.
    pub fn break_execution(&mut self) {
        match self.state {
            State::Running | State::ReadingInput => {
                let error = match self.interrupted_line_number() {
                    Some(number) => error!(Break, number),
                    None => error!(Break),
                };
                self.io.show_error(&error.to_string());
                self.input_lvalues.clear();
                self.state = State::Idle;
            }
            State::Idle | State::ReadingStatement => {}
        }
    }

    fn interrupted_line_number(&self) -> Option<Number> {
        if !self.in_stored_program() || self.pc == 0 {
            return None;
        }
        let (number, _) = self
            .program
            .get(self.pc - 1)
            .expect("break: program counter points outside the program");
        Some(*number)
    }

    fn in_stored_program(&self) -> bool {
        match self.state {
            State::Running => true,
            State::ReadingInput => self.state_before_input == State::Running,
            State::Idle | State::ReadingStatement => false,
        }
    }

    /// Parse one logical line and store, delete, execute, or report.
    fn process_line(&mut self, input: &[u8]) {
        match Line::parse(input) {
            Line::Empty => {}
            Line::Delete(number) => self.program.delete(number),
            Line::Numbered(_, Statement::Error(message))
            | Line::Immediate(Statement::Error(message)) => {
                // Never stored, only reported.
                self.io.show_error(&message);
            }
            Line::Numbered(number, statement) => self.program.insert(number, statement),
            Line::Immediate(statement) => self.execute(&statement),
        }
    }

    fn execute_next_statement(&mut self) {
        let (number, statement) = match self.program.get(self.pc) {
            Some((number, statement)) => (*number, statement.clone()),
            None => {
                self.abort_run(error!(EndOfProgram));
                return;
            }
        };
        // Advance before dispatch so a GOTO or GOSUB issued by this
        // statement is not overwritten.
        self.pc += 1;
        if self.trace {
            self.io.show_trace_line(&format!("[{}]", number));
        }
        self.execute(&statement);
    }

    fn execute(&mut self, statement: &Statement) {
        use Statement::*;
        let result = match statement {
            Print(items) => self.print(items),
            PrintNewline => {
                self.io.write_char(b'\n');
                Ok(())
            }
            Input(lvalues) => {
                self.begin_input(lvalues);
                Ok(())
            }
            Let(lvalue, e) => self.assign(lvalue, e),
            Dim(e) => self.dim(e),
            If(lhs, op, rhs, consequent) => self.if_then(lhs, *op, rhs, consequent),
            Goto(target) => self.goto(target),
            Gosub(target) => self.gosub(target),
            Return => self.do_return(),
            List(range) => self.list(range),
            Save(name) => self.save(name),
            Load(name) => self.load(name),
            Files => self.files(),
            ClipSave => self.clip_save(),
            ClipLoad => self.clip_load(),
            Run => self.run(),
            End => {
                self.state = State::Idle;
                Ok(())
            }
            Clear => {
                self.clear();
                Ok(())
            }
            Rem(_) => Ok(()),
            Tron => {
                self.trace = true;
                Ok(())
            }
            Troff => {
                self.trace = false;
                Ok(())
            }
            Bye => {
                self.io.bye();
                self.end_of_input = true;
                self.state = State::Idle;
                Ok(())
            }
            Help => {
                self.help();
                Ok(())
            }
            Error(message) => panic!("parse error dispatched as a statement: {}", message),
        };
        if let Err(error) = result {
            self.abort_run(error);
        }
    }

    /// The single abort path for run-time errors: report, note the
    /// termination if a program was running, go Idle. Mutations made
    /// before the abort stand.
    fn abort_run(&mut self, error: Error) {
        let error = match (error.line_number(), self.current_line_number()) {
            (None, Some(number)) => error.in_line_number(number),
            _ => error,
        };
        self.io.show_error(&error.to_string());
        if matches!(self.state, State::Running | State::ReadingInput) {
            self.io.show_error("PROGRAM TERMINATED");
        }
        self.input_lvalues.clear();
        self.state = State::Idle;
    }

    fn current_line_number(&self) -> Option<Number> {
        if !self.in_stored_program() {
            return None;
        }
        let index = self.pc.checked_sub(1)?;
        self.program.get(index).map(|(number, _)| *number)
    }

    fn print(&mut self, items: &[(PrintItem, PrintSep)]) -> Result<()> {
        for (item, sep) in items {
            match item {
                PrintItem::Text(text) => self.write_str(text),
                PrintItem::Expr(e) => {
                    let value = e.evaluate(&mut self.env)?;
                    self.write_str(&value.to_string());
                }
            }
            match sep {
                PrintSep::Tab => self.io.write_char(b'\t'),
                PrintSep::Empty => {}
                PrintSep::Newline => self.io.write_char(b'\n'),
            }
        }
        Ok(())
    }

    fn write_str(&mut self, text: &str) {
        for ch in text.bytes() {
            self.io.write_char(ch);
        }
    }

    fn assign(&mut self, lvalue: &Lvalue, e: &Expression) -> Result<()> {
        let value = e.evaluate(&mut self.env)?;
        self.store(lvalue, value)
    }

    fn store(&mut self, lvalue: &Lvalue, value: Number) -> Result<()> {
        match lvalue {
            Lvalue::Var(name) => {
                self.env.vars.store(*name, value);
                Ok(())
            }
            Lvalue::Array(index) => {
                let index = index.evaluate(&mut self.env)?;
                self.env.array.set(index, value)
            }
        }
    }

    fn dim(&mut self, e: &Expression) -> Result<()> {
        let size = e.evaluate(&mut self.env)?;
        self.env.array.dim(size)
    }

    fn if_then(
        &mut self,
        lhs: &Expression,
        op: RelOp,
        rhs: &Expression,
        consequent: &Statement,
    ) -> Result<()> {
        let lhs = lhs.evaluate(&mut self.env)?;
        let rhs = rhs.evaluate(&mut self.env)?;
        if op.holds(lhs, rhs) {
            self.execute(consequent);
        }
        Ok(())
    }

    fn goto(&mut self, target: &Expression) -> Result<()> {
        self.pc = self.resolve(target)?;
        self.state = State::Running;
        Ok(())
    }

    fn gosub(&mut self, target: &Expression) -> Result<()> {
        let index = self.resolve(target)?;
        // The counter was already advanced past the call site.
        self.return_stack.push(self.pc);
        self.pc = index;
        self.state = State::Running;
        Ok(())
    }

    fn resolve(&mut self, target: &Expression) -> Result<usize> {
        let number = target.evaluate(&mut self.env)?;
        self.program
            .index_of(number)
            .ok_or_else(|| error!(UndefinedLine(number)))
    }

    fn do_return(&mut self) -> Result<()> {
        match self.return_stack.pop() {
            Some(index) => {
                self.pc = index;
                Ok(())
            }
            None => Err(error!(ReturnWithoutGosub)),
        }
    }

    fn run(&mut self) -> Result<()> {
        if self.program.is_empty() {
            return Err(error!(NoProgram));
        }
        self.pc = 0;
        self.env.reset();
        self.return_stack.clear();
        self.state = State::Running;
        Ok(())
    }

    fn clear(&mut self) {
        self.program.clear();
        self.pc = 0;
        self.return_stack.clear();
        self.env.reset();
        self.state = State::Idle;
    }

    fn list(&mut self, range: &ListRange) -> Result<()> {
        let (from, to) = match range {
            ListRange::All => (Number::MIN, Number::MAX),
            ListRange::Line(e) => {
                let number = e.evaluate(&mut self.env)?;
                (number, number)
            }
            ListRange::Range(low, high) => {
                (low.evaluate(&mut self.env)?, high.evaluate(&mut self.env)?)
            }
        };
        for line in self.program.render(from, to) {
            self.write_str(&line);
            self.io.write_char(b'\n');
        }
        Ok(())
    }

    fn save(&mut self, name: &str) -> Result<()> {
        let text = self.program.text();
        self.io
            .write_program(name, &text)
            .map_err(|error| error!(DiskIoError; &error.to_string()))
    }

    fn load(&mut self, name: &str) -> Result<()> {
        let text = self.io.read_program(name).map_err(|error| {
            match error.kind() {
                std::io::ErrorKind::NotFound => error!(FileNotFound; name),
                _ => error!(DiskIoError; &error.to_string()),
            }
        })?;
        self.accept_text(&text);
        Ok(())
    }

    /// Re-inject saved text through the regular line-processing path,
    /// one line at a time. SAVE output is therefore always a valid
    /// reload script.
    fn accept_text(&mut self, text: &str) {
        for line in text.lines() {
            self.process_line(line.as_bytes());
        }
    }

    fn files(&mut self) -> Result<()> {
        let names = self
            .io
            .list_files()
            .map_err(|error| error!(DiskIoError; &error.to_string()))?;
        for name in names {
            self.write_str(&name);
            self.io.write_char(b'\n');
        }
        Ok(())
    }

    fn clip_save(&mut self) -> Result<()> {
        let text = self.program.text();
        self.io
            .set_clipboard_text(&text)
            .map_err(|error| error!(ClipboardError; &error.to_string()))
    }

    fn clip_load(&mut self) -> Result<()> {
        match self.io.clipboard_text() {
            Some(text) => {
                self.accept_text(&text);
                Ok(())
            }
            None => Err(error!(ClipboardError; "NO TEXT ON THE CLIPBOARD")),
        }
    }

    fn help(&mut self) {
        for line in HELP_TEXT.lines() {
            self.write_str(line);
            self.io.write_char(b'\n');
        }
    }

    /// Remember the targets and where to resume, then try to collect
    /// values right away.
    fn begin_input(&mut self, lvalues: &[Lvalue]) {
        self.input_lvalues = lvalues.to_vec();
        self.state_before_input = self.state;
        self.state = State::ReadingInput;
        self.io.show_input_prompt();
        self.continue_input();
    }

    /// Collect INPUT values, looping past malformed lines. A Waiting
    /// source suspends us here with nothing committed; the next step
    /// resumes exactly where we left off.
    fn continue_input(&mut self) -> Step {
        loop {
            match self.reader.next_line(&mut self.io) {
                LineResult::Waiting => return Step::Waiting,
                LineResult::EndOfStream => {
                    self.end_of_input = true;
                    self.abort_run(error!(InputPastEnd));
                    return Step::Ran;
                }
                LineResult::Line(line) => match self.try_input_line(&line) {
                    InputAttempt::Committed => {
                        self.state = match self.state_before_input {
                            State::Running => State::Running,
                            _ => State::Idle,
                        };
                        self.input_lvalues.clear();
                        return Step::Ran;
                    }
                    InputAttempt::Aborted => return Step::Ran,
                    InputAttempt::Malformed => {
                        let message = format!(
                            "PLEASE ENTER {} COMMA-SEPARATED VALUES",
                            self.input_lvalues.len()
                        );
                        self.io.show_error(&message);
                        self.io.show_input_prompt();
                    }
                },
            }
        }
    }

    /// One attempt at an input line. Nothing is committed unless the
    /// whole set of values parses and evaluates.
    fn try_input_line(&mut self, line: &[u8]) -> InputAttempt {
        let expressions = match lang::input_expressions(line, self.input_lvalues.len()) {
            Some(expressions) => expressions,
            None => return InputAttempt::Malformed,
        };
        let mut values = Vec::with_capacity(expressions.len());
        for e in &expressions {
            match e.evaluate(&mut self.env) {
                Ok(value) => values.push(value),
                Err(_) => return InputAttempt::Malformed,
            }
        }
        let lvalues = self.input_lvalues.clone();
        for (lvalue, value) in lvalues.iter().zip(values) {
            if let Err(error) = self.store(lvalue, value) {
                self.abort_run(error);
                return InputAttempt::Aborted;
            }
        }
        InputAttempt::Committed
    }

    /// Capture the whole machine as a host-persistable record.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state,
            vars: self
                .env
                .vars
                .entries()
                .filter(|(_, value)| *value != 0)
                .map(|(name, value)| (name.as_char(), value))
                .collect(),
            array_size: self.env.array.len(),
            array: self
                .env
                .array
                .entries()
                .filter(|(_, value)| *value != 0)
                .collect(),
            input_buffer: String::from_utf8_lossy(self.reader.pending()).into_owned(),
            program: self.program.render(Number::MIN, Number::MAX),
            pc: self.pc,
            input_lvalues: self
                .input_lvalues
                .iter()
                .map(|lvalue| lvalue.to_string())
                .collect(),
            trace: self.trace,
            end_of_input: self.end_of_input,
            state_before_input: self.state_before_input,
        }
    }

    /// Rebuild the machine from a snapshot. The program text goes
    /// through the same line-processing path as LOAD.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<()> {
        self.clear();
        for line in &snapshot.program {
            self.process_line(line.as_bytes());
        }
        self.env.array.dim(snapshot.array_size as Number)?;
        for &(index, value) in &snapshot.array {
            self.env.array.set(index as Number, value)?;
        }
        for &(name, value) in &snapshot.vars {
            let name = VarName::new(name as u8)
                .ok_or_else(|| error!(InternalError; "BAD SNAPSHOT VARIABLE"))?;
            self.env.vars.store(name, value);
        }
        self.input_lvalues = snapshot
            .input_lvalues
            .iter()
            .map(|text| {
                lang::lvalue_text(text.as_bytes())
                    .ok_or_else(|| error!(InternalError; "BAD SNAPSHOT LVALUE"))
            })
            .collect::<Result<_>>()?;
        self.reader.set_pending(snapshot.input_buffer.as_bytes());
        self.pc = snapshot.pc;
        self.trace = snapshot.trace;
        self.end_of_input = snapshot.end_of_input;
        self.state_before_input = snapshot.state_before_input;
        self.state = snapshot.state;
        Ok(())
    }
}

const HELP_TEXT: &str = "\
statements:
  PRINT expr-list          print values; , tabs and ; abuts
  INPUT var-list           read comma-separated values
  LET var = expr           assign; var is A..Z or @(i)
  IF expr relop expr THEN statement
  GOTO expr                GOSUB expr               RETURN
  DIM @(size)              size the array, zero-filled
  LIST [from[, to]]        RUN     END     CLEAR    REM text
  SAVE \"name\"              LOAD \"name\"              FILES
  CLIPSAVE                 CLIPLOAD
  TRON / TROFF             trace on / off
  BYE                      HELP";
