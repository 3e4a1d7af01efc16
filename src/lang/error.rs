use super::Number;

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    line_number: Option<Number>,
    message: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident($($arg:expr),+)) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err($($arg),+))
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident($($arg:expr),+); $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err($($arg),+)).message($msg)
    };
    ($err:ident, $line:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_line_number($line)
    };
    ($err:ident($($arg:expr),+), $line:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err($($arg),+)).in_line_number($line)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            line_number: None,
            message: String::new(),
        }
    }

    pub fn code(&self) -> &ErrorCode {
        &self.code
    }

    pub fn line_number(&self) -> Option<Number> {
        self.line_number
    }

    pub fn in_line_number(mut self, line: Number) -> Error {
        debug_assert!(self.line_number.is_none());
        self.line_number = Some(line);
        self
    }

    pub fn message(mut self, message: &str) -> Error {
        debug_assert!(self.message.is_empty());
        self.message = message.to_string();
        self
    }
}

/// Everything that can go wrong while parsing or running a program.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorCode {
    SyntaxError,
    ReturnWithoutGosub,
    IllegalFunctionCall,
    UndefinedLine(Number),
    SubscriptOutOfRange,
    DivisionByZero,
    NoProgram,
    EndOfProgram,
    InputPastEnd,
    Break,
    FileNotFound,
    DiskIoError,
    ClipboardError,
    InternalError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use ErrorCode::*;
        match self {
            SyntaxError => write!(f, "SYNTAX ERROR"),
            ReturnWithoutGosub => write!(f, "RETURN WITHOUT GOSUB"),
            IllegalFunctionCall => write!(f, "ILLEGAL FUNCTION CALL"),
            UndefinedLine(n) => write!(f, "UNDEFINED LINE {}", n),
            SubscriptOutOfRange => write!(f, "SUBSCRIPT OUT OF RANGE"),
            DivisionByZero => write!(f, "DIVISION BY ZERO"),
            NoProgram => write!(f, "NO PROGRAM"),
            EndOfProgram => write!(f, "END OF PROGRAM WITHOUT END"),
            InputPastEnd => write!(f, "INPUT PAST END"),
            Break => write!(f, "BREAK"),
            FileNotFound => write!(f, "FILE NOT FOUND"),
            DiskIoError => write!(f, "DISK I/O ERROR"),
            ClipboardError => write!(f, "CLIPBOARD ERROR"),
            InternalError => write!(f, "INTERNAL ERROR"),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.code)?;
        if let Some(line) = self.line_number {
            write!(f, " IN {}", line)?;
        }
        if !self.message.is_empty() {
            write!(f, "; {}", self.message)?;
        }
        Ok(())
    }
}
