use super::Number;
use std::fmt;

/// One of the 26 variable names, held as its canonical uppercase letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarName(u8);

impl VarName {
    pub fn new(ch: u8) -> Option<VarName> {
        if ch.is_ascii_alphabetic() {
            Some(VarName(ch.to_ascii_uppercase()))
        } else {
            None
        }
    }

    /// Position in the variable bindings, `0..26`.
    pub fn index(self) -> usize {
        (self.0 - b'A') as usize
    }

    pub fn as_char(self) -> char {
        self.0 as char
    }
}

impl fmt::Display for VarName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// An assignable target: a variable or an array element.
#[derive(Debug, Clone, PartialEq)]
pub enum Lvalue {
    Var(VarName),
    Array(Box<Expression>),
}

impl fmt::Display for Lvalue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Lvalue::Var(name) => write!(f, "{}", name),
            Lvalue::Array(index) => write!(f, "@({})", index),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelOp {
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl fmt::Display for RelOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use RelOp::*;
        match self {
            Equal => write!(f, "="),
            NotEqual => write!(f, "<>"),
            Less => write!(f, "<"),
            LessEqual => write!(f, "<="),
            Greater => write!(f, ">"),
            GreaterEqual => write!(f, ">="),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Plus,
    Minus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOp {
    Add,
    Subtract,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MulOp {
    Multiply,
    Divide,
}

/// `expr := ("+"|"-")? term (("+"|"-") term)*`
///
/// A leading minus negates the first term only.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub sign: Option<Sign>,
    pub first: Term,
    pub rest: Vec<(AddOp, Term)>,
}

/// `term := factor (("*"|"/") factor)*`
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub first: Factor,
    pub rest: Vec<(MulOp, Factor)>,
}

/// `factor := number | "(" expr ")" | var | "@(" expr ")" | "RND(" expr ")"`
///
/// Recursive branches box their nested expression, so a factor stays
/// one word wide no matter how deep the tree goes.
#[derive(Debug, Clone, PartialEq)]
pub enum Factor {
    Literal(Number),
    Paren(Box<Expression>),
    Var(VarName),
    Array(Box<Expression>),
    Rnd(Box<Expression>),
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.sign {
            Some(Sign::Plus) => write!(f, "+")?,
            Some(Sign::Minus) => write!(f, "-")?,
            None => {}
        }
        write!(f, "{}", self.first)?;
        for (op, term) in &self.rest {
            match op {
                AddOp::Add => write!(f, "+{}", term)?,
                AddOp::Subtract => write!(f, "-{}", term)?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.first)?;
        for (op, factor) in &self.rest {
            match op {
                MulOp::Multiply => write!(f, "*{}", factor)?,
                MulOp::Divide => write!(f, "/{}", factor)?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            // A negative literal can only come from wraparound entry;
            // listing it as the unsigned twin makes the reparse wrap
            // back to the same value.
            Factor::Literal(n) => write!(f, "{}", *n as usize),
            Factor::Paren(e) => write!(f, "({})", e),
            Factor::Var(name) => write!(f, "{}", name),
            Factor::Array(e) => write!(f, "@({})", e),
            Factor::Rnd(e) => write!(f, "RND({})", e),
        }
    }
}

/// One entry of a PRINT list.
#[derive(Debug, Clone, PartialEq)]
pub enum PrintItem {
    Text(String),
    Expr(Expression),
}

impl fmt::Display for PrintItem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PrintItem::Text(text) => write!(f, "\"{}\"", text),
            PrintItem::Expr(e) => write!(f, "{}", e),
        }
    }
}

/// What PRINT emits after an item, decided by the separator that
/// followed it in the source: comma, semicolon, or end of list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintSep {
    Tab,
    Empty,
    Newline,
}

pub type PrintList = Vec<(PrintItem, PrintSep)>;

/// The line range a LIST statement asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum ListRange {
    All,
    Line(Expression),
    Range(Expression, Expression),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Print(PrintList),
    PrintNewline,
    Input(Vec<Lvalue>),
    Let(Lvalue, Expression),
    Dim(Expression),
    If(Expression, RelOp, Expression, Box<Statement>),
    Goto(Expression),
    Gosub(Expression),
    Return,
    List(ListRange),
    Save(String),
    Load(String),
    Files,
    ClipSave,
    ClipLoad,
    Run,
    End,
    Clear,
    Rem(String),
    Tron,
    Troff,
    Bye,
    Help,
    Error(String),
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Statement::*;
        match self {
            Print(items) => {
                write!(f, "PRINT ")?;
                for (item, sep) in items {
                    write!(f, "{}", item)?;
                    match sep {
                        PrintSep::Tab => write!(f, ",")?,
                        PrintSep::Empty => write!(f, ";")?,
                        PrintSep::Newline => {}
                    }
                }
                Ok(())
            }
            PrintNewline => write!(f, "PRINT"),
            Input(lvalues) => {
                write!(f, "INPUT ")?;
                for (i, lvalue) in lvalues.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", lvalue)?;
                }
                Ok(())
            }
            Let(lvalue, e) => write!(f, "LET {} = {}", lvalue, e),
            Dim(e) => write!(f, "DIM @({})", e),
            If(lhs, op, rhs, consequent) => {
                write!(f, "IF {} {} {} THEN {}", lhs, op, rhs, consequent)
            }
            Goto(e) => write!(f, "GOTO {}", e),
            Gosub(e) => write!(f, "GOSUB {}", e),
            Return => write!(f, "RETURN"),
            List(ListRange::All) => write!(f, "LIST"),
            List(ListRange::Line(e)) => write!(f, "LIST {}", e),
            List(ListRange::Range(low, high)) => write!(f, "LIST {}, {}", low, high),
            Save(name) => write!(f, "SAVE \"{}\"", name),
            Load(name) => write!(f, "LOAD \"{}\"", name),
            Files => write!(f, "FILES"),
            ClipSave => write!(f, "CLIPSAVE"),
            ClipLoad => write!(f, "CLIPLOAD"),
            Run => write!(f, "RUN"),
            End => write!(f, "END"),
            Clear => write!(f, "CLEAR"),
            Rem(text) => {
                if text.is_empty() {
                    write!(f, "REM")
                } else {
                    write!(f, "REM {}", text)
                }
            }
            Tron => write!(f, "TRON"),
            Troff => write!(f, "TROFF"),
            Bye => write!(f, "BYE"),
            Help => write!(f, "HELP"),
            Error(message) => write!(f, "{}", message),
        }
    }
}
