use super::ast::*;
use super::Number;

/// Position in a line being parsed.
///
/// Copyable, so a failed alternative simply drops its cursor and the
/// caller retries from its own — nothing is ever consumed by failure.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Cursor<'a> {
    line: &'a [u8],
    index: usize,
}

/// A parsed node and the position after it, or a clean failure.
type Parsed<'a, T> = Option<(T, Cursor<'a>)>;

impl<'a> Cursor<'a> {
    pub fn new(line: &'a [u8]) -> Cursor<'a> {
        Cursor { line, index: 0 }
    }

    fn peek(self) -> Option<u8> {
        self.line.get(self.index).copied()
    }

    fn advance(mut self) -> Cursor<'a> {
        self.index += 1;
        self
    }

    fn after_spaces(mut self) -> Cursor<'a> {
        while self.peek() == Some(b' ') {
            self.index += 1;
        }
        self
    }

    /// True when only spaces remain.
    pub fn at_end(self) -> bool {
        self.after_spaces().index >= self.line.len()
    }

    fn end_of_line(mut self) -> Cursor<'a> {
        self.index = self.line.len();
        self
    }

    /// Remaining text, spaces trimmed at both ends.
    fn remainder(self) -> String {
        String::from_utf8_lossy(&self.line[self.index.min(self.line.len())..])
            .trim()
            .to_string()
    }
}

/// Match a keyword or operator. Case-insensitive, and spaces between
/// the characters are ignored, so `G O T O` matches `GOTO`.
fn literal<'a>(pos: Cursor<'a>, word: &str) -> Option<Cursor<'a>> {
    let mut pos = pos;
    for expected in word.bytes() {
        pos = pos.after_spaces();
        match pos.peek() {
            Some(ch) if ch.to_ascii_uppercase() == expected => pos = pos.advance(),
            _ => return None,
        }
    }
    Some(pos)
}

/// An unsigned number: a digit sequence, embedded spaces ignored, the
/// value built with wraparound arithmetic.
pub(crate) fn number(pos: Cursor) -> Parsed<Number> {
    let mut pos = pos.after_spaces();
    match pos.peek() {
        Some(ch) if ch.is_ascii_digit() => {}
        _ => return None,
    }
    let mut value: Number = 0;
    while let Some(ch) = pos.peek() {
        if !ch.is_ascii_digit() {
            break;
        }
        value = value.wrapping_mul(10).wrapping_add((ch - b'0') as Number);
        pos = pos.advance();
        let ahead = pos.after_spaces();
        if ahead.peek().map_or(false, |c| c.is_ascii_digit()) {
            pos = ahead;
        }
    }
    Some((value, pos))
}

fn variable(pos: Cursor) -> Parsed<VarName> {
    let pos = pos.after_spaces();
    match pos.peek().and_then(VarName::new) {
        Some(name) => Some((name, pos.advance())),
        None => None,
    }
}

/// A double-quoted string literal. Spaces inside are significant; the
/// closing quote is required.
fn string_literal(pos: Cursor) -> Parsed<String> {
    let mut pos = pos.after_spaces();
    if pos.peek() != Some(b'"') {
        return None;
    }
    pos = pos.advance();
    let mut text = String::new();
    loop {
        match pos.peek() {
            Some(b'"') => return Some((text, pos.advance())),
            Some(ch) => {
                text.push(ch as char);
                pos = pos.advance();
            }
            None => return None,
        }
    }
}

fn factor(pos: Cursor) -> Parsed<Factor> {
    if let Some((value, next)) = number(pos) {
        return Some((Factor::Literal(value), next));
    }
    if let Some(next) = literal(pos, "(") {
        let (e, next) = expression(next)?;
        let next = literal(next, ")")?;
        return Some((Factor::Paren(Box::new(e)), next));
    }
    if let Some(next) = literal(pos, "@(") {
        let (e, next) = expression(next)?;
        let next = literal(next, ")")?;
        return Some((Factor::Array(Box::new(e)), next));
    }
    if let Some(next) = literal(pos, "RND(") {
        let (e, next) = expression(next)?;
        let next = literal(next, ")")?;
        return Some((Factor::Rnd(Box::new(e)), next));
    }
    let (name, next) = variable(pos)?;
    Some((Factor::Var(name), next))
}

fn term(pos: Cursor) -> Parsed<Term> {
    let (first, mut pos) = factor(pos)?;
    let mut rest = Vec::new();
    loop {
        let (op, next) = if let Some(next) = literal(pos, "*") {
            (MulOp::Multiply, next)
        } else if let Some(next) = literal(pos, "/") {
            (MulOp::Divide, next)
        } else {
            break;
        };
        match factor(next) {
            Some((f, next)) => {
                rest.push((op, f));
                pos = next;
            }
            // Not a factor after the operator; leave the operator
            // unconsumed and let the caller decide.
            None => break,
        }
    }
    Some((Term { first, rest }, pos))
}

pub(crate) fn expression(pos: Cursor) -> Parsed<Expression> {
    let (sign, pos) = if let Some(next) = literal(pos, "+") {
        (Some(Sign::Plus), next)
    } else if let Some(next) = literal(pos, "-") {
        (Some(Sign::Minus), next)
    } else {
        (None, pos)
    };
    let (first, mut pos) = term(pos)?;
    let mut rest = Vec::new();
    loop {
        let (op, next) = if let Some(next) = literal(pos, "+") {
            (AddOp::Add, next)
        } else if let Some(next) = literal(pos, "-") {
            (AddOp::Subtract, next)
        } else {
            break;
        };
        match term(next) {
            Some((t, next)) => {
                rest.push((op, t));
                pos = next;
            }
            None => break,
        }
    }
    Some((Expression { sign, first, rest }, pos))
}

/// Two-character forms are tried before their one-character prefixes.
fn relop(pos: Cursor) -> Parsed<RelOp> {
    const FORMS: [(&str, RelOp); 7] = [
        ("<=", RelOp::LessEqual),
        ("<>", RelOp::NotEqual),
        (">=", RelOp::GreaterEqual),
        ("><", RelOp::NotEqual),
        ("<", RelOp::Less),
        (">", RelOp::Greater),
        ("=", RelOp::Equal),
    ];
    for (text, op) in &FORMS {
        if let Some(next) = literal(pos, text) {
            return Some((*op, next));
        }
    }
    None
}

pub(crate) fn lvalue(pos: Cursor) -> Parsed<Lvalue> {
    if let Some(next) = literal(pos, "@(") {
        let (e, next) = expression(next)?;
        let next = literal(next, ")")?;
        return Some((Lvalue::Array(Box::new(e)), next));
    }
    let (name, next) = variable(pos)?;
    Some((Lvalue::Var(name), next))
}

fn print_item(pos: Cursor) -> Parsed<PrintItem> {
    if let Some((text, next)) = string_literal(pos) {
        return Some((PrintItem::Text(text), next));
    }
    let (e, next) = expression(pos)?;
    Some((PrintItem::Expr(e), next))
}

/// Each item's terminator comes from the separator that follows it:
/// comma prints a tab, semicolon prints nothing, and the end of the
/// list prints a newline.
fn print_list(pos: Cursor) -> Parsed<PrintList> {
    let (mut item, mut pos) = print_item(pos)?;
    let mut items = Vec::new();
    loop {
        let (sep, next) = if let Some(next) = literal(pos, ",") {
            (PrintSep::Tab, next)
        } else if let Some(next) = literal(pos, ";") {
            (PrintSep::Empty, next)
        } else {
            items.push((item, PrintSep::Newline));
            return Some((items, pos));
        };
        items.push((item, sep));
        if next.at_end() {
            return Some((items, next));
        }
        let (following, next) = print_item(next)?;
        item = following;
        pos = next;
    }
}

pub(crate) fn statement(pos: Cursor) -> Parsed<Statement> {
    if let Some(next) = literal(pos, "PRINT") {
        if next.at_end() {
            return Some((Statement::PrintNewline, next));
        }
        let (items, next) = print_list(next)?;
        return Some((Statement::Print(items), next));
    }
    if let Some(next) = literal(pos, "LET") {
        let (target, next) = lvalue(next)?;
        let next = literal(next, "=")?;
        let (e, next) = expression(next)?;
        return Some((Statement::Let(target, e), next));
    }
    if let Some(next) = literal(pos, "INPUT") {
        let (first, mut next) = lvalue(next)?;
        let mut targets = vec![first];
        while let Some(after_comma) = literal(next, ",") {
            let (target, after) = lvalue(after_comma)?;
            targets.push(target);
            next = after;
        }
        return Some((Statement::Input(targets), next));
    }
    if let Some(next) = literal(pos, "IF") {
        let (lhs, next) = expression(next)?;
        let (op, next) = relop(next)?;
        let (rhs, next) = expression(next)?;
        let next = literal(next, "THEN")?;
        let (consequent, next) = statement(next)?;
        return Some((Statement::If(lhs, op, rhs, Box::new(consequent)), next));
    }
    if let Some(next) = literal(pos, "GOSUB") {
        let (e, next) = expression(next)?;
        return Some((Statement::Gosub(e), next));
    }
    if let Some(next) = literal(pos, "GOTO") {
        let (e, next) = expression(next)?;
        return Some((Statement::Goto(e), next));
    }
    if let Some(next) = literal(pos, "RETURN") {
        return Some((Statement::Return, next));
    }
    if let Some(next) = literal(pos, "DIM") {
        let next = literal(next, "@(")?;
        let (e, next) = expression(next)?;
        let next = literal(next, ")")?;
        return Some((Statement::Dim(e), next));
    }
    if let Some(next) = literal(pos, "LIST") {
        if next.at_end() {
            return Some((Statement::List(ListRange::All), next));
        }
        let (low, next) = expression(next)?;
        if let Some(after_comma) = literal(next, ",") {
            let (high, next) = expression(after_comma)?;
            return Some((Statement::List(ListRange::Range(low, high)), next));
        }
        return Some((Statement::List(ListRange::Line(low)), next));
    }
    if let Some(next) = literal(pos, "SAVE") {
        let (name, next) = string_literal(next)?;
        return Some((Statement::Save(name), next));
    }
    if let Some(next) = literal(pos, "LOAD") {
        let (name, next) = string_literal(next)?;
        return Some((Statement::Load(name), next));
    }
    if let Some(next) = literal(pos, "FILES") {
        return Some((Statement::Files, next));
    }
    if let Some(next) = literal(pos, "CLIPSAVE") {
        return Some((Statement::ClipSave, next));
    }
    if let Some(next) = literal(pos, "CLIPLOAD") {
        return Some((Statement::ClipLoad, next));
    }
    if let Some(next) = literal(pos, "RUN") {
        return Some((Statement::Run, next));
    }
    if let Some(next) = literal(pos, "END") {
        return Some((Statement::End, next));
    }
    if let Some(next) = literal(pos, "CLEAR") {
        return Some((Statement::Clear, next));
    }
    if let Some(next) = literal(pos, "REM") {
        let text = next.remainder();
        let end = next.end_of_line();
        return Some((Statement::Rem(text), end));
    }
    if let Some(next) = literal(pos, "TRON") {
        return Some((Statement::Tron, next));
    }
    if let Some(next) = literal(pos, "TROFF") {
        return Some((Statement::Troff, next));
    }
    if let Some(next) = literal(pos, "BYE") {
        return Some((Statement::Bye, next));
    }
    if let Some(next) = literal(pos, "HELP") {
        return Some((Statement::Help, next));
    }
    None
}

/// Parse the user's response to INPUT: `count` comma-separated
/// expressions. Text after the last value is ignored.
pub fn input_expressions(line: &[u8], count: usize) -> Option<Vec<Expression>> {
    let mut pos = Cursor::new(line);
    let mut values = Vec::with_capacity(count);
    for i in 0..count {
        if i > 0 {
            pos = literal(pos, ",")?;
        }
        let (value, next) = expression(pos)?;
        values.push(value);
        pos = next;
    }
    Some(values)
}

/// Parse a canonical lvalue rendering, as found in a snapshot.
pub fn lvalue_text(text: &[u8]) -> Option<Lvalue> {
    let (value, next) = lvalue(Cursor::new(text))?;
    if next.at_end() {
        Some(value)
    } else {
        None
    }
}
