use super::ast::Statement;
use super::parse;
use super::Number;

/// One logical line of input, classified.
#[derive(Debug, PartialEq)]
pub enum Line {
    /// Nothing but spaces.
    Empty,
    /// A bare line number: delete that line from the program.
    Delete(Number),
    /// A numbered statement, to be stored.
    Numbered(Number, Statement),
    /// An unnumbered statement, to be executed immediately.
    Immediate(Statement),
}

impl Line {
    pub fn parse(input: &[u8]) -> Line {
        let pos = parse::Cursor::new(input);
        if pos.at_end() {
            return Line::Empty;
        }
        if let Some((number, next)) = parse::number(pos) {
            if next.at_end() {
                return Line::Delete(number);
            }
            return Line::Numbered(number, whole_statement(input, next));
        }
        Line::Immediate(whole_statement(input, pos))
    }
}

/// The statement must consume the rest of the line exactly, or the
/// whole line is an error.
fn whole_statement(input: &[u8], pos: parse::Cursor) -> Statement {
    match parse::statement(pos) {
        Some((statement, next)) if next.at_end() => statement,
        _ => {
            let text = String::from_utf8_lossy(input);
            Statement::Error(error!(SyntaxError; text.trim()).to_string())
        }
    }
}
