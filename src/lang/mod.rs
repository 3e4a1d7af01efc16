/*!
# Language module

Recursive-descent parsing of BASIC lines into statement and expression
trees, plus the error type shared across the interpreter.
*/

#[macro_use]
mod error;
mod line;
mod parse;

pub mod ast;

pub use error::Error;
pub use error::ErrorCode;
pub use line::Line;
pub use parse::input_expressions;
pub use parse::lvalue_text;

/// The fixed-width signed integer behind every BASIC value: variables,
/// array cells, and line numbers alike. Arithmetic wraps on overflow.
pub type Number = isize;
