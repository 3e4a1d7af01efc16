/*!
## Machine module

The execution engine for BASIC: program storage, variable and array
memory, expression evaluation, and the cooperative state machine that
ties them to a host.
*/

mod eval;
mod io;
mod program;
mod reader;
mod runtime;
mod snapshot;
mod var;

pub use io::CharResult;
pub use io::Io;
pub use program::Program;
pub use reader::LineReader;
pub use reader::LineResult;
pub use runtime::Runtime;
pub use runtime::State;
pub use runtime::Step;
pub use snapshot::Snapshot;
pub use var::Array;
pub use var::Env;
pub use var::Vars;
pub use var::DEFAULT_ARRAY_SIZE;
