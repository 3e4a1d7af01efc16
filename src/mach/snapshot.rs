use super::runtime::State;
use crate::lang::Number;
use serde::{Deserialize, Serialize};

/// A host-persistable record of the whole machine.
///
/// Only non-zero variable and array entries are carried; the program
/// is carried as canonical text and re-parsed on restore, exactly as
/// LOAD re-parses a saved file. The encoding is the host's business;
/// the record only fixes the shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: State,
    pub vars: Vec<(char, Number)>,
    pub array_size: usize,
    pub array: Vec<(usize, Number)>,
    pub input_buffer: String,
    pub program: Vec<String>,
    pub pc: usize,
    pub input_lvalues: Vec<String>,
    pub trace: bool,
    pub end_of_input: bool,
    pub state_before_input: State,
}
