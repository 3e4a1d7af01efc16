//! # Tiny BASIC
//!
//! An interactive interpreter for the classic Tiny BASIC language:
//! 26 integer variables, one array addressed as `@(i)`, line-numbered
//! programs with `GOTO`/`GOSUB`, and immediate statements.
//!
//! Begin by opening a terminal and running the executable.
//! ```text
//! TINY BASIC
//! >
//! ```
//!
//! The interpreter core never blocks. It is driven one step at a time
//! and suspends whenever its character source has nothing to offer, so
//! the same engine serves a terminal, file playback, and hosts that
//! deliver keystrokes incrementally.

pub mod lang;
pub mod mach;
pub mod term;
