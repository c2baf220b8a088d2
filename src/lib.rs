//! Resolve declared arguments against a task's effective options and
//! derive the flag tokens passed to an external process.
//!
//! ```text
//! ArgConfig → Arg → default options → OptionProvider → resolved Arg → flags
//! ```

pub mod args;
pub mod cli;
pub mod config;
pub mod logging;
