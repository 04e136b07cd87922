//! Utilities (external command execution, text filtering).

pub mod command;
pub mod filter;

pub use command::{run_command, CommandResult, CommandSpec, ProcessRunner, Runner};
pub use filter::{grep_context, lines_containing};
