//! Command-line layer: argument parsing, command handlers and terminal
//! output. The library modules never print; everything user-facing lives
//! here.

mod args;
mod commands;
mod exit_status;
mod report;
mod run;

pub use args::{Arguments, Command, ExtractArgs};
pub use exit_status::ExitStatus;
pub use report::{FAILURE_MARK, SUCCESS_MARK};
pub use run::run_cli;
