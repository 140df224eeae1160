//! Interactive front end: answers decisions on the terminal and reports
//! the outcome of a command with cliclack.

mod prompts;

pub use prompts::{run, TerminalPrompts};
