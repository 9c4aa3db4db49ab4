//! A minimal interactive command interpreter.
//!
//! Each input line is split on whitespace. If the first word names a builtin
//! (`echo`, `pwd`, `cd`, `type`) it runs in-process; otherwise the word is looked up in
//! the search path and the executable found there runs as a child process, which the
//! interpreter waits for before reading the next line.
//!
//! The main entry point is [`Interpreter`]. The [`repl`] module drives it from a line
//! editor or any buffered reader.

mod builtin;
pub mod command;
pub mod config;
pub mod env;
pub mod error;
pub mod external;
mod interpreter;
pub mod lexer;
pub mod registry;
pub mod repl;
pub mod resolver;
#[cfg(all(test, unix))]
mod testing;

pub use config::Config;
pub use error::ShellError;
/// Just a convenient re-export of the command dispatcher.
///
/// See [`Interpreter`] for the high-level API and examples.
pub use interpreter::{Interpreter, Outcome};
