use crate::builtin::register_builtins;
use crate::command::{Context, ExitCode};
use crate::config::Config;
use crate::env::Environment;
use crate::error::{Result, ShellError};
use crate::external;
use crate::lexer::CommandLine;
use crate::registry::BuiltinRegistry;
use crate::resolver::PathResolver;
use std::io::Write;

/// Factory turning a builtin type into a registry handler.
///
/// Only supports commands defined in this crate, see [`crate::builtin`].
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// What became of one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Blank line, nothing ran.
    Empty,
    /// A builtin handled the line.
    Builtin,
    /// An external command ran to completion with this status.
    Finished(ExitCode),
    /// No builtin and no executable matched.
    NotFound,
    /// The child process could not be created.
    SpawnFailed,
    /// The interpreter hit an I/O error of its own before the command could run.
    Failed,
    /// The line asked the interpreter to stop, with this status.
    Exit(ExitCode),
}

impl Outcome {
    /// Status a shell would store in `$?` after this line.
    pub fn status(self) -> Option<ExitCode> {
        match self {
            Outcome::Empty => None,
            Outcome::Builtin => Some(0),
            Outcome::Finished(code) | Outcome::Exit(code) => Some(code),
            Outcome::NotFound => Some(127),
            Outcome::SpawnFailed | Outcome::Failed => Some(1),
        }
    }
}

/// A minimal shell-like interpreter that dispatches lines to builtins or executables.
///
/// Builtins are looked up first in a [`BuiltinRegistry`]; any other name is resolved
/// with a [`PathResolver`] and run as a child process, which the interpreter waits for
/// before returning.
///
/// Example
/// ```
/// use tinyshell::{Config, Interpreter, Outcome};
/// let mut sh = Interpreter::new(&Config::default()).unwrap();
/// let mut out = Vec::new();
/// let outcome = sh.dispatch("echo hello world", &mut out, &mut std::io::sink());
/// assert_eq!(outcome, Outcome::Builtin);
/// assert_eq!(out, b"hello world\n");
/// ```
pub struct Interpreter {
    env: Environment,
    builtins: BuiltinRegistry,
    resolver: PathResolver,
}

impl Interpreter {
    /// Create an interpreter with the default builtins: `echo`, `pwd`, `cd`, `type`.
    pub fn new(config: &Config) -> Result<Self> {
        let mut builtins = BuiltinRegistry::new();
        register_builtins(&mut builtins)?;
        Ok(Self::with_builtins(config, builtins))
    }

    /// Create an interpreter around a custom registry.
    pub fn with_builtins(config: &Config, builtins: BuiltinRegistry) -> Self {
        Self {
            env: Environment::new(config),
            builtins,
            resolver: PathResolver::new(config.search_path.clone()),
        }
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    pub fn builtins(&self) -> &BuiltinRegistry {
        &self.builtins
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Handle one input line.
    ///
    /// Builtins receive the line untouched. External commands inherit the process's
    /// standard streams; `stdout` and `stderr` here only carry builtin output and the
    /// interpreter's own messages.
    pub fn dispatch(
        &mut self,
        line: &str,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Outcome {
        let Some(cmd) = CommandLine::parse(line) else {
            return Outcome::Empty;
        };
        if let Some(code) = exit_request(&cmd) {
            log::debug!("exit requested with status {code}");
            return Outcome::Exit(code);
        }

        if let Some(handler) = self.builtins.lookup(&cmd.name) {
            log::debug!("`{}` is a builtin", cmd.name);
            let mut ctx = Context {
                env: &mut self.env,
                builtins: &self.builtins,
                resolver: &self.resolver,
                stdout,
                stderr,
            };
            handler.invoke(line, &mut ctx);
            return Outcome::Builtin;
        }

        match self.run_external(&cmd) {
            Ok(code) => Outcome::Finished(code),
            Err(e) => report(e, stdout, stderr),
        }
    }

    fn run_external(&self, cmd: &CommandLine) -> Result<ExitCode> {
        let program = self
            .resolver
            .resolve(&cmd.name)
            .ok_or_else(|| ShellError::NotFound(cmd.name.clone()))?;
        log::debug!("`{}` resolved to {}", cmd.name, program.display());
        // Flush our own output first so it is not interleaved with the child's.
        std::io::stdout().flush()?;
        external::execute(&program, &cmd.argv(), &self.env)
    }
}

/// Print a failed external launch and say what became of the line.
fn report(err: ShellError, stdout: &mut dyn Write, stderr: &mut dyn Write) -> Outcome {
    match err {
        ShellError::NotFound(_) => {
            let _ = writeln!(stdout, "{err}");
            Outcome::NotFound
        }
        ShellError::Exec { .. } => {
            let _ = writeln!(stderr, "{err}");
            Outcome::Finished(err.exit_code())
        }
        ShellError::Spawn(_) => {
            let _ = writeln!(stderr, "{err}");
            Outcome::SpawnFailed
        }
        _ => {
            log::error!("dispatch failed: {err}");
            let _ = writeln!(stderr, "{err}");
            Outcome::Failed
        }
    }
}

/// `exit` on its own, or `exit <n>` with an integer status.
fn exit_request(cmd: &CommandLine) -> Option<ExitCode> {
    match (cmd.name.as_str(), cmd.args.as_slice()) {
        ("exit", []) => Some(0),
        ("exit", [code]) => code.parse().ok(),
        _ => None,
    }
}
