use crate::command::{BuiltinHandler, Context};
use crate::error::{ShellError, describe};
use crate::interpreter::Factory;
use crate::lexer::{rest_of_line, split_into_tokens};
use crate::registry::BuiltinRegistry;
use anyhow::Result;
use argh::{EarlyExit, FromArgs};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Built-in commands known to the shell at compile time.
///
/// Builtins are executed directly in-process without spawning a child process.
/// Each one is built from the raw input line, so it decides for itself how much of
/// the line is arguments and how much is verbatim text.
pub(crate) trait BuiltinCommand: Sized {
    /// Canonical name of the command, e.g. "echo" or "cd".
    fn name() -> &'static str;

    /// Build the command from the full input line, its own name included.
    fn from_line(line: &str) -> Result<Self, EarlyExit>;

    /// Executes the command, writing to the console streams in `ctx`.
    fn execute(self, ctx: &mut Context<'_>) -> Result<()>;
}

/// Parse the tokens after the command name with argh.
fn parse_args<T: FromArgs>(name: &str, line: &str) -> Result<T, EarlyExit> {
    let tokens = split_into_tokens(rest_of_line(line));
    let args: Vec<&str> = tokens.iter().map(String::as_str).collect();
    T::from_args(&[name], &args)
}

impl<T: BuiltinCommand> BuiltinHandler for Factory<T> {
    fn invoke(&self, line: &str, ctx: &mut Context<'_>) {
        let result = match T::from_line(line) {
            Ok(cmd) => cmd.execute(ctx),
            Err(EarlyExit { output, status }) => {
                let stream = if status.is_err() {
                    &mut *ctx.stderr
                } else {
                    &mut *ctx.stdout
                };
                stream.write_all(output.as_bytes()).map_err(Into::into)
            }
        };
        if let Err(e) = result {
            log::debug!("builtin `{}` failed: {e:#}", T::name());
            let _ = writeln!(ctx.stderr, "{e}");
        }
    }
}

/// Register every builtin this crate provides.
pub fn register_builtins(registry: &mut BuiltinRegistry) -> crate::error::Result<()> {
    registry.register(Echo::name(), Box::new(Factory::<Echo>::default()))?;
    registry.register(Pwd::name(), Box::new(Factory::<Pwd>::default()))?;
    registry.register(Cd::name(), Box::new(Factory::<Cd>::default()))?;
    registry.register(Type::name(), Box::new(Factory::<Type>::default()))?;
    Ok(())
}

/// Write the rest of the line to standard output, verbatim, followed by a newline.
pub struct Echo {
    pub text: String,
}

impl BuiltinCommand for Echo {
    fn name() -> &'static str {
        "echo"
    }

    fn from_line(line: &str) -> Result<Self, EarlyExit> {
        Ok(Echo {
            text: rest_of_line(line).to_string(),
        })
    }

    fn execute(self, ctx: &mut Context<'_>) -> Result<()> {
        writeln!(ctx.stdout, "{}", self.text)?;
        Ok(())
    }
}

#[derive(FromArgs)]
/// Print the current working directory to standard output.
pub struct Pwd {}

impl BuiltinCommand for Pwd {
    fn name() -> &'static str {
        "pwd"
    }

    fn from_line(line: &str) -> Result<Self, EarlyExit> {
        parse_args(Self::name(), line)
    }

    fn execute(self, ctx: &mut Context<'_>) -> Result<()> {
        writeln!(ctx.stdout, "{}", ctx.env.current_dir.to_string_lossy())?;
        Ok(())
    }
}

#[derive(FromArgs)]
/// Change the current working directory.
/// If no target is provided, changes to the home directory.
pub struct Cd {
    #[argh(positional)]
    /// directory to switch to; absolute, relative to the current directory, or starting with `~`.
    pub target: Option<String>,
}

impl Cd {
    fn target_dir(&self, home: Option<&PathBuf>) -> Result<PathBuf, ShellError> {
        let home = || home.cloned().ok_or(ShellError::HomeNotSet);
        match self.target.as_deref() {
            None | Some("") | Some("~") => home(),
            Some(t) => match t.strip_prefix("~/") {
                Some(rest) => Ok(home()?.join(rest)),
                None => Ok(PathBuf::from(t)),
            },
        }
    }
}

impl BuiltinCommand for Cd {
    fn name() -> &'static str {
        "cd"
    }

    fn from_line(line: &str) -> Result<Self, EarlyExit> {
        parse_args(Self::name(), line)
    }

    fn execute(self, ctx: &mut Context<'_>) -> Result<()> {
        let target = self.target_dir(ctx.env.home.as_ref())?;
        let shown = self
            .target
            .clone()
            .unwrap_or_else(|| target.to_string_lossy().into_owned());

        let new_dir = if target.is_absolute() {
            target
        } else {
            ctx.env.current_dir.join(target)
        };

        let fail = |e: std::io::Error| ShellError::ChangeDir {
            target: shown.clone(),
            reason: describe(&e),
        };
        let canonical = fs::canonicalize(&new_dir).map_err(fail)?;
        env::set_current_dir(&canonical).map_err(fail)?;
        log::debug!("cd -> {}", canonical.display());
        ctx.env.current_dir = canonical;
        Ok(())
    }
}

#[derive(FromArgs)]
/// Report how each name would be interpreted if used as a command.
pub struct Type {
    #[argh(positional, greedy)]
    /// command names to look up.
    pub names: Vec<String>,
}

impl BuiltinCommand for Type {
    fn name() -> &'static str {
        "type"
    }

    fn from_line(line: &str) -> Result<Self, EarlyExit> {
        parse_args(Self::name(), line)
    }

    fn execute(self, ctx: &mut Context<'_>) -> Result<()> {
        for name in &self.names {
            if ctx.builtins.contains(name) {
                writeln!(ctx.stdout, "{name} is a shell builtin")?;
            } else if let Some(path) = ctx.resolver.resolve(name) {
                writeln!(ctx.stdout, "{name} is {}", path.display())?;
            } else {
                writeln!(ctx.stdout, "{name}: not found")?;
            }
        }
        Ok(())
    }
}
