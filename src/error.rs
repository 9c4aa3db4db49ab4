//! Error taxonomy of the interpreter.

use crate::command::ExitCode;
use std::io;

/// Errors produced while registering, resolving or running commands.
///
/// None of these are fatal to the interpreter: the dispatcher reports them on the
/// console and moves on to the next line.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("builtin table full, cannot register `{0}`")]
    RegistryFull(String),

    #[error("{0}: command not found")]
    NotFound(String),

    #[error("fork: {0}")]
    Spawn(#[source] io::Error),

    #[error("{command}: {}", describe(.source))]
    Exec {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("cd: {target}: {reason}")]
    ChangeDir { target: String, reason: String },

    #[error("cd: HOME not set")]
    HomeNotSet,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ShellError {
    /// Status a shell would report for a command that failed this way.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            ShellError::NotFound(_) => 127,
            ShellError::Exec { source, .. } if source.kind() == io::ErrorKind::NotFound => 127,
            ShellError::Exec { .. } => 126,
            _ => 1,
        }
    }
}

/// Render an I/O error the way `perror` would, without the `(os error N)` suffix.
pub fn describe(err: &io::Error) -> String {
    match err.kind() {
        io::ErrorKind::NotFound => "No such file or directory".to_string(),
        io::ErrorKind::PermissionDenied => "Permission denied".to_string(),
        io::ErrorKind::NotADirectory => "Not a directory".to_string(),
        _ => {
            let text = err.to_string();
            match text.find(" (os error") {
                Some(idx) => text[..idx].to_string(),
                None => text,
            }
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ShellError>;
