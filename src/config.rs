use std::env as stdenv;
use std::ffi::OsString;
use std::path::PathBuf;

/// Default prompt printed before every line in interactive mode.
pub const DEFAULT_PROMPT: &str = "$ ";

/// Startup snapshot of everything the interpreter takes from the outside world.
///
/// Built once, before the first prompt. Components that need `PATH` or `HOME` get the
/// value from here at construction time instead of reading the process environment
/// while commands run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Colon-separated executable search path. `None` means every lookup misses.
    pub search_path: Option<OsString>,
    /// Target of a bare `cd` and of `~` expansion.
    pub home: Option<PathBuf>,
    pub prompt: String,
    /// Record interactive lines in the line editor's history.
    pub history: bool,
}

impl Config {
    /// Capture `PATH` and `HOME` from the process environment.
    pub fn from_env() -> Self {
        Self {
            search_path: stdenv::var_os("PATH"),
            home: stdenv::var_os("HOME").map(PathBuf::from),
            ..Self::default()
        }
    }

    pub fn with_search_path(mut self, search_path: impl Into<OsString>) -> Self {
        self.search_path = Some(search_path.into());
        self
    }

    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }
}

impl Default for Config {
    /// An empty configuration: no search path, no home directory.
    fn default() -> Self {
        Self {
            search_path: None,
            home: None,
            prompt: DEFAULT_PROMPT.to_string(),
            history: true,
        }
    }
}
