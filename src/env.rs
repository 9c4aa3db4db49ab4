use crate::config::Config;
use std::env as stdenv;
use std::path::PathBuf;

/// Interpreter state that builtins change and children inherit.
///
/// Environment variables are not tracked here: children inherit the interpreter's
/// own process environment unchanged.
#[derive(Debug, Clone)]
pub struct Environment {
    /// Reported by `pwd`, changed by `cd`, used as the working directory of children.
    pub current_dir: PathBuf,
    /// Home directory taken from the startup [`Config`].
    pub home: Option<PathBuf>,
}

impl Environment {
    /// Start in the process's working directory, with the home directory from `config`.
    pub fn new(config: &Config) -> Self {
        Self {
            current_dir: stdenv::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            home: config.home.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::env::Environment;
    use std::env as stdenv;
    use std::path::PathBuf;

    #[test]
    fn test_env_starts_in_process_dir() {
        let env = Environment::new(&Config::default());
        assert_eq!(env.current_dir, stdenv::current_dir().unwrap());
        assert_eq!(env.home, None);
    }

    #[test]
    fn test_env_takes_home_from_config() {
        let env = Environment::new(&Config::default().with_home("/srv/home"));
        assert_eq!(env.home, Some(PathBuf::from("/srv/home")));
    }
}
