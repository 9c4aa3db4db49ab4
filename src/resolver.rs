use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Looks commands up in a colon-separated search path.
///
/// The search path is fixed when the resolver is built. A missing or empty search path
/// is a valid state in which every bare name misses.
#[derive(Debug, Clone, Default)]
pub struct PathResolver {
    search_path: Option<OsString>,
}

impl PathResolver {
    pub fn new(search_path: Option<OsString>) -> Self {
        Self { search_path }
    }

    pub fn search_path(&self) -> Option<&OsStr> {
        self.search_path.as_deref()
    }

    /// Resolve a command the way a typical shell would.
    ///
    /// Behavior:
    /// - Empty name: `None`.
    /// - Name containing a `/` (e.g. `/bin/sh`, `./run`, `bin/tool`): returned as-is
    ///   if it names an executable file, without consulting the search path.
    /// - Bare name: each directory of the search path is tried in order and the first
    ///   `dir/name` that is an executable file wins.
    pub fn resolve(&self, command: &str) -> Option<PathBuf> {
        if command.is_empty() {
            return None;
        }
        if command.contains('/') {
            let path = Path::new(command);
            return is_executable(path).then(|| path.to_path_buf());
        }
        let found = find_in_path(self.search_path.as_deref()?, OsStr::new(command));
        log::debug!("resolve `{command}` -> {found:?}");
        found
    }
}

fn find_in_path(search_path: &OsStr, cmd: &OsStr) -> Option<PathBuf> {
    search_dirs(search_path)
        .map(|dir| dir.join(cmd))
        .find(|path| is_executable(path))
}

/// Directories of `search_path` in order, skipping empty segments.
#[cfg(unix)]
fn search_dirs(search_path: &OsStr) -> impl Iterator<Item = &Path> {
    use std::os::unix::ffi::OsStrExt;
    search_path
        .as_bytes()
        .split(|&b| b == b':')
        .filter(|dir| !dir.is_empty())
        .map(|dir| Path::new(OsStr::from_bytes(dir)))
}

#[cfg(not(unix))]
fn search_dirs(search_path: &OsStr) -> impl Iterator<Item = PathBuf> {
    std::env::split_paths(search_path)
        .filter(|dir| !dir.as_os_str().is_empty())
        .collect::<Vec<_>>()
        .into_iter()
}

/// A regular file (after following symlinks) that the calling user may execute.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use rustix::fs::{Access, access};
    path.is_file() && access(path, Access::EXEC_OK).is_ok()
}

#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    path.is_file()
}
