use crate::command::ExitCode;
use crate::env::Environment;
use crate::error::{Result, ShellError};
use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus};

/// Run `program` in a child process and block until it terminates.
///
/// `argv[0]` is the name the child sees as its own (normally the command as typed, not
/// the resolved path); the rest are its arguments. The child inherits the standard
/// streams and the interpreter's environment variables, and runs in `env.current_dir`.
///
/// A child killed by a signal reports `128 + signal`. When the child cannot be created
/// at all the error is [`ShellError::Spawn`]; when it was created but could not load
/// `program` the error is [`ShellError::Exec`], whose [`ShellError::exit_code`] is the
/// status a shell would report for it.
pub fn execute(program: &Path, argv: &[String], env: &Environment) -> Result<ExitCode> {
    let Some((arg0, args)) = argv.split_first() else {
        return Err(ShellError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            "empty argument vector",
        )));
    };

    let mut cmd = Command::new(program);
    set_arg0(&mut cmd, arg0);
    cmd.args(args).current_dir(&env.current_dir);

    let mut child = cmd.spawn().map_err(|source| classify_spawn_error(arg0, source))?;
    log::debug!("spawned `{}` as pid {}", program.display(), child.id());

    let exit_status = child.wait()?;
    let code = match exit_status.code() {
        Some(x) => x,
        None => terminated_by_signal(exit_status),
    };
    log::debug!("`{arg0}` exited with {code}");
    Ok(code)
}

/// Tell apart a failure to create the process from a failure to load the program.
///
/// The standard library reports both through `spawn`. Only resource exhaustion
/// (`EAGAIN`, `ENOMEM`) stops the process from being created; everything else comes
/// from the exec step inside the child.
fn classify_spawn_error(command: &str, source: io::Error) -> ShellError {
    match source.kind() {
        io::ErrorKind::WouldBlock | io::ErrorKind::OutOfMemory => {
            log::warn!("could not create process for `{command}`: {source}");
            ShellError::Spawn(source)
        }
        _ => {
            log::warn!("could not execute `{command}`: {source}");
            ShellError::Exec {
                command: command.to_string(),
                source,
            }
        }
    }
}

#[cfg(unix)]
fn set_arg0(cmd: &mut Command, arg0: &str) {
    use std::os::unix::process::CommandExt;
    cmd.arg0(arg0);
}

#[cfg(not(unix))]
fn set_arg0(_cmd: &mut Command, _arg0: &str) {}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = ExitStatusExt::signal(&exit_status) {
        128 + signal
    } else if ExitStatusExt::core_dumped(&exit_status) {
        255
    } else {
        -1
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> i32 {
    -1
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::testing::executable as script;
    use std::env as stdenv;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn env_in(dir: &Path) -> Environment {
        let mut env = Environment::new(&Config::default());
        env.current_dir = dir.to_path_buf();
        env
    }

    #[test]
    fn reports_exit_status() {
        let tmp = TempDir::new().unwrap();
        let ok = script(tmp.path(), "ok", "exit 0");
        let fail = script(tmp.path(), "fail", "exit 3");
        let env = env_in(tmp.path());

        assert_eq!(execute(&ok, &argv(&["ok"]), &env).unwrap(), 0);
        assert_eq!(execute(&fail, &argv(&["fail"]), &env).unwrap(), 3);
    }

    #[test]
    fn passes_arguments_in_order() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("out.txt");
        let body = format!("echo \"$0|$1|$2|$#\" > '{}'", out.display());
        let prog = script(tmp.path(), "show", &body);
        let env = env_in(tmp.path());

        let code = execute(&prog, &argv(&["show", "one", "two"]), &env).unwrap();
        assert_eq!(code, 0);
        // /bin/sh sets $0 to the script path it was handed, so only check the arguments.
        let written = fs::read_to_string(out).unwrap();
        assert!(written.trim_end().ends_with("|one|two|2"), "got {written:?}");
    }

    #[test]
    fn child_runs_in_environment_directory() {
        let tmp = TempDir::new().unwrap();
        let prog = script(tmp.path(), "where", "pwd > where.txt");
        let env = env_in(tmp.path());

        assert_eq!(execute(&prog, &argv(&["where"]), &env).unwrap(), 0);
        let written = fs::read_to_string(tmp.path().join("where.txt")).unwrap();
        let expected = fs::canonicalize(tmp.path()).unwrap();
        assert_eq!(fs::canonicalize(written.trim_end()).unwrap(), expected);
    }

    #[test]
    fn child_inherits_process_environment() {
        let tmp = TempDir::new().unwrap();
        let path = stdenv::var("PATH").unwrap_or_default();
        let body = format!("test \"$PATH\" = '{path}'");
        let prog = script(tmp.path(), "inherit", &body);
        let env = env_in(tmp.path());

        assert_eq!(execute(&prog, &argv(&["inherit"]), &env).unwrap(), 0);
    }

    #[test]
    fn signal_death_is_128_plus_signal() {
        let tmp = TempDir::new().unwrap();
        let prog = script(tmp.path(), "killself", "kill -9 $$");
        let env = env_in(tmp.path());

        assert_eq!(execute(&prog, &argv(&["killself"]), &env).unwrap(), 128 + 9);
    }

    #[test]
    fn bad_executable_format_is_exec_failure() {
        let tmp = TempDir::new().unwrap();
        let prog = tmp.path().join("garbage");
        fs::write(&prog, [0u8, 1, 2, 3, 4, 5, 6, 7]).unwrap();
        fs::set_permissions(&prog, fs::Permissions::from_mode(0o755)).unwrap();
        let env = env_in(tmp.path());

        let err = execute(&prog, &argv(&["garbage"]), &env).unwrap_err();
        assert!(matches!(err, ShellError::Exec { ref command, .. } if command == "garbage"));
        assert_eq!(err.exit_code(), 126);
    }

    #[test]
    fn vanished_program_is_exec_failure() {
        let tmp = TempDir::new().unwrap();
        let env = env_in(tmp.path());

        let err = execute(&tmp.path().join("gone"), &argv(&["gone"]), &env).unwrap_err();
        assert!(matches!(err, ShellError::Exec { .. }));
        assert_eq!(err.exit_code(), 127);
    }

    #[test]
    fn empty_argv_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let env = env_in(tmp.path());
        let err = execute(Path::new("/bin/sh"), &[], &env).unwrap_err();
        assert!(matches!(err, ShellError::Io(_)));
    }

    #[test]
    fn long_argument_vectors_are_not_truncated() {
        let tmp = TempDir::new().unwrap();
        let prog = script(tmp.path(), "count", "exit $(( $# - 299 ))");
        let env = env_in(tmp.path());

        let mut args = vec!["count".to_string()];
        args.extend((0..300).map(|i| format!("a{i}")));
        assert_eq!(execute(&prog, &args, &env).unwrap(), 1);
    }
}
