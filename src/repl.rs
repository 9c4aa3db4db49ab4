//! The read loop feeding input lines to an [`Interpreter`].

use crate::command::ExitCode;
use crate::interpreter::{Interpreter, Outcome};
use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{BufRead, Write};

/// One read from a [`LineSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A line with its terminator removed.
    Line(String),
    /// The user abandoned the line being edited (Ctrl-C).
    Interrupted,
    /// No more input.
    Eof,
}

/// Where the read loop gets its lines from.
pub trait LineSource {
    fn read(&mut self, prompt: &str) -> Result<Input>;
}

/// Interactive source backed by rustyline, with line editing and history.
pub struct Editor {
    rl: DefaultEditor,
    history: bool,
}

impl Editor {
    pub fn new(history: bool) -> Result<Self> {
        Ok(Self {
            rl: DefaultEditor::new()?,
            history,
        })
    }
}

impl LineSource for Editor {
    fn read(&mut self, prompt: &str) -> Result<Input> {
        match self.rl.readline(prompt) {
            Ok(line) => {
                if self.history && !line.trim().is_empty() {
                    self.rl.add_history_entry(line.as_str())?;
                }
                Ok(Input::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(Input::Interrupted),
            Err(ReadlineError::Eof) => Ok(Input::Eof),
            Err(err) => Err(err.into()),
        }
    }
}

/// Non-interactive source: reads lines from any buffered reader, without a prompt.
pub struct Script<R> {
    reader: R,
}

impl<R: BufRead> Script<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for Script<R> {
    fn read(&mut self, _prompt: &str) -> Result<Input> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(Input::Eof);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Input::Line(line))
    }
}

/// Read and dispatch lines until `exit` or end of input.
///
/// Returns the status the interpreter process should exit with: the one given to
/// `exit`, or the status of the last command when input runs out.
pub fn run(
    sh: &mut Interpreter,
    source: &mut dyn LineSource,
    prompt: &str,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> Result<ExitCode> {
    let mut last_status = 0;
    loop {
        let line = match source.read(prompt)? {
            Input::Line(line) => line,
            Input::Interrupted => continue,
            Input::Eof => return Ok(last_status),
        };
        let outcome = sh.dispatch(&line, stdout, stderr);
        stdout.flush()?;
        match outcome {
            Outcome::Exit(code) => return Ok(code),
            other => {
                if let Some(status) = other.status() {
                    last_status = status;
                }
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::testing::executable;
    use std::collections::VecDeque;
    use std::io::Cursor;
    use tempfile::TempDir;

    /// Replays canned reads, then reports end of input.
    struct Canned(VecDeque<Input>);

    impl Canned {
        fn lines(lines: &[&str]) -> Self {
            Canned(lines.iter().map(|l| Input::Line(l.to_string())).collect())
        }
    }

    impl LineSource for Canned {
        fn read(&mut self, _prompt: &str) -> Result<Input> {
            Ok(self.0.pop_front().unwrap_or(Input::Eof))
        }
    }

    fn run_lines(sh: &mut Interpreter, source: &mut dyn LineSource) -> (ExitCode, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(sh, source, "$ ", &mut out, &mut err).unwrap();
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn runs_until_end_of_input() {
        let mut sh = Interpreter::new(&Config::default()).unwrap();
        let mut source = Canned::lines(&["echo one", "", "echo two"]);
        let (code, out, _) = run_lines(&mut sh, &mut source);
        assert_eq!(code, 0);
        assert_eq!(out, "one\ntwo\n");
    }

    #[test]
    fn exit_stops_reading() {
        let mut sh = Interpreter::new(&Config::default()).unwrap();
        let mut source = Canned::lines(&["echo before", "exit", "echo after"]);
        let (code, out, _) = run_lines(&mut sh, &mut source);
        assert_eq!(code, 0);
        assert_eq!(out, "before\n");
    }

    #[test]
    fn exit_with_status() {
        let mut sh = Interpreter::new(&Config::default()).unwrap();
        let mut source = Canned::lines(&["exit 42"]);
        assert_eq!(run_lines(&mut sh, &mut source).0, 42);
    }

    #[test]
    fn interrupted_line_is_discarded() {
        let mut sh = Interpreter::new(&Config::default()).unwrap();
        let mut source = Canned(VecDeque::from([
            Input::Interrupted,
            Input::Line("echo after interrupt".to_string()),
        ]));
        let (_, out, _) = run_lines(&mut sh, &mut source);
        assert_eq!(out, "after interrupt\n");
    }

    #[test]
    fn end_of_input_reports_last_status() {
        let tmp = TempDir::new().unwrap();
        executable(tmp.path(), "fail", "exit 9");
        let config = Config::default().with_search_path(tmp.path().as_os_str());
        let mut sh = Interpreter::new(&config).unwrap();

        let mut source = Canned::lines(&["fail"]);
        assert_eq!(run_lines(&mut sh, &mut source).0, 9);

        let mut source = Canned::lines(&["fail", "missing"]);
        let (code, out, _) = run_lines(&mut sh, &mut source);
        assert_eq!(code, 127);
        assert_eq!(out, "missing: command not found\n");

        let mut source = Canned::lines(&["fail", "echo ok", ""]);
        assert_eq!(run_lines(&mut sh, &mut source).0, 0);
    }

    #[test]
    fn script_strips_line_terminators() {
        let mut source = Script::new(Cursor::new("echo a\r\necho b\nlast"));
        assert_eq!(source.read("").unwrap(), Input::Line("echo a".into()));
        assert_eq!(source.read("").unwrap(), Input::Line("echo b".into()));
        assert_eq!(source.read("").unwrap(), Input::Line("last".into()));
        assert_eq!(source.read("").unwrap(), Input::Eof);
    }

    #[test]
    fn script_source_drives_the_loop() {
        let mut sh = Interpreter::new(&Config::default()).unwrap();
        let mut source = Script::new(Cursor::new("echo hello world\ntype cd\nnope\n"));
        let (code, out, _) = run_lines(&mut sh, &mut source);
        assert_eq!(code, 127);
        assert_eq!(
            out,
            "hello world\ncd is a shell builtin\nnope: command not found\n"
        );
    }
}
