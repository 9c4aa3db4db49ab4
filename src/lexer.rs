//! Splitting of a raw input line into a command name and its arguments.
//!
//! Whitespace is the only separator. There is no quoting, escaping or expansion:
//! every maximal run of non-whitespace characters becomes one token.

/// A tokenized input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    /// The first token.
    pub name: String,
    /// The remaining tokens, in order.
    pub args: Vec<String>,
}

impl CommandLine {
    /// Tokenize `line`. Returns `None` when the line holds no tokens at all.
    pub fn parse(line: &str) -> Option<Self> {
        let mut tokens = split_into_tokens(line);
        if tokens.is_empty() {
            return None;
        }
        let name = tokens.remove(0);
        Some(Self { name, args: tokens })
    }

    /// The full argument vector, program name first.
    ///
    /// This is the shape handed to process creation; the terminating null entry is
    /// appended by the standard library when the vector crosses into `execve`.
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.name.clone())
            .chain(self.args.iter().cloned())
            .collect()
    }
}

/// Split `line` on whitespace boundaries.
pub fn split_into_tokens(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

/// Text following the first token and the whitespace after it.
///
/// Builtins receive the untouched input line; this is how they skip their own name.
pub fn rest_of_line(line: &str) -> &str {
    let line = line.trim_start();
    match line.find(char::is_whitespace) {
        Some(idx) => line[idx..].trim_start(),
        None => "",
    }
}
