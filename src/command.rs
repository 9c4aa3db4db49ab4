use crate::env::Environment;
use crate::registry::BuiltinRegistry;
use crate::resolver::PathResolver;
use std::io::Write;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
/// This mirrors the convention used by POSIX shells and many command-line tools.
pub type ExitCode = i32;

/// Everything a builtin may touch while it runs.
///
/// The registry and resolver are shared read-only; `type` needs both to report where a
/// name would be dispatched.
pub struct Context<'a> {
    pub env: &'a mut Environment,
    pub builtins: &'a BuiltinRegistry,
    pub resolver: &'a PathResolver,
    pub stdout: &'a mut dyn Write,
    pub stderr: &'a mut dyn Write,
}

/// Object-safe handler stored in the [`BuiltinRegistry`].
///
/// A handler receives the full, unmodified input line (its own name included) and
/// produces console output. It cannot signal failure to the dispatcher: errors are
/// written to `ctx.stderr` by the handler itself.
pub trait BuiltinHandler {
    fn invoke(&self, line: &str, ctx: &mut Context<'_>);
}
