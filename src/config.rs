//! Version info, startup banner text, and the few tunables the
//! evaluator and REPL need (GC cadence, prelude/history file names).

pub const VERSION: &str = "1.0.0";
pub const WELCOME_MESSAGE: &str = "Lisp Interpreter v1.0";
pub const WELCOME_SUBTITLE: &str = "A small Scheme-flavored Lisp with TCO, macros, and a mark-and-sweep collector";

/// Drive-steps between automatic GC cycles.
pub const GC_STEP_THRESHOLD: u64 = 10_000;

/// REPL history file, written in the working directory.
pub const HISTORY_FILE: &str = ".lisp_history";

/// Prelude loaded into the initial environment before the first
/// prompt. Missing file is silently tolerated.
pub const PRELUDE_FILE: &str = "library.lisp";

pub const HELP_TEXT: &str = r#"
Available commands:
  :q                   - Exit the REPL
  :help                - Show this message

Type any Lisp expression to evaluate it.
"#;
