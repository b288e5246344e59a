//! Permission engine and interactive session state machine: the context
//! stack, built-in commands, and the `process_line` transition function
//! (spec §3.2, §3.3, §4.7, §4.8).
//!
//! Built on `recli-core`'s grammar/permission primitives and
//! `recli-parser`'s lexer; owns no filesystem access except reading a
//! permission file, which `recli-cli`'s bootstrap hands it a path for.

pub mod builtins;
pub mod context;
pub mod error;
pub mod help;
pub mod permission_file;
pub mod session;

pub use builtins::{recognize, Builtin};
pub use context::{Frame, Stack, MAX_DEPTH};
pub use error::{CheckFailure, PermissionError, SessionError};
pub use help::{context_help_lines, show_help};
pub use session::{ProcessOutcome, Session};
