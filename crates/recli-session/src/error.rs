//! Error types for the session layer (spec §7).

use thiserror::Error;

use recli_parser::{GrammarParseError, LexError};

/// A line failed `check` against the current frame's grammar (spec §4.4,
/// §4.8 transition 4). Carries the argv index the failure was reported at
/// and a human-readable reason, for caret-annotated display.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct CheckFailure {
    pub at: usize,
    pub message: String,
}

/// Reasons a line is rejected before it ever reaches `check` (spec §4.7,
/// §4.10 step 6).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PermissionError {
    #[error("no permission")]
    Denied,
    #[error("failed reading permission file {path}: {reason}")]
    Io { path: String, reason: String },
}

/// Anything that can interrupt `Session::process_line` (spec §7
/// propagation rules: lex/parse/check/permission errors are caught by the
/// session loop and printed, never fatal to the process).
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    GrammarParse(#[from] GrammarParseError),
    #[error(transparent)]
    Check(#[from] CheckFailure),
    #[error(transparent)]
    Permission(#[from] PermissionError),
}
