//! The session state machine (spec §4.8).
//!
//! Grounded end to end on `recli.c::process()`: built-in dispatch, then
//! lex, then check, then (on a full match) permission, then hand the
//! caller a runnable argv. Dispatch itself lives in `recli-dispatch` - this
//! module never spawns a process, it only decides whether one should run.

use recli_core::grammar::{check, match_max, CheckVerdict};
use recli_core::permission::{enforce, Rule};
use recli_core::Validate;
use recli_parser::lexer::{tokenize, LexError};

use crate::builtins::{recognize, Builtin};
use crate::context::Stack;
use crate::error::CheckFailure;

/// What the caller of [`Session::process_line`] should do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// Blank line, or a comment-only line; nothing happened.
    Empty,
    /// `quit`/`logout`, or `exit` at depth 0 - the process should end.
    Exit,
    /// `exit` at depth > 0 popped one frame.
    FramePopped,
    /// `end` popped every frame back to the root.
    AllFramesPopped,
    /// `help [words...]`; the caller runs the help projector.
    Help(Vec<String>),
    /// The line was a valid prefix; a new context frame was pushed.
    Pushed,
    /// The line failed to lex (unterminated quote, stray character).
    LexFailed(LexError),
    /// `check` failed, or the grammar was satisfied before the end of argv.
    CheckFailed(CheckFailure),
    /// The matched argv is denied by the permission engine.
    PermissionDenied,
    /// Fully matched and permitted; the caller should dispatch.
    Ready { argv: Vec<String>, tty_required: bool },
}

/// Owns the context stack and the permission rule set for one session
/// (spec §4.8's `Editing(depth)`/`Exited` states - `Executing(pid)` is the
/// caller's concern while `recli-dispatch` runs a child).
pub struct Session {
    pub stack: Stack,
    pub permissions: Vec<Rule>,
    /// The prompt template used for pushed frames (the original's global
    /// `prompt_ctx`, constant across every push regardless of depth).
    pub context_prompt: String,
}

impl Session {
    pub fn new(stack: Stack, permissions: Vec<Rule>, context_prompt: String) -> Self {
        Self { stack, permissions, context_prompt }
    }

    pub fn process_line(&mut self, line: &str, validate: &dyn Validate) -> ProcessOutcome {
        let argv = match tokenize(line) {
            Ok(a) => a,
            Err(e) => return ProcessOutcome::LexFailed(e),
        };
        if argv.is_empty() {
            return ProcessOutcome::Empty;
        }

        if let Some(builtin) = recognize(&argv) {
            tracing::debug!(?builtin, "recognized built-in");
            return self.run_builtin(builtin);
        }

        let frame_grammar = self.stack.top().grammar.clone();
        let (verdict, tty_required) = check(&frame_grammar, &argv, validate);

        let consumed = match verdict {
            CheckVerdict::Failed { at, message } => {
                tracing::debug!(at, %message, "check failed");
                return ProcessOutcome::CheckFailed(CheckFailure { at, message });
            }
            CheckVerdict::WantMore(_) => {
                let matched = match_max(&frame_grammar, &argv, validate);
                return if self.stack.push(argv, matched, self.context_prompt.clone()) {
                    tracing::debug!(depth = self.stack.depth(), "context pushed");
                    ProcessOutcome::Pushed
                } else {
                    tracing::warn!("context stack full, refusing push");
                    ProcessOutcome::CheckFailed(CheckFailure {
                        at: 0,
                        message: "context stack is full".to_string(),
                    })
                };
            }
            CheckVerdict::Empty => 0,
            CheckVerdict::Matched(n) => n,
        };

        if consumed < argv.len() {
            return ProcessOutcome::CheckFailed(CheckFailure {
                at: consumed,
                message: format!("unexpected text starting at '{}'", argv[consumed]),
            });
        }

        let mut full_argv = self.stack.full_argv();
        full_argv.extend(argv);

        if !enforce(&self.permissions, &full_argv) {
            tracing::warn!(argv = ?full_argv, "permission denied");
            return ProcessOutcome::PermissionDenied;
        }

        tracing::info!(argv = ?full_argv, tty_required, "dispatching command");
        ProcessOutcome::Ready { argv: full_argv, tty_required }
    }

    fn run_builtin(&mut self, builtin: Builtin) -> ProcessOutcome {
        match builtin {
            Builtin::Exit => {
                if self.stack.depth() == 0 {
                    ProcessOutcome::Exit
                } else {
                    self.stack.pop();
                    ProcessOutcome::FramePopped
                }
            }
            Builtin::End => {
                self.stack.pop_all();
                ProcessOutcome::AllFramesPopped
            }
            Builtin::Quit => ProcessOutcome::Exit,
            Builtin::Help(rest) => ProcessOutcome::Help(rest),
        }
    }
}
