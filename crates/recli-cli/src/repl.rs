//! The interactive read-eval-print loop (spec §4.8, §6.2 "Line editor").
//!
//! Grounded on `recli.c::main`'s read loop and `edit.c`'s completion/`?`
//! callbacks, reimplemented over `rustyline` instead of a hand-rolled
//! line editor (`recli-cli`'s `Cargo.toml` already carries it). Spec §1
//! treats the line editor as an external, non-core collaborator, so a
//! submitted line ending in a bare `?` is treated as the help trigger
//! here instead of a true keystroke-level interception - `rustyline`
//! does not expose per-keystroke hooks the way the original's raw
//! termios loop did.

use std::cell::RefCell;
use std::rc::Rc;

use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context as RlContext, Editor, Helper};

use recli_core::grammar::prefix_words;
use recli_core::Validate;
use recli_dispatch::{resolve, spawn_and_multiplex, Mode};
use recli_parser::lexer::{tokenize, LexError};
use recli_session::{context_help_lines, show_help, ProcessOutcome, Session};

use crate::bootstrap::reload_grammar_if_stale;
use recli_core::RecliConfig;

/// Backs rustyline's completion/hint/highlight/validate hooks with the
/// live session's current context-stack grammar (spec §4.5 "tab
/// completion").
struct ReclHelper {
    session: Rc<RefCell<Session>>,
    datatypes: Rc<dyn Validate>,
}

impl Completer for ReclHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &RlContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        if in_unterminated_quote(prefix) {
            return Ok((pos, Vec::new()));
        }

        let start = prefix.rfind(char::is_whitespace).map(|i| i + 1).unwrap_or(0);
        let partial = &prefix[start..];
        let already_typed: Vec<String> = tokenize(&prefix[..start]).unwrap_or_default();

        let session = self.session.borrow();
        let grammar = &session.stack.top().grammar;
        let projected = if already_typed.is_empty() {
            grammar.clone()
        } else {
            recli_core::grammar::match_max(grammar, &already_typed, self.datatypes.as_ref())
        };

        let words = prefix_words(&projected, Some(partial), 256);
        let candidates = words
            .into_iter()
            .map(|w| Pair { display: w.clone(), replacement: w })
            .collect();
        Ok((start, candidates))
    }
}

impl Hinter for ReclHelper {
    type Hint = String;
}

impl Highlighter for ReclHelper {}

impl Validator for ReclHelper {}

impl Helper for ReclHelper {}

fn in_unterminated_quote(partial_line: &str) -> bool {
    matches!(tokenize(partial_line), Err(LexError::UnterminatedQuote(_)))
}

/// Drive the REPL until the session exits (spec §4.8). `config`/`datatypes`
/// are mutated in place so a dispatched command can trigger a grammar
/// reload (spec §4.10's cache-inode check).
pub fn run(
    session: Rc<RefCell<Session>>,
    config: &mut RecliConfig,
    datatypes: Rc<dyn Validate>,
) -> Result<(), ReadlineError> {
    let helper = ReclHelper { session: Rc::clone(&session), datatypes: Rc::clone(&datatypes) };
    let mut editor: Editor<ReclHelper, DefaultHistory> = Editor::new()?;
    editor.set_helper(Some(helper));

    loop {
        let prompt = session.borrow().stack.top().prompt.clone();
        let line = match editor.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e),
        };

        let _ = editor.add_history_entry(line.as_str());

        let trimmed = line.trim_end();
        if let Some(prefix) = trimmed.strip_suffix('?') {
            print_inline_help(&session, prefix, datatypes.as_ref());
            continue;
        }

        let outcome = session.borrow_mut().process_line(&line, datatypes.as_ref());
        match outcome {
            ProcessOutcome::Empty | ProcessOutcome::Pushed | ProcessOutcome::FramePopped | ProcessOutcome::AllFramesPopped => {}
            ProcessOutcome::Exit => break,
            ProcessOutcome::Help(words) => print_help_command(&session, &words, datatypes.as_ref()),
            ProcessOutcome::LexFailed(e) => eprintln!("{e}"),
            ProcessOutcome::CheckFailed(failure) => print_caret_error(&line, failure.at, &failure.message),
            ProcessOutcome::PermissionDenied => eprintln!("% Permission denied"),
            ProcessOutcome::Ready { argv, tty_required } => {
                dispatch(config, &argv, tty_required)?;
                let is_datatype = |name: &str| {
                    // `datatypes` is always a `DatatypeRegistry` in `recli-cli`; this
                    // closure only needs `Validate`'s narrower surface for reparsing.
                    recli_parser::DatatypeRegistry.is_known(name)
                };
                let dir = config.dir.clone();
                match reload_grammar_if_stale(&dir, &is_datatype, config) {
                    Ok(true) => {
                        let root = recli_session::Frame::root(
                            config.syntax.clone().unwrap_or_else(recli_core::grammar::empty),
                            config.long_help.clone(),
                            config.short_help.clone(),
                            config.prompt.clone(),
                        );
                        session.borrow_mut().stack = recli_session::Stack::new(root);
                    }
                    Ok(false) => {}
                    Err(e) => tracing::warn!(%e, "grammar reload after dispatch failed"),
                }
            }
        }
    }

    Ok(())
}

fn dispatch(config: &RecliConfig, argv: &[String], _tty_required: bool) -> Result<(), ReadlineError> {
    let bin_root = config.dir.join("bin");
    let resolved = match resolve(&bin_root, argv, Mode::Execution) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("% {e}");
            return Ok(());
        }
    };

    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    if let Err(e) =
        spawn_and_multiplex(&resolved.executable, &resolved.argv, &config.envp, &mut stdout, &mut stderr)
    {
        eprintln!("% {e}");
    }
    Ok(())
}

fn print_inline_help(session: &Rc<RefCell<Session>>, partial_line: &str, validate: &dyn Validate) {
    let session = session.borrow();
    let top = session.stack.top();
    let typed: Vec<String> = tokenize(partial_line).unwrap_or_default();
    let projected = if typed.is_empty() {
        top.grammar.clone()
    } else {
        recli_core::grammar::match_max(&top.grammar, &typed, validate)
    };
    let short_help = top.short_help.as_ref().map(|h| {
        if typed.is_empty() { h.clone() } else { recli_core::grammar::match_max(h, &typed, validate) }
    });
    for line in context_help_lines(&projected, short_help.as_ref(), validate) {
        println!("  {line}");
    }
}

fn print_help_command(session: &Rc<RefCell<Session>>, words: &[String], validate: &dyn Validate) {
    let session = session.borrow();
    let top = session.stack.top();
    match &top.long_help {
        Some(dag) => match show_help(dag, words, validate) {
            Some(text) => println!("{text}"),
            None => println!("No help available."),
        },
        None => println!("No help available."),
    }
}

/// Best-effort caret annotation under the word where `check` failed
/// (spec §4.7 "error reporting"). The lexer does not preserve byte
/// spans, so this approximates a column by re-joining whitespace-split
/// words up to `at`.
fn print_caret_error(line: &str, at: usize, message: &str) {
    let words: Vec<&str> = line.split_whitespace().collect();
    let column: usize = words.iter().take(at).map(|w| w.len() + 1).sum();
    eprintln!("{line}");
    eprintln!("{}^-- {message}", " ".repeat(column));
}
