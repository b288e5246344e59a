//! `recli` binary entry point (spec §6.4, §4.10).
//!
//! Grounded on `examples/original_source/recli.c::main` for the overall
//! shape (parse flags, bootstrap, maybe dump-and-exit, else run the
//! loop): a thin `main()` that defers to a `cli` module and initializes
//! logging before doing anything else.

mod bootstrap;
mod cli;
mod error;
mod repl;

use std::process::ExitCode;
use std::rc::Rc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use recli_core::grammar::print_grammar;
use recli_core::permission::denies_everything;
use recli_session::{Frame, Session, Stack};

use crate::cli::Cli;

fn init_logging() {
    let filter = EnvFilter::try_from_env("RECLI_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// The prompt shown once a partial command has pushed a context frame
/// (`recli.c`'s `prompt_ctx`: `"%s ...> "` against the root's `"%s> "`).
fn context_prompt(root_prompt: &str) -> String {
    match root_prompt.strip_suffix("> ") {
        Some(base) => format!("{base} ...> "),
        None => root_prompt.to_string(),
    }
}

fn progname() -> String {
    std::env::args()
        .next()
        .as_deref()
        .and_then(|p| std::path::Path::new(p).file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "recli".to_string())
}

fn main() -> ExitCode {
    init_logging();
    recli_dispatch::ignore_sigpipe();

    let cli = Cli::parse();
    let dir = bootstrap::config_dir(&cli, &progname());

    let boot = match bootstrap::bootstrap(&cli, dir) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("% {e}");
            return ExitCode::FAILURE;
        }
    };

    if denies_everything(&boot.permissions) {
        tracing::info!("permission file denies everything, exiting");
        return ExitCode::SUCCESS;
    }

    if cli.dump_syntax_requested() {
        if let Some(syntax) = &boot.config.syntax {
            println!("{}", print_grammar(syntax));
        }
        return ExitCode::SUCCESS;
    }

    if cli.quit_after_parse {
        return ExitCode::SUCCESS;
    }

    let root = Frame::root(
        boot.config.syntax.clone().unwrap_or_else(recli_core::grammar::empty),
        boot.config.long_help.clone(),
        boot.config.short_help.clone(),
        boot.config.prompt.clone(),
    );
    let stack = Stack::new(root);
    let session = Rc::new(std::cell::RefCell::new(Session::new(
        stack,
        boot.permissions,
        context_prompt(&boot.config.prompt),
    )));

    let datatypes: Rc<dyn recli_core::Validate> = Rc::new(boot.datatypes);
    let mut config = boot.config;

    match repl::run(session, &mut config, datatypes) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("% {e}");
            ExitCode::FAILURE
        }
    }
}
