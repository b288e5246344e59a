//! Command-line flags (spec §6.4), reimplemented with `clap` derive over
//! the original's `getopt` surface: a plain `#[derive(Parser)]` struct,
//! not a subcommand tree - recli has exactly one mode of operation, the
//! REPL, so there is nothing to dispatch a subcommand on.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "recli", bin_name = "recli")]
#[command(about = "Restricted, grammar-driven command-line interpreter")]
pub struct Cli {
    /// Configuration directory (default: `/etc/recli/{progname}`).
    #[arg(short = 'd', long = "dir", value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Load help markdown from this file instead of `{dir}/help.md`
    /// (testing).
    #[arg(short = 'H', long = "help-file", value_name = "FILE")]
    pub help_file: Option<PathBuf>,

    /// Load permission rules from this file instead of
    /// `{dir}/permission/{user}.txt` (testing). Exits 0 immediately if
    /// the resulting rule set denies everything.
    #[arg(short = 'p', long = "permission-file", value_name = "FILE")]
    pub permission_file: Option<PathBuf>,

    /// Parse configuration then quit, without starting the REPL (used
    /// for syntax-check runs).
    #[arg(short = 'q', long = "quit-after-parse")]
    pub quit_after_parse: bool,

    /// Load the root grammar from this file instead of walking `{dir}/bin/`
    /// (testing).
    #[arg(short = 's', long = "syntax-file", value_name = "FILE")]
    pub syntax_file: Option<PathBuf>,

    /// Override the root prompt.
    #[arg(short = 'P', long = "prompt", value_name = "STR")]
    pub prompt: Option<String>,

    /// Debug: dump the parsed grammar to stdout. The only recognized
    /// value is `syntax`.
    #[arg(short = 'X', value_name = "WHAT")]
    pub debug: Option<String>,
}

impl Cli {
    pub fn dump_syntax_requested(&self) -> bool {
        self.debug.as_deref() == Some("syntax")
    }
}
