//! Bootstrap error taxonomy (spec §7 `ConfigError`), extended (spec
//! SPEC_FULL.md §4.10) with which stage failed, purely for logging - the
//! user-visible behavior (fatal vs. non-fatal) stays exactly per §7.

use std::path::PathBuf;

use thiserror::Error;

use recli_core::GrammarMergeError;
use recli_parser::GrammarParseError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration directory '{0}' does not exist")]
    MissingDirectory(PathBuf),
    #[error("{stage}: {source}")]
    Io { stage: &'static str, #[source] source: std::io::Error },
    #[error("{stage}: {source}")]
    Parse { stage: &'static str, #[source] source: GrammarParseError },
    #[error("{stage}: {source}")]
    Merge { stage: &'static str, #[source] source: GrammarMergeError },
    #[error("{stage}: {source}")]
    Dispatch { stage: &'static str, #[source] source: recli_dispatch::DispatchError },
    #[error("{stage}: {source}")]
    Permission { stage: &'static str, #[source] source: recli_session::PermissionError },
}
