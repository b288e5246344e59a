//! Dispatch error taxonomy (spec §7 `DispatchError`).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Anything that can go wrong resolving a path, spawning a child, or
/// waiting for it. Each stage matches `recli_exec`'s own failure points
/// in `examples/original_source/dir.c`.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("resolving '{}': {reason}", argv.join(" "))]
    Resolve { argv: Vec<String>, reason: String },
    #[error("opening pipe: {0}")]
    Pipe(#[source] io::Error),
    #[error("spawning '{path}': {source}")]
    Fork { path: PathBuf, #[source] source: io::Error },
    #[error("executing '{path}': {source}")]
    Exec { path: PathBuf, #[source] source: io::Error },
    #[error("waiting for child: {0}")]
    Wait(#[source] io::Error),
}
