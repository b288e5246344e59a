//! Core data model shared by every `recli` crate: the hash-consed grammar
//! DAG, its total order and merge algebra, check/match/completion,
//! permission rules, and session configuration (spec §3, §4.3-§4.7).
//!
//! `recli-core` never touches the filesystem or a terminal; it has no
//! notion of a lexer, a textual grammar syntax, or a process - those are
//! `recli-parser`, `recli-session`, and `recli-dispatch` respectively.

pub mod config;
pub mod error;
pub mod grammar;
pub mod interner;
pub mod permission;
pub mod validate;

pub use config::RecliConfig;
pub use error::{GrammarMergeError, NamingError};
pub use permission::Rule;
pub use validate::{NoDatatypes, Validate, ValidateOutcome};
