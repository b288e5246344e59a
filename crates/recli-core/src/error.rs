//! Error types owned by the grammar DAG itself (parsing and merging are
//! handled in `recli-parser`, but the merge algebra lives here because it
//! operates directly on `Node`).

use thiserror::Error;

/// Failure merging two grammar nodes (spec §4.3, §7 `GrammarMergeError`).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GrammarMergeError {
    /// VARARGS may not appear as an alternative in an `ALTERNATE`.
    #[error("VARARGS is not allowed inside an alternation")]
    VarargsInAlternation,
}

/// Violation of the keyword/datatype-name naming invariant (spec §3.1
/// invariant 5). Raised by the node constructors in [`crate::grammar`];
/// `recli-parser`'s `GrammarParseError` wraps this with a source position.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NamingError {
    #[error("keyword name must not be empty")]
    Empty,
    #[error("'{0}' is all-uppercase, which is reserved for datatypes and macros")]
    AllUppercaseReserved(String),
    #[error("'{0}' mixes upper and lower case, which is not a valid keyword")]
    MixedCase(String),
    #[error("'{0}' is not a valid datatype reference (datatype names must be all-uppercase)")]
    NotAllUppercase(String),
}
