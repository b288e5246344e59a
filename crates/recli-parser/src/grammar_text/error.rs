//! `GrammarParseError` (spec §7) and its `annotate-snippets` rendering.
//!
//! The variant list is grounded on
//! `examples/original_source/src/syntax.c::str2syntax`'s `syntax_error`
//! call sites; the diagnostic-rendering shape follows `annotate-snippets`'s
//! own idiom for a `Level`+`Snippet` report over a source line.

use annotate_snippets::{Level, Renderer, Snippet};
use thiserror::Error;

use recli_core::{GrammarMergeError, NamingError};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GrammarParseError {
    #[error("unexpected '{found}'")]
    UnexpectedToken { at: usize, found: String },
    #[error("empty alternation")]
    EmptyAlternation { at: usize },
    #[error("no matching '{0}'")]
    UnmatchedDelimiter(char, usize),
    #[error("invalid use of variable arguments")]
    InvalidVarargsContext { at: usize },
    #[error("unknown datatype '{0}'")]
    UnknownDatatype(String, usize),
    #[error("unknown macro '{0}'")]
    UnknownMacro(String, usize),
    #[error(transparent)]
    Naming(#[from] NamingError),
    #[error(transparent)]
    Merge(#[from] GrammarMergeError),
    #[error("unexpected end of input")]
    UnexpectedEof,
}

impl GrammarParseError {
    /// Byte offset into the source this error anchors to, for caret
    /// annotation (spec §4.2 "a pointer to the offending input character").
    pub fn position(&self) -> Option<usize> {
        match self {
            GrammarParseError::UnexpectedToken { at, .. } => Some(*at),
            GrammarParseError::EmptyAlternation { at } => Some(*at),
            GrammarParseError::UnmatchedDelimiter(_, at) => Some(*at),
            GrammarParseError::InvalidVarargsContext { at } => Some(*at),
            GrammarParseError::UnknownDatatype(_, at) => Some(*at),
            GrammarParseError::UnknownMacro(_, at) => Some(*at),
            GrammarParseError::Naming(_)
            | GrammarParseError::Merge(_)
            | GrammarParseError::UnexpectedEof => None,
        }
    }

    /// Render a caret-annotated diagnostic against the original source
    /// line using `annotate-snippets`.
    pub fn render(&self, source: &str) -> String {
        let message = self.to_string();
        let Some(at) = self.position() else {
            return message;
        };
        let at = at.min(source.len());
        let snippet = Snippet::source(source).annotation(Level::Error.span(at..at).label(&message));
        let message = Level::Error.title(&message).snippet(snippet);
        Renderer::styled().render(message).to_string()
    }
}
