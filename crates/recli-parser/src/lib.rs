//! Textual grammar and help parsing, the argv lexer, and the built-in
//! datatype registry (spec §2 "Lexer", "Datatype registry", "Grammar
//! parser"; §4.1, §4.2).
//!
//! Builds on `recli-core`'s `Node`/`Validate` but never needs to know
//! about a session, a terminal, or a child process.

pub mod datatypes;
pub mod grammar_text;
pub mod help;
pub mod lexer;

pub use datatypes::DatatypeRegistry;
pub use grammar_text::{parse_file, parse_line, GrammarParseError};
pub use help::{parse_help, HelpDags};
pub use lexer::{tokenize, LexError};
