//! The content-addressed grammar DAG (spec §3.1, §4.3).

pub mod constructors;
pub mod matching;
mod node;
mod order;
mod merge;
mod store;
pub mod print;

pub use constructors::{
    alternate, concat, datatype_ref, empty, help_text, keyword, macro_def, matched_word, optional,
    plus, symbol_of, varargs,
};
pub use matching::{check, match_max, match_word, prefix_words, CheckVerdict, MatchSense};
pub use merge::{merge, merge_all, skip_prefix};
pub use node::{HelpRank, LiteralNode, Node, NodeKind};
pub use order::compare;
pub use print::print_grammar;
pub use store::live_count;
