//! Built-in command recognition (spec §4.8 transition 1).
//!
//! Grounded on `recli.c::process()`'s priority dispatch on `argv[0]` before
//! anything is checked against the grammar.

/// A built-in recognized before the line is ever run through `check`.
/// `help` additionally carries its own arguments (spec §4.5).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Builtin {
    /// Pop one context frame, or exit the process at depth 0.
    Exit,
    /// Pop every context frame back to the root.
    End,
    /// Exit the process unconditionally.
    Quit,
    /// Print help for the remaining words (or the whole current grammar
    /// when empty).
    Help(Vec<String>),
}

/// Recognize a built-in from a lexed argv, per `recli.c::process()`'s exact
/// priority order: `exit`, `end`, `quit`/`logout`, `help`.
pub fn recognize(argv: &[String]) -> Option<Builtin> {
    let head = argv.first()?.as_str();
    match head {
        "exit" => Some(Builtin::Exit),
        "end" => Some(Builtin::End),
        "quit" | "logout" => Some(Builtin::Quit),
        "help" => Some(Builtin::Help(argv[1..].to_vec())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn recognizes_each_builtin() {
        assert_eq!(recognize(&argv(&["exit"])), Some(Builtin::Exit));
        assert_eq!(recognize(&argv(&["end"])), Some(Builtin::End));
        assert_eq!(recognize(&argv(&["quit"])), Some(Builtin::Quit));
        assert_eq!(recognize(&argv(&["logout"])), Some(Builtin::Quit));
        assert_eq!(recognize(&argv(&["help", "show"])), Some(Builtin::Help(argv(&["show"]))));
    }

    #[test]
    fn non_builtin_returns_none() {
        assert_eq!(recognize(&argv(&["show", "interface"])), None);
        assert_eq!(recognize(&[]), None);
    }
}
