//! Textual grammar <-> `Node` (spec §4.2, §6.3).

mod error;
mod lexer;
mod parser;

pub use error::GrammarParseError;
pub use parser::parse_line;

use recli_core::grammar::{merge_all, Node};

/// Parse a full grammar file (spec §6.3: one alternative per line) into a
/// single merged grammar.
pub fn parse_file(text: &str, is_datatype: &dyn Fn(&str) -> bool) -> Result<Node, GrammarParseError> {
    let mut lines = Vec::new();
    for line in text.lines() {
        if let Some(node) = parse_line(line, is_datatype)? {
            lines.push(node);
        }
    }
    Ok(merge_all(lines)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use recli_core::grammar::print_grammar;

    fn no_datatypes(_: &str) -> bool {
        false
    }

    #[test]
    fn s1_merge_with_factoring_from_file() {
        let text = "show interface ethernet\nshow interface wifi\n";
        let g = parse_file(text, &no_datatypes).unwrap();
        assert_eq!(print_grammar(&g), "show interface (ethernet | wifi)");
    }

    #[test]
    fn blank_and_comment_lines_are_skipped() {
        let text = "# a comment\n\nshow route\n";
        let g = parse_file(text, &no_datatypes).unwrap();
        assert_eq!(print_grammar(&g), "show route");
    }
}
