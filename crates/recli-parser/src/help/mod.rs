//! Help markdown parsing (spec §4.2 "Help-file parsing", §6.1 `help.md`).
//!
//! Grounded on `examples/original_source/src/syntax.c::syntax_parse_help`
//! (the `#` section / 4-space-indent accumulation rules).

use recli_core::grammar::{concat, empty, help_text, merge_all, HelpRank, Node};

use super::grammar_text::{parse_line, GrammarParseError};

/// The long/short help DAGs produced by [`parse_help`].
pub struct HelpDags {
    pub long: Node,
    pub short: Node,
}

/// Parse a simplified markdown dialect: `#`-prefixed lines declare a
/// grammar fragment; subsequent non-indented text accumulates as long
/// help; 4-space-indented lines accumulate as short help. Each section
/// contributes `(grammar, long_help)` and `(grammar, short_help)` CONCAT
/// pairs, merged into the respective DAG.
pub fn parse_help(text: &str, is_datatype: &dyn Fn(&str) -> bool) -> Result<HelpDags, GrammarParseError> {
    let mut long_sections = Vec::new();
    let mut short_sections = Vec::new();

    let mut current_grammar: Option<Node> = None;
    let mut long_lines: Vec<String> = Vec::new();
    let mut short_lines: Vec<String> = Vec::new();

    let flush = |grammar: &Option<Node>,
                 long_lines: &mut Vec<String>,
                 short_lines: &mut Vec<String>,
                 long_sections: &mut Vec<Node>,
                 short_sections: &mut Vec<Node>| {
        if let Some(grammar) = grammar {
            if !long_lines.is_empty() {
                let text = long_lines.join("\n");
                long_sections.push(concat(grammar.clone(), help_text(&text, HelpRank::Long)));
            }
            if !short_lines.is_empty() {
                let text = short_lines.join("\n");
                short_sections.push(concat(grammar.clone(), help_text(&text, HelpRank::Short)));
            }
        }
        long_lines.clear();
        short_lines.clear();
    };

    for raw_line in text.lines() {
        if let Some(heading) = raw_line.strip_prefix('#') {
            flush(&current_grammar, &mut long_lines, &mut short_lines, &mut long_sections, &mut short_sections);
            current_grammar = parse_line(heading.trim(), is_datatype)?;
            continue;
        }

        if raw_line.is_empty() {
            continue;
        }

        if let Some(indented) = raw_line.strip_prefix("    ") {
            short_lines.push(indented.to_string());
        } else {
            long_lines.push(raw_line.to_string());
        }
    }
    flush(&current_grammar, &mut long_lines, &mut short_lines, &mut long_sections, &mut short_sections);

    let long = merge_all(long_sections).unwrap_or_else(|_| empty());
    let short = merge_all(short_sections).unwrap_or_else(|_| empty());

    Ok(HelpDags { long, short })
}
