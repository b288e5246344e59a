//! `?`-help and `help` built-in projection (spec §4.5, §4.8).
//!
//! Grounded on `recli.c::do_help`/`foundhelp` and `syntax.c::syntax_show_help`/
//! `syntax_print_context_help`.

use recli_core::grammar::{match_max, prefix_words, Node, NodeKind};
use recli_core::{interner, Validate};

/// The long-help body attached to the literal `argv` resolves to exactly,
/// if any (`syntax_show_help`).
pub fn show_help(help_dag: &Node, argv: &[String], validate: &dyn Validate) -> Option<String> {
    let residual = if argv.is_empty() { help_dag.clone() } else { match_max(help_dag, argv, validate) };
    first_help_text(&residual)
}

fn first_help_text(node: &Node) -> Option<String> {
    match node.kind() {
        NodeKind::Literal(lit) if lit.help_rank.is_some() => Some(interner::resolve(lit.name)),
        NodeKind::Concat { first, rest, .. } => first_help_text(first).or_else(|| first_help_text(rest)),
        NodeKind::Alternate { first, rest } => first_help_text(first).or_else(|| first_help_text(rest)),
        NodeKind::Optional(inner) => first_help_text(inner),
        NodeKind::Macro { body, .. } => first_help_text(body),
        _ => None,
    }
}

/// One line per legal next word, paired with its short-help text when the
/// short-help DAG has one (spec §4.5's column-aligned display).
///
/// `grammar` and `short_help` must already be projected to the current
/// input position (i.e. the caller has run `match_max` over however many
/// words have been typed on the in-progress line) - this function only
/// decides the *next* word.
pub fn context_help_lines(grammar: &Node, short_help: Option<&Node>, validate: &dyn Validate) -> Vec<String> {
    let candidates = prefix_words(grammar, None, 256);
    let width = candidates.iter().map(|w| w.len()).max().unwrap_or(0);

    candidates
        .into_iter()
        .map(|word| {
            let text = short_help.and_then(|dag| show_help(dag, std::slice::from_ref(&word), validate));
            match text {
                Some(help) => format!("{word:width$}  {help}"),
                None => word,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use recli_core::grammar::{concat, help_text, keyword, merge_all, HelpRank};
    use recli_core::NoDatatypes;

    fn kw(s: &str) -> Node {
        keyword(s, false, false).unwrap()
    }

    #[test]
    fn show_help_finds_matching_section() {
        let dag = merge_all(vec![
            concat(concat(kw("show"), kw("interface")), help_text("shows interfaces", HelpRank::Long)),
            concat(concat(kw("show"), kw("route")), help_text("shows routes", HelpRank::Long)),
        ])
        .unwrap();

        let argv = vec!["show".to_string(), "route".to_string()];
        assert_eq!(show_help(&dag, &argv, &NoDatatypes), Some("shows routes".to_string()));
    }

    #[test]
    fn context_help_lines_pairs_words_with_short_help() {
        let grammar = kw("interface");
        let short = concat(kw("interface"), help_text("interfaces", HelpRank::Short));
        let lines = context_help_lines(&grammar, Some(&short), &NoDatatypes);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("interface"));
        assert!(lines[0].contains("interfaces"));
    }
}
