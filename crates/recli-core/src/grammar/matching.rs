//! Check, word-matching, longest-matching-prefix, and completion
//! enumeration over the grammar DAG (spec §4.3 "Longest-matching-prefix",
//! §4.4 "Check", §4.5 "Tab-completion", §4.6 "Match and word-matching").
//!
//! Grounded on `syntax.c::syntax_check`/`syntax_match`/`syntax_complete`.

use super::constructors::{concat, empty, matched_word, plus, varargs};
use super::node::{Node, NodeKind};
use crate::interner;
use crate::validate::{Validate, ValidateOutcome};

/// Outcome of [`check`]. A dedicated enum rather than the original's
/// overloaded signed integer (resolved Open Question, SPEC_FULL.md §9).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckVerdict {
    /// Matched `n` argv words (`n > 0`); the grammar is satisfied. The
    /// caller compares `n` against `argv.len()` to decide whether trailing
    /// words make the command non-runnable.
    Matched(usize),
    /// Matched all of argv but the grammar structurally requires `n`
    /// words in total (`n > argv.len()`); push as context.
    WantMore(usize),
    /// argv was empty, or entirely optional.
    Empty,
    /// Failure at argv position `at`.
    Failed { at: usize, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchSense {
    Exact,
    Prefix,
}

/// Internal walk result. `WantMore` only arises when this node's recursive
/// call consumed the entirety of the argv slice it was given and still
/// needed more - so "argv exhausted with nothing left to try" and "argv
/// exhausted mid-match" are both represented by the same variant.
enum Step {
    Matched(usize),
    WantMore(usize),
    Failed { at: usize, message: String },
}

pub fn check(root: &Node, argv: &[String], validate: &dyn Validate) -> (CheckVerdict, bool) {
    let mut tty_required = false;
    let verdict = match check_node(root, argv, 0, validate, &mut tty_required) {
        Step::Matched(0) => CheckVerdict::Empty,
        Step::Matched(n) => CheckVerdict::Matched(n),
        Step::WantMore(n) => CheckVerdict::WantMore(n),
        Step::Failed { at, message } => CheckVerdict::Failed { at, message },
    };
    (verdict, tty_required)
}

/// Minimum number of words `node` structurally requires, ignoring the
/// actual argv. Used to extend a `WantMore` deficit across a `CONCAT`
/// boundary when the left side already exhausted argv.
fn min_required(node: &Node) -> usize {
    match node.kind() {
        NodeKind::Empty | NodeKind::Varargs | NodeKind::Optional(_) => 0,
        NodeKind::Macro { body, .. } => min_required(body),
        NodeKind::Literal(_) => 1,
        NodeKind::Concat { first, rest, .. } => min_required(first) + min_required(rest),
        NodeKind::Alternate { first, rest } => min_required(first).min(min_required(rest)),
        NodeKind::Plus { inner, min, .. } => min_required(inner) * (*min as usize),
    }
}

fn literal_matches(lit: &super::node::LiteralNode, word: &str, validate: &dyn Validate) -> Result<bool, String> {
    if let Some(datatype) = lit.validator {
        let name = interner::resolve(datatype);
        match validate.validate(&name, word) {
            ValidateOutcome::Valid => Ok(true),
            ValidateOutcome::Partial | ValidateOutcome::Invalid => {
                Ok(false)
            }
        }
    } else {
        let name = interner::resolve(lit.name);
        let eq = if lit.case_insensitive {
            name.eq_ignore_ascii_case(word)
        } else {
            name == word
        };
        Ok(eq)
    }
}

fn check_node(
    node: &Node,
    argv: &[String],
    base: usize,
    validate: &dyn Validate,
    tty_required: &mut bool,
) -> Step {
    match node.kind() {
        NodeKind::Empty => Step::Matched(0),

        NodeKind::Literal(lit) => {
            if argv.is_empty() {
                return Step::WantMore(1);
            }
            match literal_matches(lit, &argv[0], validate) {
                Ok(true) => {
                    if lit.tty_required {
                        *tty_required = true;
                    }
                    Step::Matched(1)
                }
                Ok(false) => Step::Failed {
                    at: base,
                    message: format!("unexpected word '{}'", argv[0]),
                },
                Err(message) => Step::Failed { at: base, message },
            }
        }

        NodeKind::Varargs => Step::Matched(argv.len()),

        NodeKind::Macro { body, .. } => check_node(body, argv, base, validate, tty_required),

        NodeKind::Concat { first, rest, .. } => {
            match check_node(first, argv, base, validate, tty_required) {
                Step::Matched(n1) => {
                    match check_node(rest, &argv[n1..], base + n1, validate, tty_required) {
                        Step::Matched(n2) => Step::Matched(n1 + n2),
                        Step::WantMore(need2) => Step::WantMore(n1 + need2),
                        fail => fail,
                    }
                }
                Step::WantMore(need1) => Step::WantMore(need1 + min_required(rest)),
                fail => fail,
            }
        }

        NodeKind::Alternate { first, rest } => {
            match check_node(first, argv, base, validate, tty_required) {
                Step::Failed { at: at1, message: msg1 } => {
                    match check_node(rest, argv, base, validate, tty_required) {
                        Step::Failed { at: at2, message: msg2 } => {
                            if at2 >= at1 {
                                Step::Failed { at: at2, message: msg2 }
                            } else {
                                Step::Failed { at: at1, message: msg1 }
                            }
                        }
                        other => other,
                    }
                }
                other => other,
            }
        }

        NodeKind::Optional(inner) => {
            match check_node(inner, argv, base, validate, tty_required) {
                Step::Failed { .. } => Step::Matched(0),
                Step::Matched(n) => Step::Matched(n),
                Step::WantMore(need) => {
                    if argv.is_empty() {
                        Step::Matched(0)
                    } else {
                        Step::WantMore(need)
                    }
                }
            }
        }

        NodeKind::Plus { inner, min, max } => {
            let mut consumed = 0usize;
            let mut count = 0u32;
            loop {
                if *max != 0 && count >= *max {
                    break;
                }
                let remaining = &argv[consumed..];
                if remaining.is_empty() {
                    break;
                }
                match check_node(inner, remaining, base + consumed, validate, tty_required) {
                    Step::Matched(0) => break,
                    Step::Matched(n) => {
                        consumed += n;
                        count += 1;
                    }
                    Step::WantMore(need) => {
                        if count < *min {
                            return Step::WantMore(consumed + need);
                        }
                        break;
                    }
                    Step::Failed { .. } => break,
                }
            }
            if count >= *min {
                Step::Matched(consumed)
            } else if consumed == argv.len() {
                let deficit = (*min - count) as usize * min_required(inner).max(1);
                Step::WantMore(consumed + deficit)
            } else {
                Step::Failed {
                    at: base + consumed,
                    message: "expected another repetition".to_string(),
                }
            }
        }
    }
}

/// `match_word(node, word, sense)`: the sub-grammar that remains after
/// consuming exactly one word, or `None` if no branch accepts it.
/// Datatype validators are consulted only in [`MatchSense::Exact`].
pub fn match_word(
    node: &Node,
    word: &str,
    sense: MatchSense,
    validate: &dyn Validate,
) -> Option<Node> {
    match node.kind() {
        NodeKind::Empty => None,

        NodeKind::Literal(lit) => {
            let accepts = match sense {
                MatchSense::Exact => literal_matches(lit, word, validate).unwrap_or(false),
                MatchSense::Prefix => {
                    let name = interner::resolve(lit.name);
                    if lit.case_insensitive {
                        name.to_ascii_lowercase().starts_with(&word.to_ascii_lowercase())
                    } else {
                        name.starts_with(word)
                    }
                }
            };
            if accepts {
                Some(empty())
            } else {
                None
            }
        }

        NodeKind::Varargs => Some(varargs()),

        NodeKind::Macro { body, .. } => match_word(body, word, sense, validate),

        NodeKind::Concat { first, rest, .. } => {
            match_word(first, word, sense, validate).map(|remaining_first| {
                if remaining_first.is_empty() {
                    rest.clone()
                } else {
                    concat(remaining_first, rest.clone())
                }
            })
        }

        NodeKind::Alternate { first, rest } => match_word(first, word, sense, validate)
            .or_else(|| match_word(rest, word, sense, validate)),

        NodeKind::Optional(inner) => match_word(inner, word, sense, validate),

        NodeKind::Plus { inner, min, max } => {
            match_word(inner, word, sense, validate).map(|remaining| {
                let continuation = if *max == 1 {
                    empty()
                } else {
                    let new_min = min.saturating_sub(1);
                    let new_max = if *max == 0 { 0 } else { *max - 1 };
                    plus(inner.clone(), new_min, new_max)
                };
                if remaining.is_empty() {
                    continuation
                } else {
                    concat(remaining, continuation)
                }
            })
        }
    }
}

/// `match_max(root, argv)`: consumes argv left-to-right as far as the
/// grammar allows, returning a `CONCAT` of the matched words (as
/// `FORCE_EXACT` literals) followed by the residual grammar, or `empty()`
/// if the very first word fails to match.
pub fn match_max(root: &Node, argv: &[String], validate: &dyn Validate) -> Node {
    let mut current = root.clone();
    let mut matched = Vec::new();

    for word in argv {
        match match_word(&current, word, MatchSense::Exact, validate) {
            Some(next) => {
                matched.push(matched_word(word));
                current = next;
            }
            None => break,
        }
    }

    if matched.is_empty() {
        return empty();
    }

    matched.into_iter().rev().fold(current, |tail, head| concat(head, tail))
}

/// `prefix_words(grammar, partial_word, max_out)`: every literal that can
/// legally occupy the next position, filtered by `partial_word` as a
/// (case-respecting) prefix, capped at `max_out` entries.
pub fn prefix_words(grammar: &Node, partial_word: Option<&str>, max_out: usize) -> Vec<String> {
    let mut out = Vec::new();
    collect_words(grammar, partial_word, &mut out, max_out);
    out
}

fn accepts_prefix(candidate: &str, partial: Option<&str>, case_insensitive: bool) -> bool {
    match partial {
        None => true,
        Some(p) if p.is_empty() => true,
        Some(p) => {
            if case_insensitive {
                candidate.to_ascii_lowercase().starts_with(&p.to_ascii_lowercase())
            } else {
                candidate.starts_with(p)
            }
        }
    }
}

fn push_word(out: &mut Vec<String>, word: String, max_out: usize) {
    if out.len() >= max_out || out.contains(&word) {
        return;
    }
    out.push(word);
}

fn collect_words(node: &Node, partial: Option<&str>, out: &mut Vec<String>, max_out: usize) {
    if out.len() >= max_out {
        return;
    }
    match node.kind() {
        NodeKind::Empty => {}
        NodeKind::Varargs => {
            if accepts_prefix("...", partial, false) {
                push_word(out, "...".to_string(), max_out);
            }
        }
        NodeKind::Literal(lit) => {
            let name = interner::resolve(lit.name);
            if accepts_prefix(&name, partial, lit.case_insensitive) {
                push_word(out, name, max_out);
            }
        }
        NodeKind::Concat { first, .. } => collect_words(first, partial, out, max_out),
        NodeKind::Alternate { first, rest } => {
            collect_words(first, partial, out, max_out);
            collect_words(rest, partial, out, max_out);
        }
        NodeKind::Optional(inner) => {
            collect_words(inner, partial, out, max_out);
            if accepts_prefix("", partial, false) {
                push_word(out, String::new(), max_out);
            }
        }
        NodeKind::Plus { inner, .. } => collect_words(inner, partial, out, max_out),
        NodeKind::Macro { body, .. } => collect_words(body, partial, out, max_out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::constructors::{alternate, concat, keyword, optional};
    use crate::validate::NoDatatypes;

    fn kw(name: &str) -> Node {
        keyword(name, false, false).unwrap()
    }

    fn words(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn check_matches_single_literal() {
        let g = kw("show");
        let (verdict, _) = check(&g, &words(&["show"]), &NoDatatypes);
        assert_eq!(verdict, CheckVerdict::Matched(1));
    }

    #[test]
    fn check_wants_more_on_empty_argv() {
        let g = kw("show");
        let (verdict, _) = check(&g, &[], &NoDatatypes);
        assert_eq!(verdict, CheckVerdict::WantMore(1));
    }

    #[test]
    fn check_fails_on_unknown_word() {
        let g = kw("show");
        let (verdict, _) = check(&g, &words(&["configure"]), &NoDatatypes);
        assert!(matches!(verdict, CheckVerdict::Failed { at: 0, .. }));
    }

    #[test]
    fn check_optional_may_match_zero() {
        let g = concat(kw("show"), optional(kw("detail")));
        let (verdict, _) = check(&g, &words(&["show"]), &NoDatatypes);
        assert_eq!(verdict, CheckVerdict::Matched(1));
    }

    #[test]
    fn match_max_builds_matched_prefix_and_residual() {
        let g = concat(
            kw("show"),
            alternate(kw("interface"), kw("route")),
        );
        let argv = words(&["show", "interface"]);
        let result = match_max(&g, &argv, &NoDatatypes);
        let (verdict, _) = check(&result, &[], &NoDatatypes);
        assert_eq!(verdict, CheckVerdict::Empty);
    }

    #[test]
    fn match_max_returns_empty_on_no_match() {
        let g = kw("show");
        let argv = words(&["configure"]);
        let result = match_max(&g, &argv, &NoDatatypes);
        assert!(result.is_empty());
    }

    #[test]
    fn prefix_words_respects_partial_and_case() {
        let g = alternate(kw("interface"), kw("route"));
        let words = prefix_words(&g, Some("i"), 10);
        assert_eq!(words, vec!["interface".to_string()]);
    }

    #[test]
    fn prefix_words_caps_at_max_out() {
        let g = alternate(kw("a"), alternate(kw("b"), kw("c")));
        let words = prefix_words(&g, None, 2);
        assert_eq!(words.len(), 2);
    }
}
