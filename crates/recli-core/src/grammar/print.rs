//! Render a grammar node back to the textual grammar syntax (spec §4.2,
//! §8 testable property 4: `parse(print(g)) = g`).
//!
//! `recli-parser` owns parsing; this lives in `recli-core` because the
//! round-trip property is stated over `Node` directly and every other
//! crate that prints a grammar (session, for `-X syntax`; dispatch, for
//! cache-file rewriting) depends on `recli-core`, not `recli-parser`.

use std::fmt::Write as _;

use super::node::{HelpRank, Node, NodeKind};
use crate::interner;

pub fn print_grammar(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, &mut out, false);
    out
}

fn write_node(node: &Node, out: &mut String, nested: bool) {
    match node.kind() {
        NodeKind::Empty => {}
        NodeKind::Varargs => out.push_str("..."),
        NodeKind::Literal(lit) => {
            let name = interner::resolve(lit.name);
            out.push_str(&name);
            if lit.case_insensitive {
                out.push_str("/i");
            }
            if lit.tty_required {
                out.push_str("/t");
            }
            if let Some(rank) = lit.help_rank {
                let _ = write!(out, " {:?}", rank);
            }
        }
        NodeKind::Concat { first, rest, .. } => {
            write_node(first, out, false);
            if !rest.is_empty() {
                out.push(' ');
                write_node(rest, out, false);
            }
        }
        NodeKind::Alternate { .. } => {
            let opened = nested;
            if !opened {
                out.push('(');
            }
            write_alternate_chain(node, out);
            if !opened {
                out.push(')');
            }
        }
        NodeKind::Optional(inner) => {
            out.push('[');
            write_node(inner, out, true);
            out.push(']');
        }
        NodeKind::Plus { inner, min, max } => {
            // A multi-term `Concat` operand needs explicit grouping: the
            // suffix binds to the immediately preceding atom, so an
            // unparenthesized `a b+` reparses as `a (b+)`, not `(a b)+`.
            // `Alternate` already parenthesizes itself when printed
            // un-nested, so it needs no special-casing here.
            let needs_parens = matches!(inner.kind(), NodeKind::Concat { rest, .. } if !rest.is_empty());
            if needs_parens {
                out.push('(');
            }
            write_node(inner, out, false);
            if needs_parens {
                out.push(')');
            }
            match (*min, *max) {
                (1, 0) => out.push('+'),
                (0, 0) => out.push('*'),
                (lo, hi) => {
                    let _ = write!(out, "{{{},{}}}", lo, hi);
                }
            }
        }
        NodeKind::Macro { name, .. } => {
            out.push_str(&interner::resolve(*name));
        }
    }
}

fn write_alternate_chain(node: &Node, out: &mut String) {
    match node.kind() {
        NodeKind::Alternate { first, rest } => {
            write_node(first, out, true);
            out.push_str(" | ");
            write_alternate_chain(rest, out);
        }
        _ => write_node(node, out, true),
    }
}

impl std::fmt::Display for HelpRank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HelpRank::Long => write!(f, "#long"),
            HelpRank::Short => write!(f, "#short"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::constructors::{alternate, concat, keyword, optional, plus};

    fn kw(name: &str) -> Node {
        keyword(name, false, false).unwrap()
    }

    #[test]
    fn prints_concat_chain() {
        let g = concat(kw("show"), kw("route"));
        assert_eq!(print_grammar(&g), "show route");
    }

    #[test]
    fn prints_optional() {
        let g = concat(kw("show"), concat(kw("route"), optional(kw("detail"))));
        assert_eq!(print_grammar(&g), "show route [detail]");
    }

    #[test]
    fn prints_plus_over_concat_with_grouping() {
        let g = plus(concat(kw("a"), kw("b")), 1, 0);
        assert_eq!(print_grammar(&g), "(a b)+");
    }

    #[test]
    fn prints_plus_over_single_atom_without_grouping() {
        let g = plus(kw("a"), 1, 0);
        assert_eq!(print_grammar(&g), "a+");
    }

    #[test]
    fn prints_plus_over_alternate_with_grouping() {
        let g = plus(alternate(kw("a"), kw("b")), 0, 0);
        assert_eq!(print_grammar(&g), "(a | b)*");
    }

    #[test]
    fn prints_alternate() {
        let g = concat(
            kw("show"),
            concat(kw("interface"), alternate(kw("ethernet"), kw("wifi"))),
        );
        assert_eq!(print_grammar(&g), "show interface (ethernet | wifi)");
    }
}
