//! Smart constructors for grammar nodes. Every constructor routes through
//! [`super::store::intern`], so equal content always yields the same
//! `Node` (spec §3.1 invariant 1), and enforces the node-specific normal
//! form invariants (2 and 3) by restructuring rather than trusting the
//! caller.

use super::node::{HelpRank, LiteralNode, Node, NodeKind};
use super::store::intern;
use crate::error::NamingError;
use crate::interner::{self, Symbol};

pub fn empty() -> Node {
    intern(NodeKind::Empty)
}

pub fn varargs() -> Node {
    intern(NodeKind::Varargs)
}

fn has_upper(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_uppercase())
}

fn has_lower(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_lowercase())
}

/// A real keyword (spec §3.1 invariant 5): non-empty, not all-uppercase,
/// not mixed-case. `/i` sets case-insensitive, `/t` sets tty-required in
/// the surface grammar syntax - those flags are passed in already parsed
/// out of the suffix by the caller.
pub fn keyword(
    name: &str,
    case_insensitive: bool,
    tty_required: bool,
) -> Result<Node, NamingError> {
    if name.is_empty() {
        return Err(NamingError::Empty);
    }
    let upper = has_upper(name);
    let lower = has_lower(name);
    if upper && !lower {
        return Err(NamingError::AllUppercaseReserved(name.to_owned()));
    }
    if upper && lower {
        return Err(NamingError::MixedCase(name.to_owned()));
    }
    Ok(intern(NodeKind::Literal(LiteralNode {
        name: interner::intern(name),
        case_insensitive,
        tty_required,
        validator: None,
        force_exact: false,
        help_rank: None,
    })))
}

/// A placeholder bound to a named datatype validator (spec §3.1: "a literal
/// may carry an optional attached validator"). The type name doubles as
/// the literal's display name, matching the original's `<TYPE>` rendering.
pub fn datatype_ref(type_name: &str) -> Result<Node, NamingError> {
    if type_name.is_empty() {
        return Err(NamingError::Empty);
    }
    if !has_upper(type_name) || has_lower(type_name) {
        return Err(NamingError::NotAllUppercase(type_name.to_owned()));
    }
    let sym = interner::intern(type_name);
    Ok(intern(NodeKind::Literal(LiteralNode {
        name: sym,
        case_insensitive: false,
        tty_required: false,
        validator: Some(sym),
        force_exact: false,
        help_rank: None,
    })))
}

/// A FORCE_EXACT literal recording one matched input word (used by
/// `match_max`, spec §4.3). Bypasses the keyword naming invariant because
/// it is never fed back through the grammar-text parser.
pub fn matched_word(word: &str) -> Node {
    intern(NodeKind::Literal(LiteralNode {
        name: interner::intern(word),
        case_insensitive: false,
        tty_required: false,
        validator: None,
        force_exact: true,
        help_rank: None,
    }))
}

/// A FORCE_EXACT literal carrying help-text payload (spec §4.2).
pub fn help_text(text: &str, rank: HelpRank) -> Node {
    intern(NodeKind::Literal(LiteralNode {
        name: interner::intern(text),
        case_insensitive: false,
        tty_required: false,
        validator: None,
        force_exact: true,
        help_rank: Some(rank),
    }))
}

/// `CONCAT(first, rest)`, restructured to keep `first` non-`Concat`
/// (invariant 3: strictly right-associative).
pub fn concat(first: Node, rest: Node) -> Node {
    if let NodeKind::Concat { first: inner_first, rest: inner_rest, .. } = first.kind() {
        let inner_first = inner_first.clone();
        let inner_rest = inner_rest.clone();
        return concat(inner_first, concat(inner_rest, rest));
    }
    if rest.is_empty() {
        return if first.is_empty() { empty() } else { intern(NodeKind::Concat { first, rest, length: 1 }) };
    }
    let length = 1 + terminal_span(&rest);
    intern(NodeKind::Concat { first, rest, length })
}

fn terminal_span(node: &Node) -> u32 {
    match node.kind() {
        NodeKind::Concat { length, .. } => *length,
        NodeKind::Empty => 0,
        _ => 1,
    }
}

/// `ALTERNATE(first, rest)`, restructured to keep `first` non-`Alternate`
/// (invariant 2). Callers needing full normal form (sorted, deduplicated,
/// prefix-factored) should use [`super::merge::merge`] instead - this raw
/// constructor is used internally by merge once the list is already
/// normalized.
pub fn alternate(first: Node, rest: Node) -> Node {
    if let NodeKind::Alternate { first: inner_first, rest: inner_rest } = first.kind() {
        let inner_first = inner_first.clone();
        let inner_rest = inner_rest.clone();
        return alternate(inner_first, alternate(inner_rest, rest));
    }
    intern(NodeKind::Alternate { first, rest })
}

/// `OPTIONAL(inner)`, idempotent on nested `OPTIONAL` (invariant in §3.1:
/// `OPTIONAL(OPTIONAL(x)) == OPTIONAL(x)`).
pub fn optional(inner: Node) -> Node {
    match inner.kind() {
        NodeKind::Optional(_) => inner,
        NodeKind::Empty => inner,
        _ => intern(NodeKind::Optional(inner)),
    }
}

/// `PLUS(inner, min, max)`. `min=1,max=0` is `+`; `min=0,max=0` is `*`.
pub fn plus(inner: Node, min: u32, max: u32) -> Node {
    intern(NodeKind::Plus { inner, min, max })
}

pub fn macro_def(name: &str, body: Node) -> Node {
    intern(NodeKind::Macro { name: interner::intern(name), body })
}

pub fn symbol_of(name: &str) -> Symbol {
    interner::intern(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_keyword() {
        assert_eq!(keyword("", false, false).unwrap_err(), NamingError::Empty);
    }

    #[test]
    fn rejects_all_uppercase_keyword() {
        assert!(matches!(
            keyword("SHOW", false, false).unwrap_err(),
            NamingError::AllUppercaseReserved(_)
        ));
    }

    #[test]
    fn rejects_mixed_case_keyword() {
        assert!(matches!(keyword("Show", false, false).unwrap_err(), NamingError::MixedCase(_)));
    }

    #[test]
    fn concat_flattens_nested_left_concat() {
        let a = keyword("a", false, false).unwrap();
        let b = keyword("b", false, false).unwrap();
        let c = keyword("c", false, false).unwrap();
        let left_nested = concat(concat(a.clone(), b.clone()), c.clone());
        let right_assoc = concat(a, concat(b, c));
        assert_eq!(left_nested, right_assoc);
    }

    #[test]
    fn optional_of_optional_is_idempotent() {
        let a = keyword("a", false, false).unwrap();
        let once = optional(a);
        let twice = optional(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn hash_consing_returns_identical_nodes_for_identical_content() {
        let a1 = keyword("show", false, false).unwrap();
        let a2 = keyword("show", false, false).unwrap();
        assert_eq!(a1, a2);
    }
}
