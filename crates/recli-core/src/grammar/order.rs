//! Total order over grammar nodes (spec §4.3 "Total order on nodes").
//!
//! Grounded on `syntax.c::syntax_order`. The order must be total and
//! deterministic across runs, so the residual tiebreak uses each node's
//! content hash (stable given identical content) rather than its `Rc`
//! pointer address (which varies run to run).

use std::cmp::Ordering;

use super::node::{LiteralNode, Node, NodeKind};
use crate::interner;

pub fn compare(a: &Node, b: &Node) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }

    match (a.kind(), b.kind()) {
        (NodeKind::Varargs, NodeKind::Varargs) => Ordering::Equal,
        (NodeKind::Varargs, _) => Ordering::Less,
        (_, NodeKind::Varargs) => Ordering::Greater,

        (NodeKind::Alternate { first: f1, rest: r1 }, NodeKind::Alternate { first: f2, rest: r2 }) => {
            compare(f1, f2).then_with(|| compare(r1, r2))
        }
        (NodeKind::Alternate { .. }, _) => Ordering::Greater,
        (_, NodeKind::Alternate { .. }) => Ordering::Less,

        (NodeKind::Optional(x), NodeKind::Optional(y)) => compare(x, y),
        (NodeKind::Optional(x), _) => match compare(x, b) {
            Ordering::Equal => Ordering::Greater,
            other => other,
        },
        (_, NodeKind::Optional(y)) => match compare(a, y) {
            Ordering::Equal => Ordering::Less,
            other => other,
        },

        (
            NodeKind::Concat { first: f1, rest: r1, length: l1 },
            NodeKind::Concat { first: f2, rest: r2, length: l2 },
        ) => compare(f1, f2).then_with(|| l1.cmp(l2)).then_with(|| compare(r1, r2)),
        (NodeKind::Concat { first, .. }, _) => match compare(first, b) {
            Ordering::Equal => Ordering::Greater,
            other => other,
        },
        (_, NodeKind::Concat { first, .. }) => match compare(a, first) {
            Ordering::Equal => Ordering::Less,
            other => other,
        },

        _ => terminal_compare(a, b),
    }
}

/// Comparison between two nodes that are neither `Varargs`, `Alternate`,
/// `Optional`, nor `Concat` - i.e. `Empty`, `Literal`, `Plus`, or `Macro`.
fn terminal_compare(a: &Node, b: &Node) -> Ordering {
    match (a.kind(), b.kind()) {
        (NodeKind::Empty, NodeKind::Empty) => Ordering::Equal,
        (NodeKind::Literal(x), NodeKind::Literal(y)) => literal_compare(x, y),
        (
            NodeKind::Plus { inner: i1, min: m1, max: x1 },
            NodeKind::Plus { inner: i2, min: m2, max: x2 },
        ) => compare(i1, i2).then_with(|| m1.cmp(m2)).then_with(|| x1.cmp(x2)),
        (NodeKind::Macro { name: n1, .. }, NodeKind::Macro { name: n2, .. }) => {
            n1.as_u32().cmp(&n2.as_u32())
        }
        _ => terminal_rank(a.kind()).cmp(&terminal_rank(b.kind())).then_with(|| {
            // kinds differ but ranked equal only if same variant handled above;
            // fall back to content hash for a deterministic, if arbitrary, order.
            a.content_hash().cmp(&b.content_hash())
        }),
    }
}

fn terminal_rank(kind: &NodeKind) -> u8 {
    match kind {
        NodeKind::Empty => 0,
        NodeKind::Literal(_) => 1,
        NodeKind::Plus { .. } => 2,
        NodeKind::Macro { .. } => 3,
        _ => 4,
    }
}

/// Real keywords (no validator) sort before validator-bound (datatype)
/// literals; within a class, compare by resolved string.
fn literal_compare(x: &LiteralNode, y: &LiteralNode) -> Ordering {
    match (x.validator.is_some(), y.validator.is_some()) {
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        _ => {
            let sx = interner::resolve(x.name);
            let sy = interner::resolve(y.name);
            sx.cmp(&sy)
                .then_with(|| x.case_insensitive.cmp(&y.case_insensitive))
                .then_with(|| x.tty_required.cmp(&y.tty_required))
                .then_with(|| x.force_exact.cmp(&y.force_exact))
        }
    }
}
