//! Merge (alternation with normalization) - spec §4.3 "Merge".
//!
//! Grounded on `syntax.c::syntax_alternate` + `recursive_prefix`.

use super::constructors::{concat, empty, optional};
use super::node::{Node, NodeKind};
use super::order;
use crate::error::GrammarMergeError;

/// `merge(a, b)` yields a new node such that the resulting grammar accepts
/// exactly `L(a) u L(b)`, in normal form (sorted, deduplicated,
/// prefix-factored alternation).
pub fn merge(a: &Node, b: &Node) -> Result<Node, GrammarMergeError> {
    if a == b {
        return Ok(a.clone());
    }
    let mut alts = Vec::new();
    flatten_into(a, &mut alts)?;
    flatten_into(b, &mut alts)?;
    let factored = normalize(alts);
    Ok(rebuild_alternate(factored))
}

/// Merge an arbitrary non-empty list of nodes (used when folding many
/// grammar-file lines, or many `bin/` syntax-discovery lines, into one
/// root grammar).
pub fn merge_all(nodes: impl IntoIterator<Item = Node>) -> Result<Node, GrammarMergeError> {
    let mut iter = nodes.into_iter();
    let first = match iter.next() {
        Some(n) => n,
        None => return Ok(empty()),
    };
    iter.try_fold(first, |acc, n| merge(&acc, &n))
}

fn flatten_into(node: &Node, out: &mut Vec<Node>) -> Result<(), GrammarMergeError> {
    match node.kind() {
        NodeKind::Varargs => Err(GrammarMergeError::VarargsInAlternation),
        NodeKind::Alternate { first, rest } => {
            flatten_into(first, out)?;
            flatten_into(rest, out)
        }
        _ => {
            out.push(node.clone());
            Ok(())
        }
    }
}

fn normalize(mut alts: Vec<Node>) -> Vec<Node> {
    sort_dedup(&mut alts);
    recursive_prefix(alts)
}

fn sort_dedup(alts: &mut Vec<Node>) {
    alts.sort_by(order::compare);
    alts.dedup();
}

/// O(n^2) pass: repeatedly find the longest run of adjacent alternatives
/// sharing a common one-element prefix, factor it out, recurse on the
/// merged tails, and splice the result back into the list. Multi-element
/// common prefixes emerge from the recursion: factoring tails that
/// themselves share a further one-element prefix on the next pass.
fn recursive_prefix(alts: Vec<Node>) -> Vec<Node> {
    if alts.len() <= 1 {
        return alts;
    }

    let mut result = Vec::with_capacity(alts.len());
    let mut i = 0;
    let mut changed = false;

    while i < alts.len() {
        let (head_i, _) = head_tail(&alts[i]);
        let mut j = i + 1;
        while j < alts.len() {
            let (head_j, _) = head_tail(&alts[j]);
            if head_j == head_i {
                j += 1;
            } else {
                break;
            }
        }

        if j - i >= 2 {
            let tails: Vec<Node> = alts[i..j].iter().map(|n| head_tail(n).1).collect();
            let combined_tail = combine_tails(tails);
            result.push(concat_prefix(head_i, combined_tail));
            changed = true;
        } else {
            result.push(alts[i].clone());
        }
        i = j;
    }

    if !changed {
        return result;
    }

    sort_dedup(&mut result);
    recursive_prefix(result)
}

/// Split a node into `(head, tail)`: for `Concat`, its first slot and the
/// remainder; for any other node, the node itself with an empty tail.
fn head_tail(node: &Node) -> (Node, Node) {
    match node.kind() {
        NodeKind::Concat { first, rest, .. } => (first.clone(), rest.clone()),
        _ => (node.clone(), empty()),
    }
}

fn concat_prefix(prefix: Node, tail: Node) -> Node {
    if tail.is_empty() { prefix } else { concat(prefix, tail) }
}

/// Combine the tails collected for one factored prefix. If any tail is
/// empty (the prefix alone was one of the original alternatives), the
/// combined non-empty tails are wrapped in `OPTIONAL`.
fn combine_tails(mut tails: Vec<Node>) -> Node {
    sort_dedup(&mut tails);
    if tails.len() == 1 {
        return tails.into_iter().next().unwrap();
    }

    let has_empty = tails.iter().any(Node::is_empty);
    let non_empty: Vec<Node> = tails.into_iter().filter(|t| !t.is_empty()).collect();

    let rest = if non_empty.len() == 1 {
        non_empty.into_iter().next().unwrap()
    } else {
        rebuild_alternate(recursive_prefix(non_empty))
    };

    if has_empty { optional(rest) } else { rest }
}

/// Rebuild a right-associative `ALTERNATE` chain from a sorted, deduped,
/// prefix-factored list of alternatives.
fn rebuild_alternate(mut alts: Vec<Node>) -> Node {
    match alts.len() {
        0 => empty(),
        1 => alts.pop().unwrap(),
        _ => {
            let first = alts.remove(0);
            let rest = rebuild_alternate(alts);
            super::constructors::alternate(first, rest)
        }
    }
}

/// `skip(node, k)`: the suffix of a `CONCAT` after removing `k` terminal
/// positions, or `node` itself if `k == 0`. Over-skipping a non-`CONCAT`
/// returns the empty grammar (spec §4.3 "Skip-prefix").
pub fn skip_prefix(node: &Node, k: usize) -> Node {
    if k == 0 {
        return node.clone();
    }
    match node.kind() {
        NodeKind::Concat { rest, .. } => skip_prefix(rest, k - 1),
        _ => empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::constructors::{concat, keyword};

    fn kw(name: &str) -> Node {
        keyword(name, false, false).unwrap()
    }

    #[test]
    fn merge_is_idempotent() {
        let a = kw("show");
        assert_eq!(merge(&a, &a).unwrap(), a);
    }

    #[test]
    fn merge_is_commutative() {
        let a = kw("show");
        let b = kw("configure");
        assert_eq!(merge(&a, &b).unwrap(), merge(&b, &a).unwrap());
    }

    #[test]
    fn merge_factors_common_prefix_into_alternation() {
        // "show interface ethernet" | "show interface wifi"
        //   -> "show interface (ethernet|wifi)"
        let a = concat(kw("show"), concat(kw("interface"), kw("ethernet")));
        let b = concat(kw("show"), concat(kw("interface"), kw("wifi")));
        let merged = merge(&a, &b).unwrap();

        let expected_alt = merge(&kw("ethernet"), &kw("wifi")).unwrap();
        let expected = concat(kw("show"), concat(kw("interface"), expected_alt));
        assert_eq!(merged, expected);
    }

    #[test]
    fn merge_factors_optional_tail() {
        // "show route" | "show route detail" -> "show route [detail]"
        let a = kw("route");
        let b = concat(kw("route"), kw("detail"));
        let merged = merge(&a, &b).unwrap();
        let expected = concat(kw("route"), optional(kw("detail")));
        assert_eq!(merged, expected);
    }

    #[test]
    fn merge_rejects_varargs_in_alternation() {
        let varargs = super::super::constructors::varargs();
        let err = merge(&kw("show"), &varargs).unwrap_err();
        assert_eq!(err, GrammarMergeError::VarargsInAlternation);
    }

    #[test]
    fn skip_prefix_composes() {
        let g = concat(kw("show"), concat(kw("interface"), kw("ethernet")));
        let once = skip_prefix(&g, 1);
        let twice = skip_prefix(&once, 1);
        assert_eq!(twice, skip_prefix(&g, 2));
    }
}
