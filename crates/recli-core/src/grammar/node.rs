//! The grammar DAG node type (spec §3.1).
//!
//! A [`Node`] is a cheap, `Rc`-backed handle whose identity *is* its
//! content: two nodes built from identical content are the same `Rc`,
//! guaranteed by [`super::store::intern`]. Equality and hashing are
//! therefore pointer-based - that is the entire point of hash-consing.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::interner::Symbol;

/// Whether a help-text literal carries the long (multi-line) or short
/// (one-line) help body. A dedicated enum per the resolved open question in
/// SPEC_FULL.md §9, rather than the original's overloaded `length` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HelpRank {
    Long,
    Short,
}

/// A single-word match (spec §3.1 LITERAL), or an internal FORCE_EXACT
/// node when `force_exact` is set. FORCE_EXACT nodes bypass the keyword
/// naming invariant (§3.1 invariant 5) because they are never produced by
/// the grammar-text parser - only by `match_max` (recording matched words)
/// and by the help parser (recording help-text payloads).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LiteralNode {
    pub name: Symbol,
    pub case_insensitive: bool,
    pub tty_required: bool,
    /// Uppercase datatype name this literal delegates matching to, if any.
    pub validator: Option<Symbol>,
    pub force_exact: bool,
    pub help_rank: Option<HelpRank>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Accepts only the empty word sequence. The Rust-idiomatic stand-in
    /// for the original C store's NULL terminator: every `Concat` chain
    /// ends in `Empty` rather than an `Option<Node>`, so every grammar
    /// algorithm can stay total over `Node` without matching on `Option`
    /// at every step.
    Empty,
    Literal(LiteralNode),
    Varargs,
    /// Right-associative: `first` is never itself `Concat` (invariant 3).
    /// `length` is the total number of terminal slots remaining, including
    /// `first`.
    Concat {
        first: Node,
        rest: Node,
        length: u32,
    },
    /// Right-associative: `first` is never itself `Alternate` (invariant
    /// 2). `rest` is the tail of the alternative list: either a single
    /// non-`Alternate` node (exactly two alternatives) or another
    /// `Alternate`.
    Alternate {
        first: Node,
        rest: Node,
    },
    /// `Optional(Optional(x)) == Optional(x)` (idempotent nesting).
    Optional(Node),
    /// `min=1,max=0` is `+`; `min=0,max=0` is `*`; otherwise `{min,max}`.
    Plus {
        inner: Node,
        min: u32,
        max: u32,
    },
    /// A named macro definition, kept in the store for uniqueness
    /// bookkeeping; macro *uses* are substituted with `body` directly at
    /// parse time and never reference this node.
    Macro {
        name: Symbol,
        body: Node,
    },
}

pub(crate) struct NodeData {
    pub kind: NodeKind,
    pub content_hash: u64,
}

/// A handle into the hash-consed grammar DAG.
///
/// Clone is cheap (`Rc::clone`). Equality is pointer equality: two `Node`s
/// compare equal iff they are the same allocation, which - because of
/// hash-consing - happens iff their content was ever requested as equal.
#[derive(Clone)]
pub struct Node(pub(crate) Rc<NodeData>);

impl Node {
    pub fn kind(&self) -> &NodeKind {
        &self.0.kind
    }

    pub(crate) fn content_hash(&self) -> u64 {
        self.0.content_hash
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.kind(), NodeKind::Empty)
    }

    pub fn is_concat(&self) -> bool {
        matches!(self.kind(), NodeKind::Concat { .. })
    }

    pub fn is_alternate(&self) -> bool {
        matches!(self.kind(), NodeKind::Alternate { .. })
    }

    pub fn strong_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Rc::as_ptr(&self.0) as usize).hash(state);
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({:?})", self.kind())
    }
}
