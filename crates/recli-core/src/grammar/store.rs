//! The content-addressed hash-cons store (spec §3.1 invariants 1 and 4).
//!
//! Grounded on `syntax.c`'s global `syntax_hash`/`syntax_insert`/refcount
//! table; kept thread-local rather than behind a `Mutex` because the
//! session is single-threaded by design (spec §5) - a lock here would
//! misrepresent the concurrency model to a reader.
//!
//! Liveness is not tracked explicitly: the store holds only `Weak`
//! references, so a node disappears from the store exactly when its last
//! `Rc` clone (held by some other node's child slot, a context frame, or a
//! local) is dropped. This realizes "every live node is reachable from the
//! global hash table; refcount >= 1" without manual bookkeeping.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use super::node::{HelpRank, LiteralNode, Node, NodeData, NodeKind};

thread_local! {
    static STORE: RefCell<HashMap<u64, Vec<Weak<NodeData>>>> = RefCell::new(HashMap::new());
}

const FNV_OFFSET: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

fn fnv_mix(mut hash: u64, byte: u8) -> u64 {
    hash ^= byte as u64;
    hash.wrapping_mul(FNV_PRIME)
}

fn fnv_mix_u64(hash: u64, value: u64) -> u64 {
    value.to_le_bytes().iter().fold(hash, |h, &b| fnv_mix(h, b))
}

fn fnv_mix_u32(hash: u64, value: u32) -> u64 {
    fnv_mix_u64(hash, value as u64)
}

fn fnv_mix_bool(hash: u64, value: bool) -> u64 {
    fnv_mix(hash, value as u8)
}

/// Shallow content hash: children contribute their already-computed
/// `content_hash`, never their own recursive structure. This is valid only
/// because children are themselves hash-consed, so their `content_hash`
/// uniquely identifies their full subtree.
fn hash_kind(kind: &NodeKind) -> u64 {
    let h = FNV_OFFSET;
    match kind {
        NodeKind::Empty => fnv_mix(h, 0),
        NodeKind::Literal(lit) => {
            let h = fnv_mix(h, 1);
            let h = fnv_mix_u32(h, lit.name.as_u32());
            let h = fnv_mix_bool(h, lit.case_insensitive);
            let h = fnv_mix_bool(h, lit.tty_required);
            let h = fnv_mix_bool(h, lit.force_exact);
            let h = match lit.validator {
                Some(s) => fnv_mix_u32(fnv_mix(h, 1), s.as_u32()),
                None => fnv_mix(h, 0),
            };
            match lit.help_rank {
                Some(HelpRank::Long) => fnv_mix(h, 1),
                Some(HelpRank::Short) => fnv_mix(h, 2),
                None => fnv_mix(h, 0),
            }
        }
        NodeKind::Varargs => fnv_mix(h, 2),
        NodeKind::Concat { first, rest, length } => {
            let h = fnv_mix(h, 3);
            let h = fnv_mix_u64(h, first.content_hash());
            let h = fnv_mix_u64(h, rest.content_hash());
            fnv_mix_u32(h, *length)
        }
        NodeKind::Alternate { first, rest } => {
            let h = fnv_mix(h, 4);
            let h = fnv_mix_u64(h, first.content_hash());
            fnv_mix_u64(h, rest.content_hash())
        }
        NodeKind::Optional(inner) => {
            let h = fnv_mix(h, 5);
            fnv_mix_u64(h, inner.content_hash())
        }
        NodeKind::Plus { inner, min, max } => {
            let h = fnv_mix(h, 6);
            let h = fnv_mix_u64(h, inner.content_hash());
            let h = fnv_mix_u32(h, *min);
            fnv_mix_u32(h, *max)
        }
        NodeKind::Macro { name, body } => {
            let h = fnv_mix(h, 7);
            let h = fnv_mix_u32(h, name.as_u32());
            fnv_mix_u64(h, body.content_hash())
        }
    }
}

fn same_content(a: &NodeKind, b: &NodeKind) -> bool {
    use NodeKind::*;
    match (a, b) {
        (Empty, Empty) => true,
        (Literal(x), Literal(y)) => x == y,
        (Varargs, Varargs) => true,
        (
            Concat { first: f1, rest: r1, length: l1 },
            Concat { first: f2, rest: r2, length: l2 },
        ) => l1 == l2 && f1 == f2 && r1 == r2,
        (Alternate { first: f1, rest: r1 }, Alternate { first: f2, rest: r2 }) => {
            f1 == f2 && r1 == r2
        }
        (Optional(x), Optional(y)) => x == y,
        (
            Plus { inner: i1, min: m1, max: x1 },
            Plus { inner: i2, min: m2, max: x2 },
        ) => i1 == i2 && m1 == m2 && x1 == x2,
        (Macro { name: n1, body: b1 }, Macro { name: n2, body: b2 }) => n1 == n2 && b1 == b2,
        _ => false,
    }
}

/// Intern `kind`, returning the canonical `Node` for this content. Repeated
/// calls with structurally identical content return the same `Rc`
/// (invariant 1).
pub(crate) fn intern(kind: NodeKind) -> Node {
    let hash = hash_kind(&kind);
    STORE.with(|store| {
        let mut store = store.borrow_mut();
        let bucket = store.entry(hash).or_default();
        bucket.retain(|weak| weak.strong_count() > 0);
        for weak in bucket.iter() {
            if let Some(existing) = weak.upgrade() {
                if same_content(&existing.kind, &kind) {
                    return Node(existing);
                }
            }
        }
        let data = Rc::new(NodeData { kind, content_hash: hash });
        bucket.push(Rc::downgrade(&data));
        Node(data)
    })
}

/// Number of distinct live nodes currently reachable from the store. Used
/// by the refcount-balance test (spec §8 invariant 8).
pub fn live_count() -> usize {
    STORE.with(|store| {
        let mut store = store.borrow_mut();
        store.retain(|_, bucket| {
            bucket.retain(|weak| weak.strong_count() > 0);
            !bucket.is_empty()
        });
        store.values().map(Vec::len).sum()
    })
}
