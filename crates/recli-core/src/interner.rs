//! String interning for literal and macro names.
//!
//! Converts heap-allocated strings into cheap integer handles (`Symbol`).
//! Comparing two symbols is O(1) integer comparison, which matters because
//! the grammar store hashes and compares node content on every insert.

use std::cell::RefCell;
use std::collections::HashMap;

/// A lightweight handle to an interned string.
///
/// Comparing two symbols is O(1). Symbols are ordered by insertion order,
/// not lexicographically - resolve the symbol if you need string ordering.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Symbol(u32);

impl Symbol {
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }
}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

/// String interner. Deduplicates strings and returns cheap `Symbol` handles.
#[derive(Debug, Clone, Default)]
pub struct Interner {
    map: HashMap<String, Symbol>,
    strings: Vec<String>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a string, returning its `Symbol`. Returns the existing symbol
    /// if the string was already interned.
    pub fn intern(&mut self, s: &str) -> Symbol {
        if let Some(&sym) = self.map.get(s) {
            return sym;
        }

        let sym = Symbol(self.strings.len() as u32);
        self.strings.push(s.to_owned());
        self.map.insert(s.to_owned(), sym);
        sym
    }

    /// Resolve a `Symbol` back to its string.
    ///
    /// # Panics
    /// Panics if the symbol was not created by this interner.
    #[inline]
    pub fn resolve(&self, sym: Symbol) -> &str {
        &self.strings[sym.0 as usize]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

thread_local! {
    /// Process-wide (in practice: session-wide) symbol table, mirroring the
    /// single global hash table the grammar store itself uses - there is
    /// exactly one session per process (§5), so a thread-local singleton is
    /// the narrowly scoped equivalent of the original's global state.
    static INTERNER: RefCell<Interner> = RefCell::new(Interner::new());
}

/// Intern a string in the session-wide symbol table.
pub fn intern(s: &str) -> Symbol {
    INTERNER.with(|i| i.borrow_mut().intern(s))
}

/// Resolve a symbol from the session-wide symbol table.
///
/// # Panics
/// Panics if the symbol was not produced by [`intern`].
pub fn resolve(sym: Symbol) -> String {
    INTERNER.with(|i| i.borrow().resolve(sym).to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_same_string_returns_same_symbol() {
        let mut interner = Interner::new();
        let a = interner.intern("show");
        let b = interner.intern("show");
        assert_eq!(a, b);
        assert_eq!(interner.len(), 1);
    }

    #[test]
    fn distinct_strings_get_distinct_symbols() {
        let mut interner = Interner::new();
        let a = interner.intern("show");
        let b = interner.intern("route");
        assert_ne!(a, b);
        assert_eq!(interner.resolve(a), "show");
        assert_eq!(interner.resolve(b), "route");
    }
}
