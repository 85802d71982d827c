//! String interning for attribute and class names.
//!
//! Names flow through the engine constantly (every classification, every
//! merged-view overlay, every runtime attribute access), so they are
//! deduplicated into `Atom`s once and compared as integers afterwards.
//! The interner is interior-mutable: runtime attribute writes may introduce
//! names that were never declared statically.

use std::cell::RefCell;

use rustc_hash::FxHashMap;

/// An interned name. Compares and hashes as a `u32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Atom(u32);

impl Atom {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Single-threaded name interner.
///
/// `intern` takes `&self` so the runtime can intern through a shared
/// `Rc<Registry>`. Not `Sync`; the whole engine is single-threaded.
#[derive(Debug, Default)]
pub struct Interner {
    inner: RefCell<InternerInner>,
}

#[derive(Debug, Default)]
struct InternerInner {
    map: FxHashMap<Box<str>, Atom>,
    strings: Vec<Box<str>>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `text`, returning its stable `Atom`.
    pub fn intern(&self, text: &str) -> Atom {
        let mut inner = self.inner.borrow_mut();
        if let Some(&atom) = inner.map.get(text) {
            return atom;
        }
        let atom = Atom(inner.strings.len() as u32);
        let owned: Box<str> = text.into();
        inner.map.insert(owned.clone(), atom);
        inner.strings.push(owned);
        atom
    }

    /// Look up an already-interned name without creating it.
    pub fn get(&self, text: &str) -> Option<Atom> {
        self.inner.borrow().map.get(text).copied()
    }

    /// The text behind an atom. Returns an owned copy; atoms are cheap,
    /// resolution is rare (error messages, prefix matching).
    pub fn resolve(&self, atom: Atom) -> String {
        self.inner.borrow().strings[atom.index()].to_string()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
