//! Deferred binding state: a lazy-initialization cell with a terminal
//! failure state, distinct from "not yet attempted".
//!
//! Attribute existence is a class-shape fact, so the cell lives in the
//! accessor (class-scoped) and its outcome is shared across instances. A
//! recorded failure is permanent: later accesses reproduce the identical
//! error and are never silently retried into success - retrying would mask
//! permanently missing configuration.

use once_cell::unsync::OnceCell;

use crate::interner::Atom;

/// Why a probe failed. Enough to reconstruct the identical error on every
/// later access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeferredFailure {
    pub base: Atom,
    pub target: Atom,
}

/// One-shot probe outcome for a deferred binding.
#[derive(Debug, Default)]
pub struct DeferredCell {
    state: OnceCell<Result<(), DeferredFailure>>,
}

impl DeferredCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded outcome, or `None` when the probe has not run yet.
    pub fn state(&self) -> Option<Result<(), DeferredFailure>> {
        self.state.get().copied()
    }

    /// Record the probe outcome. First write wins; later writes are ignored.
    pub fn record(&self, outcome: Result<(), DeferredFailure>) {
        let _ = self.state.set(outcome);
    }
}
