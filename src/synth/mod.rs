//! The two synthesis policies and the accessors they install.
//!
//! A synthesized accessor is the per-class capability-table entry standing
//! in for a dynamically injected property: the member table maps attribute
//! name to accessor, and the runtime engine executes it on read.

pub mod caching;
pub mod deferred;
pub mod factory;
pub mod forwarding;

pub use caching::CachingStrategy;
pub use deferred::{DeferredCell, DeferredFailure};
pub use factory::apply_composition;
pub use forwarding::{ForwardingOptions, apply_forwarding};

use std::rc::Rc;

use crate::interner::Atom;
use crate::model::{ClassId, DeclaredType};

/// A property installed at decoration time. Cloning is cheap; the deferred
/// cell and dependency map are shared, which is what makes the deferred
/// probe outcome class-scoped.
#[derive(Debug, Clone)]
pub enum Accessor {
    /// Read-only read-through: `self.<base>.<target>`.
    Forward { base: Atom, target: Atom },
    /// Read-through whose existence is proven on first access; the outcome
    /// lives in the class-scoped cell.
    Deferred {
        base: Atom,
        target: Atom,
        expected: DeclaredType,
        cell: Rc<DeferredCell>,
    },
    /// Lazily construct an instance of `class`, linked back to the
    /// composition root with `dep_map` for transitive composition.
    Factory {
        class: ClassId,
        caching: CachingStrategy,
        dep_map: Rc<[DepMapping]>,
    },
}

/// One entry of a factory's dependency map: the constructed instance's
/// declared dependency `dep` reads from the composition root's `source`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepMapping {
    pub dep: Atom,
    pub source: Atom,
}
