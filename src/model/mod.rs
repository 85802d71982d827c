//! The host type system modeled as data.
//!
//! The engine never reflects over live objects; classes are described to a
//! [`Registry`] up front and everything downstream (walking, classification,
//! compatibility, synthesis) is pure metadata work over these definitions.
//!
//! Declarations are immutable once a class is registered. The only
//! post-registration mutation is synthesis: the two synthesizers install
//! [`Member::Synthesized`] entries into a class's member table.

pub mod builder;
pub mod linearize;
pub mod registry;

pub use builder::ClassBuilder;
pub use registry::Registry;

use std::cell::Cell;

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::interner::Atom;
use crate::runtime::Value;
use crate::synth::Accessor;

/// Index of a class in its [`Registry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(pub(crate) u32);

impl ClassId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Host primitive kinds. Concrete for compatibility purposes, but never
/// constructible as dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prim {
    Str,
    Int,
    Float,
    Bool,
    Bytes,
}

impl Prim {
    pub fn name(self) -> &'static str {
        match self {
            Prim::Str => "str",
            Prim::Int => "int",
            Prim::Float => "float",
            Prim::Bool => "bool",
            Prim::Bytes => "bytes",
        }
    }
}

/// An evaluated attribute annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclaredType {
    /// Concrete class reference.
    Class(ClassId),
    /// Name-only forward reference that did not resolve.
    Forward(Atom),
    /// Host primitive.
    Prim(Prim),
    /// Explicit none marker.
    None,
    /// Anything undecidable: generics, unions, protocol expressions kept as
    /// their source text.
    Opaque(Atom),
}

/// What the builder records before evaluation. `Named` annotations are
/// resolved against the registry by the primary annotation store; the
/// fallback store leaves them as [`DeclaredType::Forward`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawAnnotation {
    Typed(DeclaredType),
    Named(Atom),
}

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ClassFlags: u8 {
        /// Explicitly abstract; never constructible.
        const ABSTRACT = 1 << 0;
        /// Structural interface; never constructible, compatibility-undecidable.
        const PROTOCOL = 1 << 1;
    }
}

/// A class-level binding for an attribute name.
#[derive(Debug, Clone)]
pub enum Member {
    /// Concrete binding; the attribute is implemented.
    Concrete(Value),
    /// Abstract placeholder. Declared, but still synthesis-eligible.
    Abstract,
    /// Property installed by a synthesizer. Counts as implemented for every
    /// later pass.
    Synthesized(Accessor),
}

impl Member {
    /// Whether this member implements the attribute. Abstract placeholders
    /// do not.
    pub fn is_binding(&self) -> bool {
        !matches!(self, Member::Abstract)
    }
}

/// A registered class. Field order mirrors definition order throughout so
/// iteration is deterministic.
#[derive(Debug)]
pub struct ClassDef {
    pub name: Atom,
    pub bases: SmallVec<[ClassId; 2]>,
    /// C3 linearization, most-derived first. Computed once at registration.
    pub(crate) linearization: SmallVec<[ClassId; 4]>,
    pub annotations: IndexMap<Atom, RawAnnotation>,
    pub(crate) members: IndexMap<Atom, Member>,
    pub flags: ClassFlags,
    /// Instances constructed so far.
    pub(crate) constructed: Cell<u64>,
}

impl ClassDef {
    /// The member table, including synthesized accessors.
    pub fn members(&self) -> &IndexMap<Atom, Member> {
        &self.members
    }
}
