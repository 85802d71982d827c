//! Definition-time API for describing a class to the registry.

use indexmap::IndexMap;
use smallvec::SmallVec;

use super::linearize::c3_merge;
use super::{ClassDef, ClassFlags, ClassId, DeclaredType, Member, RawAnnotation, Registry};
use crate::diagnostics::RegistryError;
use crate::interner::Atom;
use crate::runtime::Value;

/// Builder for a single class definition. Obtained from
/// [`Registry::define`]; nothing is recorded until [`register`](Self::register).
pub struct ClassBuilder<'r> {
    registry: &'r mut Registry,
    name: Atom,
    bases: SmallVec<[ClassId; 2]>,
    annotations: IndexMap<Atom, RawAnnotation>,
    members: IndexMap<Atom, Member>,
    flags: ClassFlags,
}

impl<'r> ClassBuilder<'r> {
    pub(crate) fn new(registry: &'r mut Registry, name: &str) -> Self {
        let name = registry.interner().intern(name);
        ClassBuilder {
            registry,
            name,
            bases: SmallVec::new(),
            annotations: IndexMap::new(),
            members: IndexMap::new(),
            flags: ClassFlags::default(),
        }
    }

    /// Add a base class. Order matters: it is the local precedence order fed
    /// into the C3 merge.
    pub fn base(mut self, base: ClassId) -> Self {
        self.bases.push(base);
        self
    }

    /// Declare an attribute with an already-evaluated type.
    pub fn annotate(mut self, attr: &str, ty: DeclaredType) -> Self {
        let attr = self.registry.interner().intern(attr);
        self.annotations.insert(attr, RawAnnotation::Typed(ty));
        self
    }

    /// Declare an attribute with a textual forward reference. The primary
    /// annotation store resolves it against the registry at walk time; until
    /// then (or if the name never registers) the fallback store reads it as
    /// [`DeclaredType::Forward`].
    pub fn annotate_name(mut self, attr: &str, type_name: &str) -> Self {
        let attr = self.registry.interner().intern(attr);
        let type_name = self.registry.interner().intern(type_name);
        self.annotations.insert(attr, RawAnnotation::Named(type_name));
        self
    }

    /// Declare an attribute whose type the engine treats as undecidable
    /// (generics, unions, protocol expressions), kept as source text.
    pub fn annotate_opaque(mut self, attr: &str, text: &str) -> Self {
        let attr = self.registry.interner().intern(attr);
        let text = self.registry.interner().intern(text);
        self.annotations
            .insert(attr, RawAnnotation::Typed(DeclaredType::Opaque(text)));
        self
    }

    /// Bind a concrete class-level value; the attribute counts as implemented.
    pub fn bind(mut self, attr: &str, value: Value) -> Self {
        let attr = self.registry.interner().intern(attr);
        self.members.insert(attr, Member::Concrete(value));
        self
    }

    /// Install an abstract placeholder. The attribute stays
    /// synthesis-eligible and blocks construction until something concrete
    /// overrides it.
    pub fn bind_abstract(mut self, attr: &str) -> Self {
        let attr = self.registry.interner().intern(attr);
        self.members.insert(attr, Member::Abstract);
        self
    }

    pub fn abstract_class(mut self) -> Self {
        self.flags |= ClassFlags::ABSTRACT;
        self
    }

    pub fn protocol(mut self) -> Self {
        self.flags |= ClassFlags::PROTOCOL;
        self
    }

    /// Seal the definition. Validates the name and bases and precomputes the
    /// C3 linearization; declarations are immutable afterwards.
    pub fn register(self) -> Result<ClassId, RegistryError> {
        let name_text = self.registry.interner().resolve(self.name);
        if self.registry.lookup_atom(self.name).is_some() {
            return Err(RegistryError::DuplicateClass(name_text));
        }
        for &base in &self.bases {
            if !self.registry.contains(base) {
                return Err(RegistryError::UnknownBase(name_text.clone()));
            }
        }

        let head = self.registry.next_id();
        let linearization = {
            let base_lins: Vec<&[ClassId]> = self
                .bases
                .iter()
                .map(|&base| self.registry.linearization(base))
                .collect();
            c3_merge(head, &self.bases, &base_lins)
                .ok_or(RegistryError::InconsistentHierarchy(name_text))?
        };

        let id = self.registry.insert_class(ClassDef {
            name: self.name,
            bases: self.bases,
            linearization,
            annotations: self.annotations,
            members: self.members,
            flags: self.flags,
            constructed: std::cell::Cell::new(0),
        });
        debug_assert_eq!(id, head);
        Ok(id)
    }
}
