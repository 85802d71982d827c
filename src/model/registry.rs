//! The class registry: definition, lookup, and inheritance queries.
//!
//! Decoration requires `&mut Registry`; everything at runtime goes through a
//! shared `Rc<Registry>` and the interior-mutable cells (construction
//! counters, deferred-binding cells, the interner). The registry is
//! deliberately `!Sync` - see the crate docs for the concurrency contract.

use std::rc::Rc;

use rustc_hash::FxHashMap;

use super::{ClassBuilder, ClassDef, ClassId, DeclaredType};
use crate::interner::{Atom, Interner};

pub struct Registry {
    interner: Interner,
    classes: Vec<ClassDef>,
    by_name: FxHashMap<Atom, ClassId>,
}

impl Registry {
    pub fn new() -> Self {
        Registry {
            interner: Interner::new(),
            classes: Vec::new(),
            by_name: FxHashMap::default(),
        }
    }

    /// Start defining a class. Declarations are sealed by
    /// [`ClassBuilder::register`].
    pub fn define(&mut self, name: &str) -> ClassBuilder<'_> {
        ClassBuilder::new(self, name)
    }

    /// Freeze the registry for runtime use.
    pub fn into_shared(self) -> Rc<Registry> {
        Rc::new(self)
    }

    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    pub fn lookup(&self, name: &str) -> Option<ClassId> {
        let atom = self.interner.get(name)?;
        self.lookup_atom(atom)
    }

    pub fn lookup_atom(&self, name: Atom) -> Option<ClassId> {
        self.by_name.get(&name).copied()
    }

    pub fn contains(&self, id: ClassId) -> bool {
        id.index() < self.classes.len()
    }

    pub fn class(&self, id: ClassId) -> &ClassDef {
        &self.classes[id.index()]
    }

    pub(crate) fn class_mut(&mut self, id: ClassId) -> &mut ClassDef {
        &mut self.classes[id.index()]
    }

    pub fn class_name(&self, id: ClassId) -> String {
        self.interner.resolve(self.class(id).name)
    }

    /// The precomputed C3 linearization, most-derived first. Stable for the
    /// lifetime of the class.
    pub fn linearization(&self, id: ClassId) -> &[ClassId] {
        &self.class(id).linearization
    }

    /// Nominal inheritance query: does `derived` equal or descend from `base`?
    pub fn is_derived_from(&self, derived: ClassId, base: ClassId) -> bool {
        self.linearization(derived).contains(&base)
    }

    pub fn construction_count(&self, id: ClassId) -> u64 {
        self.class(id).constructed.get()
    }

    pub(crate) fn note_construction(&self, id: ClassId) {
        let counter = &self.class(id).constructed;
        counter.set(counter.get() + 1);
    }

    /// Render an annotation for error messages and logs.
    pub fn display_type(&self, ty: DeclaredType) -> String {
        match ty {
            DeclaredType::Class(id) => self.class_name(id),
            DeclaredType::Forward(name) | DeclaredType::Opaque(name) => {
                self.interner.resolve(name)
            }
            DeclaredType::Prim(prim) => prim.name().to_string(),
            DeclaredType::None => "None".to_string(),
        }
    }

    pub(crate) fn insert_class(&mut self, def: ClassDef) -> ClassId {
        let id = ClassId(self.classes.len() as u32);
        self.by_name.insert(def.name, id);
        self.classes.push(def);
        id
    }

    pub(crate) fn next_id(&self) -> ClassId {
        ClassId(self.classes.len() as u32)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
