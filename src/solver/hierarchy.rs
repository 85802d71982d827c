//! Hierarchy walker: one declared-type view over a full linearization.
//!
//! Two ranked annotation providers back the walk. The primary store
//! evaluates textual forward references against the registry; when any name
//! in an ancestor's annotations fails to resolve, that ancestor falls back
//! wholesale to the unresolved store, which reads the same entries with
//! forwards left as [`DeclaredType::Forward`]. The fallback is silent and
//! deterministic, never exception-driven control flow at the caller.

use indexmap::IndexMap;

use crate::interner::Atom;
use crate::model::{ClassDef, ClassId, DeclaredType, RawAnnotation, Registry};

/// Ordered name -> declared-type mapping for a class and all its ancestors.
///
/// Most-derived declarations win; the first-seen position of a name is kept,
/// so iteration order is stable across calls for an unchanged class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedView {
    entries: IndexMap<Atom, DeclaredType>,
}

impl MergedView {
    pub fn get(&self, name: Atom) -> Option<DeclaredType> {
        self.entries.get(&name).copied()
    }

    pub fn contains(&self, name: Atom) -> bool {
        self.entries.contains_key(&name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Atom, DeclaredType)> + '_ {
        self.entries.iter().map(|(&name, &ty)| (name, ty))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Collect the merged declared-type view for `class`.
///
/// Walks the linearization least-derived first so that overlaying ancestors
/// lets the most-derived re-declaration win.
pub fn merged_view(registry: &Registry, class: ClassId) -> MergedView {
    let mut entries: IndexMap<Atom, DeclaredType> = IndexMap::new();
    for &ancestor in registry.linearization(class).iter().rev() {
        let def = registry.class(ancestor);
        match evaluate_primary(registry, def) {
            Ok(evaluated) => {
                for (name, ty) in evaluated {
                    entries.insert(name, ty);
                }
            }
            Err(_) => {
                // Unresolved-annotation store: same overlay rule, forwards
                // stay textual. Never surfaced.
                for (&name, &raw) in &def.annotations {
                    entries.insert(name, fallback_type(raw));
                }
            }
        }
    }
    MergedView { entries }
}

struct Unresolvable;

/// Primary annotation store: evaluate every annotation of one ancestor.
/// Fails wholesale if any textual reference does not resolve.
fn evaluate_primary(
    registry: &Registry,
    def: &ClassDef,
) -> Result<Vec<(Atom, DeclaredType)>, Unresolvable> {
    def.annotations
        .iter()
        .map(|(&name, &raw)| match raw {
            RawAnnotation::Typed(ty) => Ok((name, ty)),
            RawAnnotation::Named(type_name) => registry
                .lookup_atom(type_name)
                .map(|id| (name, DeclaredType::Class(id)))
                .ok_or(Unresolvable),
        })
        .collect()
}

fn fallback_type(raw: RawAnnotation) -> DeclaredType {
    match raw {
        RawAnnotation::Typed(ty) => ty,
        RawAnnotation::Named(type_name) => DeclaredType::Forward(type_name),
    }
}

#[cfg(test)]
#[path = "tests/hierarchy_tests.rs"]
mod tests;
