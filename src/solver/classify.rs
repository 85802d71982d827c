//! Implementation classifier: declared-but-unimplemented vs. implemented.
//!
//! The tri-state of the data model (implemented / abstract-declared /
//! bare-declared) collapses here into the one question synthesis cares
//! about. Abstract placeholders are recognized by the explicit
//! [`Member::Abstract`] marker, never by naming convention, and nothing in
//! this module executes user constructors or accessors.

use crate::interner::Atom;
use crate::model::{ClassFlags, ClassId, Member, Registry};

use super::hierarchy::merged_view;

/// True iff `attr` is declared somewhere in the hierarchy and no concrete or
/// synthesized binding exists anywhere in the linearization.
///
/// Synthesized accessors count as bindings, which is what makes repeated and
/// stacked synthesis passes safe: an attribute satisfied by an earlier pass
/// is implemented for every later one.
pub fn needs_implementation(registry: &Registry, class: ClassId, attr: Atom) -> bool {
    if !merged_view(registry, class).contains(attr) {
        return false;
    }
    !has_binding(registry, class, attr)
}

/// Whether any class along the linearization binds `attr` concretely
/// (including synthesized accessors).
pub(crate) fn has_binding(registry: &Registry, class: ClassId, attr: Atom) -> bool {
    registry.linearization(class).iter().any(|&ancestor| {
        registry
            .class(ancestor)
            .members()
            .get(&attr)
            .is_some_and(Member::is_binding)
    })
}

/// Whether instances of `class` can be built: not abstract, not a protocol,
/// and no abstract placeholder left without a concrete override anywhere in
/// the linearization.
pub fn is_constructible(registry: &Registry, class: ClassId) -> bool {
    let def = registry.class(class);
    if def
        .flags
        .intersects(ClassFlags::ABSTRACT | ClassFlags::PROTOCOL)
    {
        return false;
    }
    for &ancestor in registry.linearization(class) {
        for (&attr, member) in registry.class(ancestor).members() {
            if matches!(member, Member::Abstract) && !has_binding(registry, class, attr) {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
#[path = "tests/classify_tests.rs"]
mod tests;
