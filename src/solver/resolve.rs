//! Attribute resolver: one outcome per declared attribute.
//!
//! Composes the walker, the classifier and the oracle. Static resolution
//! always wins over deferral; a deferred binding is produced only where
//! static proof is impossible, which - with constructor scanning excluded -
//! is exactly the "attribute may appear at runtime" cases.

use tracing::trace;

use crate::interner::Atom;
use crate::model::{ClassId, DeclaredType, Registry};

use super::classify::{has_binding, is_constructible, needs_implementation};
use super::compat::CompatChecker;
use super::hierarchy::merged_view;

/// Outcome of resolving one declared attribute. Produced once, consumed
/// once by the synthesizer that requested it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// A concrete binding already exists; never touched.
    Implemented,
    /// Read through `base` to its `target` attribute.
    Forwarded { base: Atom, target: Atom },
    /// Construct an instance of `class` lazily.
    Constructed { class: ClassId },
    /// Existence is unknowable statically; prove it on first access.
    Deferred {
        base: Atom,
        target: Atom,
        expected: DeclaredType,
    },
    /// No proof either way. The reluctant policy skips; the greedy one raises.
    Unresolved,
}

/// Forwarding mode: can `attr` be satisfied by reading `base_ref.target`?
pub fn resolve_forwarding(
    registry: &Registry,
    class: ClassId,
    attr: Atom,
    required: DeclaredType,
    base_ref: Atom,
    target: Atom,
    allow_deferred: bool,
) -> Resolution {
    if !needs_implementation(registry, class, attr) {
        return Resolution::Implemented;
    }

    // Private members of the base are never forwarded.
    if registry.interner().resolve(target).starts_with('_') {
        return Resolution::Unresolved;
    }

    let deferred = |permitted: bool| {
        if permitted {
            Resolution::Deferred {
                base: base_ref,
                target,
                expected: required,
            }
        } else {
            Resolution::Unresolved
        }
    };

    let outcome = match merged_view(registry, class).get(base_ref) {
        Some(DeclaredType::Class(base_cls)) => {
            if let Some(provided) = merged_view(registry, base_cls).get(target) {
                if CompatChecker::new(registry).is_compatible(provided, required) {
                    Resolution::Forwarded {
                        base: base_ref,
                        target,
                    }
                } else {
                    // Provably incompatible; static proof wins over deferral.
                    Resolution::Unresolved
                }
            } else if has_binding(registry, base_cls, target) {
                // Bound without an annotation; nothing to type-check against.
                Resolution::Forwarded {
                    base: base_ref,
                    target,
                }
            } else {
                // Without constructor scanning, absence is unprovable: the
                // base may gain the attribute at runtime.
                deferred(allow_deferred)
            }
        }
        // Unknown or dynamic base type.
        Some(DeclaredType::Forward(_)) | Some(DeclaredType::Opaque(_)) => deferred(allow_deferred),
        // A primitive or none-typed base cannot satisfy forwarding.
        Some(DeclaredType::Prim(_)) | Some(DeclaredType::None) => Resolution::Unresolved,
        // Base reference undeclared; it may be injected at runtime.
        None => deferred(allow_deferred),
    };

    trace!(
        class = %registry.class_name(class),
        attr = %registry.interner().resolve(attr),
        ?outcome,
        "resolved forwarding attribute"
    );
    outcome
}

/// Construction mode: can `attr` be satisfied by building `required`?
pub fn resolve_construction(
    registry: &Registry,
    class: ClassId,
    attr: Atom,
    required: DeclaredType,
) -> Resolution {
    if !needs_implementation(registry, class, attr) {
        return Resolution::Implemented;
    }
    let outcome = match required {
        DeclaredType::Class(dep) if is_constructible(registry, dep) => {
            Resolution::Constructed { class: dep }
        }
        _ => Resolution::Unresolved,
    };
    trace!(
        class = %registry.class_name(class),
        attr = %registry.interner().resolve(attr),
        ?outcome,
        "resolved construction attribute"
    );
    outcome
}

#[cfg(test)]
#[path = "tests/resolve_tests.rs"]
mod tests;
