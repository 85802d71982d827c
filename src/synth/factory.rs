//! Greedy synthesizer: lazily-constructing factory properties.
//!
//! Every declared attribute must end up implemented, constructible, or a
//! primitive left for a forwarding pass; anything else is a configuration
//! error. Resolution runs in two phases - resolve everything, then install -
//! so a failure aborts decoration without leaving the class partially
//! synthesized. The error surfaces synchronously at decoration time, before
//! any instance of the class can exist.

use std::rc::Rc;

use tracing::debug;

use crate::diagnostics::ConfigError;
use crate::interner::Atom;
use crate::model::{ClassId, DeclaredType, Member, Registry};
use crate::solver::hierarchy::{MergedView, merged_view};
use crate::solver::resolve::{Resolution, resolve_construction};

use super::{Accessor, CachingStrategy, DepMapping};

/// Install factory properties on `class` for every declared attribute whose
/// required type is constructible. Mutates and returns the class.
///
/// Attributes satisfied by an earlier forwarding pass are implemented and
/// left alone - the cross-policy cooperation contract.
pub fn apply_composition(
    registry: &mut Registry,
    class: ClassId,
    strategy: CachingStrategy,
) -> Result<ClassId, ConfigError> {
    let view = merged_view(registry, class);
    let mut installs: Vec<(Atom, Accessor)> = Vec::new();

    for (attr, required) in view.iter() {
        match resolve_construction(registry, class, attr, required) {
            Resolution::Implemented => {}
            Resolution::Constructed { class: dep } => {
                installs.push((
                    attr,
                    Accessor::Factory {
                        class: dep,
                        caching: strategy,
                        dep_map: dependency_map(registry, dep, &view),
                    },
                ));
            }
            Resolution::Unresolved => {
                // Primitive configuration values are a forwarding pass's
                // job; leave them for it.
                if matches!(required, DeclaredType::Prim(_)) {
                    debug!(
                        class = %registry.class_name(class),
                        attr = %registry.interner().resolve(attr),
                        "composition skipping primitive attribute"
                    );
                    continue;
                }
                return Err(ConfigError::UnsatisfiedDependency {
                    class: registry.class_name(class),
                    attr: registry.interner().resolve(attr),
                    required: registry.display_type(required),
                });
            }
            // Forwarding outcomes are not produced in construction mode.
            Resolution::Forwarded { .. } | Resolution::Deferred { .. } => {}
        }
    }

    debug!(
        class = %registry.class_name(class),
        ?strategy,
        installed = installs.len(),
        "composition synthesis complete"
    );
    for (attr, accessor) in installs {
        registry
            .class_mut(class)
            .members
            .insert(attr, Member::Synthesized(accessor));
    }
    Ok(class)
}

/// Map a dependency's declared attributes onto the composition root's: a
/// direct name match first, then one leading underscore stripped
/// (`_config` reads the root's `config`). Computed from class shapes at
/// decoration time; no user code runs.
fn dependency_map(registry: &Registry, dep: ClassId, root_view: &MergedView) -> Rc<[DepMapping]> {
    let mut mappings = Vec::new();
    for (dep_attr, _) in merged_view(registry, dep).iter() {
        if root_view.contains(dep_attr) {
            mappings.push(DepMapping {
                dep: dep_attr,
                source: dep_attr,
            });
            continue;
        }
        let name = registry.interner().resolve(dep_attr);
        if let Some(stripped) = name.strip_prefix('_') {
            if let Some(source) = registry.interner().get(stripped) {
                if root_view.contains(source) {
                    mappings.push(DepMapping {
                        dep: dep_attr,
                        source,
                    });
                }
            }
        }
    }
    mappings.into()
}

#[cfg(test)]
#[path = "tests/factory_tests.rs"]
mod tests;
