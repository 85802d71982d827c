//! Reluctant synthesizer: read-through properties over a base reference.
//!
//! Contract: absence of proof is not an error. Unresolved attributes are
//! skipped silently so another pass (or the factory synthesizer) can claim
//! them. Implementation status is re-evaluated fresh on every pass, so
//! repeated or stacked application with different base references is safe:
//! whatever an earlier pass installed counts as implemented and is never
//! overwritten.

use std::rc::Rc;

use tracing::debug;

use crate::interner::Atom;
use crate::model::{ClassId, Member, Registry};
use crate::solver::hierarchy::merged_view;
use crate::solver::resolve::{Resolution, resolve_forwarding};

use super::deferred::DeferredCell;
use super::Accessor;

/// Options for [`apply_forwarding`].
#[derive(Debug, Clone)]
pub struct ForwardingOptions {
    /// Stripped from a declared name to find the target on the base. An
    /// empty prefix selects public names instead.
    pub prefix: String,
    /// Policy switch for deferred resolution where static proof is
    /// impossible. On by default. When stacking passes over several base
    /// references, disable it on the earlier passes so unprovable
    /// attributes stay available to later ones instead of being claimed by
    /// a deferred binding against the wrong base.
    pub allow_deferred: bool,
}

impl Default for ForwardingOptions {
    fn default() -> Self {
        ForwardingOptions {
            prefix: "_".to_string(),
            allow_deferred: true,
        }
    }
}

/// Whether this pass handles `name` at all.
fn selects(name: &str, prefix: &str) -> bool {
    if prefix.is_empty() {
        // Empty prefix: only public names.
        !name.starts_with('_')
    } else {
        name.starts_with(prefix)
    }
}

/// Install read-through properties on `class` for every declared attribute
/// resolvable through `base_ref`. Mutates and returns the class. Never
/// raises.
pub fn apply_forwarding(
    registry: &mut Registry,
    class: ClassId,
    base_ref: &str,
    options: ForwardingOptions,
) -> ClassId {
    let base = registry.interner().intern(base_ref);
    let view = merged_view(registry, class);
    let mut installs: Vec<(Atom, Accessor)> = Vec::new();

    for (attr, required) in view.iter() {
        let name = registry.interner().resolve(attr);
        if !selects(&name, &options.prefix) {
            continue;
        }
        // The base reference itself is injected by other means.
        if attr == base {
            continue;
        }
        let target = registry.interner().intern(&name[options.prefix.len()..]);

        match resolve_forwarding(
            registry,
            class,
            attr,
            required,
            base,
            target,
            options.allow_deferred,
        ) {
            Resolution::Forwarded { base, target } => {
                installs.push((attr, Accessor::Forward { base, target }));
            }
            Resolution::Deferred {
                base,
                target,
                expected,
            } => {
                debug!(
                    class = %registry.class_name(class),
                    attr = %name,
                    expected = %registry.display_type(expected),
                    "installing deferred binding"
                );
                installs.push((
                    attr,
                    Accessor::Deferred {
                        base,
                        target,
                        expected,
                        cell: Rc::new(DeferredCell::new()),
                    },
                ));
            }
            Resolution::Implemented | Resolution::Unresolved => {
                debug!(
                    class = %registry.class_name(class),
                    attr = %name,
                    "forwarding pass leaving attribute alone"
                );
            }
            // Construction outcomes are not produced in forwarding mode.
            Resolution::Constructed { .. } => {}
        }
    }

    debug!(
        class = %registry.class_name(class),
        base_ref,
        installed = installs.len(),
        "forwarding synthesis complete"
    );
    for (attr, accessor) in installs {
        registry
            .class_mut(class)
            .members
            .insert(attr, Member::Synthesized(accessor));
    }
    class
}

#[cfg(test)]
#[path = "tests/forwarding_tests.rs"]
mod tests;
