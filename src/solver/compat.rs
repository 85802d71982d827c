//! Type compatibility oracle.
//!
//! First match wins, and the default is permissive: in a code-generation
//! tool a false negative (rejecting valid wiring) costs more than a false
//! positive, which merely defers failure to ordinary type checking or first
//! use. Only provably wrong pairings are rejected.

use rustc_hash::FxHashMap;

use crate::model::{ClassFlags, ClassId, DeclaredType, Registry};

/// Compatibility checker with a per-instance query cache.
pub struct CompatChecker<'a> {
    registry: &'a Registry,
    cache: FxHashMap<(DeclaredType, DeclaredType), bool>,
}

impl<'a> CompatChecker<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        CompatChecker {
            registry,
            cache: FxHashMap::default(),
        }
    }

    /// May `provided` satisfy `required`?
    ///
    /// Rule ladder, first match wins:
    /// 1. identical annotation -> yes
    /// 2. both forward references -> yes iff the names match
    /// 3. both the none marker -> yes (covered by 1)
    /// 4. both concrete -> yes iff provided equals or descends from required;
    ///    protocols fall through to 5
    /// 5. anything else is undecidable -> yes by default
    pub fn is_compatible(&mut self, provided: DeclaredType, required: DeclaredType) -> bool {
        let key = (provided, required);
        if let Some(&cached) = self.cache.get(&key) {
            return cached;
        }
        let result = self.check(provided, required);
        self.cache.insert(key, result);
        result
    }

    fn check(&self, provided: DeclaredType, required: DeclaredType) -> bool {
        if provided == required {
            return true;
        }
        match (provided, required) {
            // Equal names were caught above; differing forwards never match.
            (DeclaredType::Forward(_), DeclaredType::Forward(_)) => false,
            (DeclaredType::Class(p), DeclaredType::Class(r)) => {
                if self.is_protocol(p) || self.is_protocol(r) {
                    // Structurally undecidable here; defer to first use.
                    return true;
                }
                self.registry.is_derived_from(p, r)
            }
            // Both concrete, no descent relation exists.
            (DeclaredType::Prim(_), DeclaredType::Prim(_))
            | (DeclaredType::Prim(_), DeclaredType::Class(_))
            | (DeclaredType::Class(_), DeclaredType::Prim(_)) => false,
            // Opaque anywhere, forward-vs-concrete, none-vs-anything.
            _ => true,
        }
    }

    fn is_protocol(&self, class: ClassId) -> bool {
        self.registry
            .class(class)
            .flags
            .contains(ClassFlags::PROTOCOL)
    }
}

#[cfg(test)]
#[path = "tests/compat_tests.rs"]
mod tests;
