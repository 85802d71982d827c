//! Instance-access-time behavior of synthesized accessors.
//!
//! An [`Object`] is a dynamic instance of a registered class. Attribute
//! reads follow the host descriptor protocol: a synthesized accessor found
//! along the linearization governs the name; otherwise the instance field
//! map, then concrete class-level members, then the dependency map a factory
//! installed for transitive composition. Forwarding accessors shadow
//! instance fields; deferred and factory accessors yield to them (the
//! deferred probe proves an unknown shape, and an explicit write settles
//! the question; the factory reads its own memoized value).
//!
//! Everything is `Rc`/`RefCell`/`Cell` state: single-threaded, `!Sync` by
//! construction. The only post-decoration mutation is per-instance memoized
//! factory values, the class-scoped deferred probe cells, and construction
//! counters.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::diagnostics::AccessError;
use crate::interner::Atom;
use crate::model::{ClassId, Member, Registry};
use crate::solver::classify::is_constructible;
use crate::synth::{Accessor, CachingStrategy, DeferredCell, DeferredFailure, DepMapping};

/// A runtime attribute value.
#[derive(Clone)]
pub enum Value {
    Str(Rc<str>),
    Int(i64),
    Float(f64),
    Bool(bool),
    None,
    Object(Rc<Object>),
}

impl Value {
    pub fn str(text: impl Into<Rc<str>>) -> Value {
        Value::Str(text.into())
    }

    pub fn as_object(&self) -> Option<&Rc<Object>> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }
}

/// Objects compare by identity, everything else by value.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::None, Value::None) => true,
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(text) => write!(f, "{text:?}"),
            Value::Int(value) => write!(f, "{value}"),
            Value::Float(value) => write!(f, "{value}"),
            Value::Bool(value) => write!(f, "{value}"),
            Value::None => write!(f, "None"),
            Value::Object(object) => write!(f, "<{} object>", object.class_name()),
        }
    }
}

/// A dynamic instance of a registered class.
pub struct Object {
    class: ClassId,
    registry: Rc<Registry>,
    this: Weak<Object>,
    fields: RefCell<FxHashMap<Atom, Value>>,
    /// Weak link to the composition root that constructed this instance.
    root: RefCell<Option<Weak<Object>>>,
    /// Dependency map installed by the factory that built this instance.
    dep_map: RefCell<Option<Rc<[DepMapping]>>>,
}

impl Object {
    /// Build an instance. Refuses abstract and protocol classes and classes
    /// with unimplemented abstract members; bumps the class's construction
    /// counter.
    pub fn construct(registry: &Rc<Registry>, class: ClassId) -> Result<Rc<Object>, AccessError> {
        if !is_constructible(registry, class) {
            return Err(AccessError::AbstractInstantiation {
                class: registry.class_name(class),
            });
        }
        registry.note_construction(class);
        Ok(Rc::new_cyclic(|this| Object {
            class,
            registry: Rc::clone(registry),
            this: this.clone(),
            fields: RefCell::new(FxHashMap::default()),
            root: RefCell::new(None),
            dep_map: RefCell::new(None),
        }))
    }

    pub fn class(&self) -> ClassId {
        self.class
    }

    pub fn class_name(&self) -> String {
        self.registry.class_name(self.class)
    }

    /// Write an instance attribute.
    pub fn set(&self, name: &str, value: Value) {
        let attr = self.registry.interner().intern(name);
        self.fields.borrow_mut().insert(attr, value);
    }

    /// Read an attribute, executing whatever accessor governs it.
    pub fn get(&self, name: &str) -> Result<Value, AccessError> {
        let attr = self.registry.interner().intern(name);
        self.get_atom(attr)
    }

    pub(crate) fn get_atom(&self, attr: Atom) -> Result<Value, AccessError> {
        match self.class_binding(attr) {
            // A synthesized accessor governs the name outright.
            Some(Member::Synthesized(accessor)) => self.run_accessor(attr, accessor),
            // Instance fields shadow plain class-level values.
            Some(Member::Concrete(class_value)) => {
                let instance = self.fields.borrow().get(&attr).cloned();
                Ok(instance.unwrap_or(class_value))
            }
            Some(Member::Abstract) | None => {
                let instance = self.fields.borrow().get(&attr).cloned();
                match instance {
                    Some(value) => Ok(value),
                    None => self.resolve_from_root(attr),
                }
            }
        }
    }

    /// First member *binding* along the linearization, most-derived wins.
    /// Abstract placeholders are not bindings - the classifier's contract is
    /// that a concrete binding anywhere in the hierarchy implements the
    /// attribute, so lookup must not stop at a placeholder either.
    fn class_binding(&self, attr: Atom) -> Option<Member> {
        for &ancestor in self.registry.linearization(self.class) {
            if let Some(member) = self.registry.class(ancestor).members().get(&attr) {
                if member.is_binding() {
                    return Some(member.clone());
                }
            }
        }
        None
    }

    fn run_accessor(&self, attr: Atom, accessor: Accessor) -> Result<Value, AccessError> {
        match accessor {
            Accessor::Forward { base, target } => {
                let base_value = self.get_atom(base)?;
                self.forward_through(base, &base_value, target)
            }
            Accessor::Deferred {
                base, target, cell, ..
            } => {
                // A deferred binding exists only because the class shape was
                // unknowable; an explicit instance attribute IS the shape,
                // so it wins over the probe.
                let cached = self.fields.borrow().get(&attr).cloned();
                if let Some(value) = cached {
                    return Ok(value);
                }
                self.run_deferred(attr, base, target, &cell)
            }
            Accessor::Factory {
                class,
                caching,
                dep_map,
            } => {
                if caching == CachingStrategy::NotThreadSafe {
                    let cached = self.fields.borrow().get(&attr).cloned();
                    if let Some(value) = cached {
                        return Ok(value);
                    }
                }
                let child = Object::construct(&self.registry, class)?;
                *child.root.borrow_mut() = Some(self.this.clone());
                *child.dep_map.borrow_mut() = Some(dep_map);
                trace!(
                    class = %self.class_name(),
                    attr = %self.resolve(attr),
                    dep = %child.class_name(),
                    "factory constructed dependency"
                );
                let value = Value::Object(child);
                if caching == CachingStrategy::NotThreadSafe {
                    self.fields.borrow_mut().insert(attr, value.clone());
                }
                Ok(value)
            }
        }
    }

    fn run_deferred(
        &self,
        attr: Atom,
        base: Atom,
        target: Atom,
        cell: &DeferredCell,
    ) -> Result<Value, AccessError> {
        match cell.state() {
            // Existence already proven for this class shape; read through.
            Some(Ok(())) => {
                let base_value = self.get_atom(base)?;
                self.forward_through(base, &base_value, target)
            }
            Some(Err(failure)) => Err(self.deferred_error(attr, failure)),
            None => {
                // One-time probe. A missing base reference is an ordinary
                // access error and does not consume it.
                let base_value = self.get_atom(base)?;
                let Some(base_object) = base_value.as_object() else {
                    return Err(AccessError::NotAnObject {
                        class: self.class_name(),
                        attr: self.resolve(base),
                    });
                };
                match base_object.get_atom(target) {
                    Ok(value) => {
                        cell.record(Ok(()));
                        Ok(value)
                    }
                    Err(AccessError::Missing { .. }) => {
                        let failure = DeferredFailure { base, target };
                        cell.record(Err(failure));
                        Err(self.deferred_error(attr, failure))
                    }
                    // Nested failures propagate without consuming the probe.
                    Err(other) => Err(other),
                }
            }
        }
    }

    fn forward_through(
        &self,
        base: Atom,
        base_value: &Value,
        target: Atom,
    ) -> Result<Value, AccessError> {
        match base_value.as_object() {
            Some(base_object) => base_object.get_atom(target),
            None => Err(AccessError::NotAnObject {
                class: self.class_name(),
                attr: self.resolve(base),
            }),
        }
    }

    /// Transitive composition: read a mapped dependency from the
    /// composition root and keep the value.
    fn resolve_from_root(&self, attr: Atom) -> Result<Value, AccessError> {
        let mapping = self
            .dep_map
            .borrow()
            .as_ref()
            .and_then(|map| map.iter().find(|m| m.dep == attr).copied());
        if let Some(mapping) = mapping {
            let root = self.root.borrow().as_ref().and_then(Weak::upgrade);
            let Some(root) = root else {
                return Err(AccessError::RootGone {
                    class: self.class_name(),
                    attr: self.resolve(attr),
                });
            };
            let value = root.get_atom(mapping.source)?;
            self.fields.borrow_mut().insert(attr, value.clone());
            return Ok(value);
        }
        Err(AccessError::Missing {
            class: self.class_name(),
            attr: self.resolve(attr),
        })
    }

    fn deferred_error(&self, attr: Atom, failure: DeferredFailure) -> AccessError {
        AccessError::DeferredUnresolvable {
            class: self.class_name(),
            attr: self.resolve(attr),
            base: self.resolve(failure.base),
            target: self.resolve(failure.target),
        }
    }

    fn resolve(&self, atom: Atom) -> String {
        self.registry.interner().resolve(atom)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("class", &self.class_name())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "tests/object_tests.rs"]
mod tests;
