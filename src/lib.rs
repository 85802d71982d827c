//! Declarative object-graph synthesis over a class registry.
//!
//! Classes are described to a [`Registry`] with typed attribute
//! declarations; at decoration time - class definition time, never per
//! instance - the engine decides how each declared attribute is satisfied:
//! forwarded to a nested object's attribute, constructed recursively, or
//! left alone because it is already implemented. No user code runs as a
//! side effect of decoration.
//!
//! Two policies share one resolution substrate with opposite failure
//! philosophies:
//! - [`apply_forwarding`] is reluctant: attributes it cannot prove
//!   resolvable are skipped silently, never raised on.
//! - [`apply_composition`] is greedy: every declared attribute must resolve
//!   or decoration aborts with a [`ConfigError`].
//!
//! ```
//! use reactor_di::{
//!     apply_forwarding, DeclaredType, ForwardingOptions, Object, Prim, Registry, Value,
//! };
//!
//! let mut registry = Registry::new();
//! let config = registry.define("Config").register().unwrap();
//! let service = registry
//!     .define("Service")
//!     .annotate("_config", DeclaredType::Class(config))
//!     .annotate("_host", DeclaredType::Prim(Prim::Str))
//!     .register()
//!     .unwrap();
//! apply_forwarding(&mut registry, service, "_config", ForwardingOptions::default());
//!
//! let registry = registry.into_shared();
//! let cfg = Object::construct(&registry, config).unwrap();
//! cfg.set("host", Value::str("localhost"));
//! let svc = Object::construct(&registry, service).unwrap();
//! svc.set("_config", Value::Object(cfg));
//! assert_eq!(svc.get("_host").unwrap(), Value::str("localhost"));
//! ```
//!
//! # Concurrency
//!
//! The whole engine is single-threaded by construction (`Rc`, `Cell`,
//! `RefCell`); [`Registry`] and [`Object`] are `!Sync`. Decoration takes
//! `&mut Registry`; the runtime shares an `Rc<Registry>` and mutates only
//! per-instance memoized values, class-scoped deferred probe cells and
//! construction counters.

pub mod diagnostics;
pub mod interner;
pub mod model;
pub mod runtime;
pub mod solver;
pub mod synth;

pub use diagnostics::{AccessError, ConfigError, RegistryError};
pub use interner::Atom;
pub use model::{ClassBuilder, ClassFlags, ClassId, DeclaredType, Prim, Registry};
pub use runtime::{Object, Value};
pub use solver::{
    CompatChecker, MergedView, Resolution, is_constructible, merged_view, needs_implementation,
};
pub use synth::{CachingStrategy, ForwardingOptions, apply_composition, apply_forwarding};
