//! Error types for the three failure surfaces: class definition, class
//! decoration, and instance attribute access.
//!
//! Annotation retrieval failures are not represented here at all; the
//! hierarchy walker recovers from them locally and never surfaces them.

use thiserror::Error;

/// Definition-time failures raised by [`crate::model::Registry`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("class `{0}` is already defined")]
    DuplicateClass(String),

    #[error("base class of `{0}` is not registered in this registry")]
    UnknownBase(String),

    /// The C3 merge over the base lists has no consistent order.
    #[error("cannot linearize `{0}`: inconsistent hierarchy")]
    InconsistentHierarchy(String),
}

/// Decoration-time failure raised only by the greedy factory synthesizer.
///
/// Fatal: decoration of the class aborts with nothing installed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unsatisfied dependency `{attr}` on `{class}`: `{required}` is not constructible")]
    UnsatisfiedDependency {
        class: String,
        attr: String,
        required: String,
    },
}

/// Instance-access-time failures raised by synthesized accessors and plain
/// attribute lookup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("`{class}` object has no attribute `{attr}`")]
    Missing { class: String, attr: String },

    /// The deferred binding's one-time probe found the target absent.
    /// Permanent: every later access reproduces this exact error.
    #[error(
        "deferred forwarding `{class}.{attr}` is permanently unresolved: \
         `{base}` has no attribute `{target}`"
    )]
    DeferredUnresolvable {
        class: String,
        attr: String,
        base: String,
        target: String,
    },

    #[error("`{class}.{attr}` is not an object and cannot forward attributes")]
    NotAnObject { class: String, attr: String },

    #[error("cannot construct `{class}`: abstract or protocol classes have no instances")]
    AbstractInstantiation { class: String },

    /// A transitive dependency tried to read from its composition root after
    /// the root was dropped.
    #[error("composition root of `{class}` was dropped before `{attr}` was resolved")]
    RootGone { class: String, attr: String },
}
