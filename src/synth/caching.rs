//! Memoization policy for synthesized factory properties.

/// Attached to a composition root at decoration time and fixed for the
/// class's lifetime; a class-scoped constant, not per-instance state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachingStrategy {
    /// Recompute on every access: two consecutive reads of a factory
    /// property yield two distinct instances.
    #[default]
    Disabled,
    /// Compute once per instance and memoize in the instance's field map.
    /// The name records the contract: no synchronization is promised, and
    /// concurrent first access would race. This engine is single-threaded
    /// (`!Sync`), so the hazard is unrepresentable while the memoization
    /// semantics stay the same. Callers that need reconstruction per access
    /// use [`CachingStrategy::Disabled`].
    NotThreadSafe,
}
