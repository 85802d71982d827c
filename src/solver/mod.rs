//! The shared resolution substrate.
//!
//! Both synthesis policies consume the same three questions, composed by the
//! attribute resolver:
//! - what does the full hierarchy declare? ([`hierarchy`])
//! - is a declared attribute already implemented? ([`classify`])
//! - may a candidate type satisfy a required type? ([`compat`])
//!
//! Everything here is pure in-memory metadata work: no I/O, no user code
//! execution, bounded by hierarchy size.

pub mod classify;
pub mod compat;
pub mod hierarchy;
pub mod resolve;

pub use classify::{is_constructible, needs_implementation};
pub use compat::CompatChecker;
pub use hierarchy::{MergedView, merged_view};
pub use resolve::{Resolution, resolve_construction, resolve_forwarding};
