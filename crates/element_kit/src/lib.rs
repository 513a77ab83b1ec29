//! Exemplar components over `element_core`.
//!
//! Three thin consumers standing in for the full catalog at its interface
//! boundary: [`Badge`] (enumerated variant, re-render fallback), [`Toggle`]
//! (scoped listener, emitted event, incremental update), and [`Stack`]
//! (layout containment, attribute reflection, no stylesheet). Together they
//! exercise the whole core surface a catalog component may touch.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod badge;
mod stack;
mod toggle;

pub use badge::{Badge, BADGE_SPEC, BADGE_VARIANTS};
pub use stack::{Stack, STACK_DIRECTIONS, STACK_SPEC};
pub use toggle::{Toggle, TOGGLE_CHANGE_EVENT, TOGGLE_SPEC};

use element_core::{registry, Component, RegistryError};

/// Registers every kit component. Idempotent; safe to call from independent
/// bundles.
///
/// # Errors
///
/// Propagates [`RegistryError`] from the registry; with the constant specs in
/// this crate it cannot fail in practice.
pub fn register_all() -> Result<(), RegistryError> {
    registry::register(&BADGE_SPEC, || Box::new(Badge) as Box<dyn Component>)?;
    registry::register(&TOGGLE_SPEC, || Box::new(Toggle) as Box<dyn Component>)?;
    registry::register(&STACK_SPEC, || Box::new(Stack) as Box<dyn Component>)?;
    Ok(())
}
