//! Browser (`wasm32`) host adapter for `element_core`.
//!
//! Wires the host-agnostic engine to a real document: [`WebHost`] implements
//! the per-element host surface over `web-sys`, [`DocumentStyleSources`]
//! supplies stylesheet discovery and injection, and [`mount`]/[`upgrade_all`]
//! turn DOM elements into live component runtimes with `MutationObserver`
//! driven attribute reactivity.
//!
//! The crate compiles on native targets so the workspace builds and tests
//! uniformly, but every entry point requires DOM objects that only exist on
//! `wasm32`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod dom_host;
mod mount;
mod style_dom;

pub use dom_host::WebHost;
pub use mount::{mount, upgrade_all, MountError, MountedElement, MOUNTED_ATTR};
pub use style_dom::{DocumentStyleSources, BUNDLE_LINK_ATTR, STYLE_LINK_ATTR};
