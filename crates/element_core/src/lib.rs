//! Host-agnostic core for a catalog of declarative custom-element components.
//!
//! One [`ElementRuntime`] drives one component instance against one host
//! element through the object-safe [`ElementHost`] boundary: lifecycle
//! transitions with idempotent rendering, watched-attribute reactivity with
//! incremental updates, scoped listener teardown through a per-connection
//! cancellation scope, globally deduplicated and origin-validated stylesheet
//! loading, and a process-wide advisory diagnostics log for agent tooling.
//!
//! The browser adapter lives in `element_host_web`; native tests drive the
//! engine through [`MemoryHost`].

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod component;
pub mod context;
pub mod descriptor;
pub mod diagnostics;
pub mod host;
pub mod lifecycle;
pub mod listeners;
pub mod origin;
pub mod registry;
pub mod styles;
pub mod time;

pub use component::{AttributeChange, Component, UpdateOutcome};
pub use context::RenderCtx;
pub use descriptor::ComponentSpec;
pub use diagnostics::{DiagnosticCode, DiagnosticEntry};
pub use host::{ElementHost, EventCallback, EventView, ListenTarget, ListenerHandle, MemoryHost};
pub use lifecycle::{ElementRuntime, LifecyclePhase, RENDER_MARKER_ATTR};
pub use listeners::ListenerScope;
pub use origin::{is_relative_reference, is_same_origin, Origin};
pub use registry::{ComponentFactory, RegistryError};
pub use styles::{
    MemoryStyleSources, StyleRegistry, StyleService, StyleSources, DEFAULT_STYLE_BASE,
};
