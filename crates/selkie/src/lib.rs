#![forbid(unsafe_code)]

//! selkie is a headless render-orchestration pipeline for diagram editors.
//!
//! Given diagram source and options it classifies the chart type, serves
//! repeated requests from a bounded LRU + TTL cache, invokes an external
//! rendering engine behind the [`DiagramEngine`] seam, and normalizes engine
//! failures into structured errors — the public render contract never
//! returns an `Err`.
//!
//! [`RenderSession`] adds the concurrency boundary consumed by a UI:
//! successive requests are sequenced, superseded requests are discarded
//! after the fact regardless of completion order, and a single lifecycle
//! state ([`RenderState`]) is observable at any time.
//!
//! The async APIs are runtime-agnostic (no specific executor required); the
//! only suspension point is the engine call.

pub use selkie_core::*;

pub mod orchestrate;
pub mod session;

pub use orchestrate::RenderOrchestrator;
pub use session::RenderSession;
