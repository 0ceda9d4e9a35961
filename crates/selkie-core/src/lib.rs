#![forbid(unsafe_code)]

//! Core primitives for selkie, a headless render-orchestration pipeline for
//! diagram editors.
//!
//! Design goals:
//! - deterministic, testable behavior (cache keys and chart-type detection are
//!   pure functions of the input)
//! - runtime-agnostic async seams (no specific executor required)
//! - failures are data: engine errors are normalized into structured
//!   [`model::RenderError`] values instead of propagating across the
//!   core/UI boundary

pub mod cache;
pub mod detect;
pub mod engine;
pub mod error;
pub mod model;

pub use cache::{CacheStats, ResultCache};
pub use detect::detect_chart_type;
pub use engine::{DiagramEngine, EngineConfig, EngineError, EngineOutput, ThemePalette};
pub use error::{internal_render_error, translate_engine_error};
pub use model::{
    CacheKey, ChartType, RenderError, RenderMetadata, RenderOptions, RenderResult, RenderState,
    SUPPORTED_CHART_TYPES,
};

#[cfg(test)]
mod tests;
