//! Core rendering functionality
//!
//! Render pipelines, per-frame GPU sync and frame rendering.

pub mod pipeline_manager;
pub mod render_engine;

pub use pipeline_manager::{PipelineConfig, PipelineManager, PipelineStats, VertexLayoutKind};
pub use render_engine::{RenderEngine, DEFAULT_CLEAR_COLOR};
