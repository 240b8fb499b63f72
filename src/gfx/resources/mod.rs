//! GPU resource management
//!
//! Depth buffers and the global uniform bindings shared by every pipeline.

pub mod global_bindings;
pub mod texture_resource;

pub use global_bindings::{GlobalBindings, GlobalUBO, GlobalUBOContent, LightUniform};
pub use texture_resource::TextureResource;
