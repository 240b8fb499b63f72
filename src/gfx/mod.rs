//! # Graphics
//!
//! - **Camera** ([`camera`]): orbit camera, mouse controller, overlay camera
//! - **Geometry** ([`geometry`]): procedural meshes, curves and tubes
//! - **Scene** ([`scene`]): objects, lights, grid helper and the overlay layer
//! - **Rendering** ([`rendering`]): surface, pipelines and frame passes
//! - **Resources** ([`resources`]): depth buffer and global uniforms
//! - **Picking** ([`picking`]): pointer rays against objects and planes
//! - **Gizmos** ([`gizmos`]): the orientation view cube
//!
//! Everything except [`rendering`] and the GPU halves of [`scene`] works without
//! a device, so demos can be tested headless.

pub mod camera;
pub mod color;
pub mod geometry;
pub mod gizmos;
pub mod picking;
pub mod rendering;
pub mod resources;
pub mod scene;

pub use camera::OrbitCamera;
pub use rendering::RenderEngine;
