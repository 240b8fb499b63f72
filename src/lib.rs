//! Tessel 3D Rendering Gallery
//!
//! A gallery of interactive 3D demos built on wgpu and winit, with a Dear ImGui
//! overlay. The centrepiece is an interactive canvas for placing shapes and
//! drawing freehand tubes on a ground plane.

pub mod app;
pub mod canvas;
pub mod config;
pub mod demos;
pub mod error;
pub mod gfx;
pub mod prelude;
pub mod ui;
pub mod wgpu_utils;

pub use app::GalleryApp;
pub use config::{CanvasConfig, GalleryConfig};
pub use error::{GalleryError, Result};

