//! # Tessel Prelude
//!
//! The types needed to write a demo or drive the canvas without the window.
//!
//! ```no_run
//! use tessel::prelude::*;
//!
//! #[derive(Default)]
//! struct Spinner;
//!
//! impl Demo for Spinner {
//!     fn id(&self) -> &'static str { "spinner" }
//!     fn name(&self) -> &'static str { "Spinner" }
//!     fn description(&self) -> &'static str { "A spinning cube" }
//!
//!     fn initialize(&mut self, scene: &mut Scene) {
//!         scene.add_procedural_object("cube", &generate_cube());
//!     }
//!
//!     fn update(&mut self, delta_time: f32, scene: &mut Scene) {
//!         if let Some(cube) = scene.object_mut("cube") {
//!             cube.rotation.y += delta_time;
//!         }
//!     }
//!
//!     fn render_ui(&mut self, ui: &Ui, _scene: &mut Scene) {
//!         ui.text("spinning");
//!     }
//! }
//! ```

pub use crate::app::GalleryApp;
pub use crate::canvas::{
    CanvasEvent, DrawnLine, InteractionController, InteractionMode, ObjectStore, PanKey, PlacedObject,
    ShapeKind,
};
pub use crate::config::{CanvasConfig, GalleryConfig};
pub use crate::demos::{Demo, DemoManager, PointerEvent, PointerEventKind};
pub use crate::error::{GalleryError, Result};

pub use crate::gfx::camera::{CameraManager, OrbitCamera, OrbitCameraBounds};
pub use crate::gfx::geometry::{
    build_line_tube, generate_box, generate_cube, generate_sphere, generate_torus, GeometryData,
};
pub use crate::gfx::scene::{Light, LightRig, Object, Scene, Shading};

pub use cgmath::{InnerSpace, Vector3, Zero};
pub use imgui::Ui;
