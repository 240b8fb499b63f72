//! # User Interface
//!
//! Dear ImGui overlay for the gallery. [`UiManager`] glues ImGui to winit and
//! wgpu; [`gallery_panel`] is the demo picker. Each demo draws its own control
//! window through [`Demo::render_ui`](crate::demos::Demo::render_ui).
//!
//! When ImGui wants the mouse or keyboard, input is not forwarded to the demo
//! or the orbit camera.

pub mod manager;
pub mod panel;

pub use manager::UiManager;
pub use panel::gallery_panel;
