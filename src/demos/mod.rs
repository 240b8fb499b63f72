//! # Demos
//!
//! Each demo builds its scene on [`Demo::initialize`], animates it in
//! [`Demo::update`], reacts to pointer and key input, and draws its own control
//! panel. [`DemoManager`] owns the active demo and switches between them,
//! resetting the shared scene in between.

pub mod dodecahedron;
pub mod interactive_canvas;
pub mod rotating_cubes;
pub mod simple_square;
pub mod torus_cube_view;

use std::time::Instant;

use cgmath::{Deg, Vector3};
use imgui::Ui;
use log::{info, warn};
use winit::keyboard::KeyCode;

use crate::gfx::{
    camera::{OrbitCamera, OrbitCameraBounds},
    picking::{screen_to_ray, Ray},
    scene::Scene,
};

/// Id of the demo opened when nothing else is requested.
pub const DEFAULT_DEMO_ID: &str = interactive_canvas::ID;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    /// The pointer left the window.
    Leave,
}

/// Primary-button pointer input in window pixels (origin top-left).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub position: (f32, f32),
    pub viewport: (f32, f32),
    pub timestamp: Instant,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, position: (f32, f32), viewport: (f32, f32)) -> Self {
        Self {
            kind,
            position,
            viewport,
            timestamp: Instant::now(),
        }
    }

    pub fn at(mut self, timestamp: Instant) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// World-space ray under the pointer.
    pub fn ray(&self, camera: &OrbitCamera) -> Ray {
        screen_to_ray(self.position, self.viewport, camera)
    }
}

/// A gallery entry.
pub trait Demo {
    fn id(&self) -> &'static str;

    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Builds the demo's scene. Called once on a freshly reset scene.
    fn initialize(&mut self, scene: &mut Scene);

    /// Advances animation by `delta_time` seconds.
    fn update(&mut self, delta_time: f32, scene: &mut Scene);

    fn on_pointer(&mut self, _event: &PointerEvent, _scene: &mut Scene) {}

    fn on_key(&mut self, _key: KeyCode, _pressed: bool, _scene: &mut Scene) {}

    /// Called when the window loses focus; held keys must not stay held.
    fn on_focus_lost(&mut self, _scene: &mut Scene) {}

    fn render_ui(&mut self, ui: &Ui, scene: &mut Scene);

    /// Removes whatever the demo added. The manager resets the scene afterwards.
    fn cleanup(&mut self, _scene: &mut Scene) {}
}

/// Static description of a registered demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub struct DemoEntry {
    pub info: DemoInfo,
    create: fn() -> Box<dyn Demo>,
}

impl DemoEntry {
    pub fn create(&self) -> Box<dyn Demo> {
        (self.create)()
    }
}

/// Every demo in gallery order.
pub fn registry() -> Vec<DemoEntry> {
    fn entry<D: Demo + Default + 'static>() -> DemoEntry {
        let demo = D::default();
        DemoEntry {
            info: DemoInfo {
                id: demo.id(),
                name: demo.name(),
                description: demo.description(),
            },
            create: || Box::new(D::default()),
        }
    }

    vec![
        entry::<simple_square::SimpleSquare>(),
        entry::<rotating_cubes::RotatingCubes>(),
        entry::<dodecahedron::DodecahedronGestures>(),
        entry::<torus_cube_view::TorusCubeView>(),
        entry::<interactive_canvas::InteractiveCanvas>(),
    ]
}

/// Puts the camera, controller, lights and helpers back to the gallery default:
/// eye at (0, 0, 5) looking at the origin, 75 degree field of view, orbit enabled.
pub fn reset_scene(scene: &mut Scene) {
    scene.clear();
    let aspect = scene.camera_manager.camera.aspect;
    let mut camera = OrbitCamera::looking_at(Vector3::new(0.0, 0.0, 5.0), Vector3::new(0.0, 0.0, 0.0), aspect)
        .with_fovy(Deg(75.0))
        .with_bounds(OrbitCameraBounds::default());
    camera.set_home();
    camera.update_view_proj();
    scene.camera_manager.camera = camera;

    let controller = &mut scene.camera_manager.controller;
    controller.set_damping(None);
    controller.set_enabled(true);
}

/// Owns the active demo.
pub struct DemoManager {
    entries: Vec<DemoEntry>,
    active: Option<Box<dyn Demo>>,
}

impl DemoManager {
    pub fn new() -> Self {
        Self {
            entries: registry(),
            active: None,
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &DemoInfo> {
        self.entries.iter().map(|e| &e.info)
    }

    pub fn active_id(&self) -> Option<&'static str> {
        self.active.as_ref().map(|d| d.id())
    }

    /// Replaces the active demo. Unknown ids fall back to the default demo.
    pub fn switch_to(&mut self, id: &str, scene: &mut Scene) {
        let index = match self.entries.iter().position(|e| e.info.id == id) {
            Some(index) => index,
            None => {
                warn!("unknown demo '{}', opening '{}'", id, DEFAULT_DEMO_ID);
                match self.entries.iter().position(|e| e.info.id == DEFAULT_DEMO_ID) {
                    Some(index) => index,
                    None => return,
                }
            }
        };

        if let Some(mut old) = self.active.take() {
            old.cleanup(scene);
        }
        reset_scene(scene);

        let mut demo = self.entries[index].create();
        info!("opening demo '{}'", demo.name());
        demo.initialize(scene);
        self.active = Some(demo);
    }

    pub fn update(&mut self, delta_time: f32, scene: &mut Scene) {
        if let Some(demo) = &mut self.active {
            demo.update(delta_time, scene);
        }
    }

    pub fn on_pointer(&mut self, event: &PointerEvent, scene: &mut Scene) {
        if let Some(demo) = &mut self.active {
            demo.on_pointer(event, scene);
        }
    }

    pub fn on_key(&mut self, key: KeyCode, pressed: bool, scene: &mut Scene) {
        if let Some(demo) = &mut self.active {
            demo.on_key(key, pressed, scene);
        }
    }

    pub fn on_focus_lost(&mut self, scene: &mut Scene) {
        if let Some(demo) = &mut self.active {
            demo.on_focus_lost(scene);
        }
    }

    pub fn render_ui(&mut self, ui: &Ui, scene: &mut Scene) {
        if let Some(demo) = &mut self.active {
            demo.render_ui(ui, scene);
        }
    }
}

impl Default for DemoManager {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_ids_are_unique_and_in_gallery_order() {
        let ids: Vec<_> = registry().iter().map(|e| e.info.id).collect();
        assert_eq!(
            ids,
            [
                "simple-square",
                "rotating-cubes",
                "dodecahedron",
                "torus-cube-view",
                "interactive-3d-canvas-with-objects"
            ]
        );
    }

    #[test]
    fn switching_tears_down_the_previous_scene() {
        let mut scene = test_support::scene();
        let mut manager = DemoManager::new();

        manager.switch_to("torus-cube-view", &mut scene);
        assert!(!scene.overlay.objects.is_empty());

        manager.switch_to("simple-square", &mut scene);
        assert_eq!(manager.active_id(), Some("simple-square"));
        assert!(scene.overlay.objects.is_empty());
        assert_eq!(scene.objects.len(), 1);
        assert!(scene.camera_manager.controller.enabled());
    }

    #[test]
    fn unknown_id_opens_the_canvas() {
        let mut scene = test_support::scene();
        let mut manager = DemoManager::new();
        manager.switch_to("no-such-demo", &mut scene);
        assert_eq!(manager.active_id(), Some(DEFAULT_DEMO_ID));
    }

    #[test]
    fn every_demo_survives_a_frame_without_input() {
        let mut scene = test_support::scene();
        let mut manager = DemoManager::new();
        let ids: Vec<_> = manager.entries().map(|i| i.id).collect();
        for id in ids {
            manager.switch_to(id, &mut scene);
            manager.update(1.0 / 60.0, &mut scene);
            scene.update();
        }
    }
}
