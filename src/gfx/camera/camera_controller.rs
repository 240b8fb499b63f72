use log::debug;
use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, KeyEvent, MouseScrollDelta},
    keyboard::{KeyCode, PhysicalKey},
};

use super::orbit_camera::OrbitCamera;

/// Remaining motion below which damping snaps to rest.
const DAMPING_REST: f32 = 1e-5;

/// Motion requested by input but not yet applied to the camera.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct OrbitDelta {
    yaw: f32,
    pitch: f32,
    zoom: f32,
    pan: (f32, f32),
}

impl OrbitDelta {
    fn scaled(self, factor: f32) -> Self {
        Self {
            yaw: self.yaw * factor,
            pitch: self.pitch * factor,
            zoom: self.zoom * factor,
            pan: (self.pan.0 * factor, self.pan.1 * factor),
        }
    }

    fn add(&mut self, other: OrbitDelta) {
        self.yaw += other.yaw;
        self.pitch += other.pitch;
        self.zoom += other.zoom;
        self.pan.0 += other.pan.0;
        self.pan.1 += other.pan.1;
    }

    fn is_negligible(&self) -> bool {
        [self.yaw, self.pitch, self.zoom, self.pan.0, self.pan.1]
            .iter()
            .all(|v| v.abs() < DAMPING_REST)
    }

    fn apply_to(self, camera: &mut OrbitCamera) {
        if self.yaw != 0.0 {
            camera.add_yaw(self.yaw);
        }
        if self.pitch != 0.0 {
            camera.add_pitch(self.pitch);
        }
        if self.zoom != 0.0 {
            camera.add_distance(self.zoom);
        }
        if self.pan != (0.0, 0.0) {
            camera.pan(self.pan);
        }
    }
}

/// Mouse-driven orbit controls: drag rotates, shift-drag pans, wheel zooms.
pub struct CameraController {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    enabled: bool,
    damping: Option<f32>,
    pending: OrbitDelta,
    is_shift_held: bool,
    is_mouse_pressed: bool,
}

impl CameraController {
    pub fn new(rotate_speed: f32, zoom_speed: f32) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            pan_speed: 0.01,
            enabled: true,
            damping: None,
            pending: OrbitDelta::default(),
            is_shift_held: false,
            is_mouse_pressed: false,
        }
    }

    /// Spreads each input over several frames; `factor` is the share applied per frame.
    /// `None` or zero applies input immediately.
    pub fn set_damping(&mut self, factor: Option<f32>) {
        self.damping = factor.map(|f| f.clamp(0.0, 1.0)).filter(|f| *f > 0.0);
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Turns mouse control on or off. Motion still in flight is dropped when disabling.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            debug!("orbit controls {}", if enabled { "enabled" } else { "disabled" });
        }
        self.enabled = enabled;
        if !enabled {
            self.pending = OrbitDelta::default();
        }
    }

    /// Primary button state, fed from window events.
    pub fn set_mouse_pressed(&mut self, pressed: bool) {
        self.is_mouse_pressed = pressed;
    }

    /// Returns `true` when the event moved (or will move) the camera.
    pub fn process_events(&mut self, event: &DeviceEvent, camera: &mut OrbitCamera) -> bool {
        if !self.enabled {
            return false;
        }

        match event {
            DeviceEvent::MouseWheel { delta } => {
                let scroll_amount = -match delta {
                    MouseScrollDelta::LineDelta(_, scroll) => *scroll,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y: scroll, .. }) => {
                        *scroll as f32
                    }
                };
                self.push(
                    OrbitDelta {
                        zoom: scroll_amount * self.zoom_speed,
                        ..Default::default()
                    },
                    camera,
                );
                true
            }
            DeviceEvent::MouseMotion { delta } if self.is_mouse_pressed => {
                let delta = if self.is_shift_held {
                    OrbitDelta {
                        pan: (
                            -delta.0 as f32 * self.pan_speed,
                            delta.1 as f32 * self.pan_speed,
                        ),
                        ..Default::default()
                    }
                } else {
                    OrbitDelta {
                        yaw: -delta.0 as f32 * self.rotate_speed,
                        pitch: delta.1 as f32 * self.rotate_speed,
                        ..Default::default()
                    }
                };
                self.push(delta, camera);
                true
            }
            _ => false,
        }
    }

    pub fn process_keyed_events(&mut self, event: &KeyEvent, camera: &mut OrbitCamera) {
        match event {
            KeyEvent {
                physical_key: PhysicalKey::Code(KeyCode::ShiftLeft | KeyCode::ShiftRight),
                state,
                ..
            } => {
                self.is_shift_held = *state == ElementState::Pressed;
            }
            KeyEvent {
                physical_key: PhysicalKey::Code(KeyCode::KeyC),
                state: ElementState::Pressed,
                ..
            } if self.is_shift_held => {
                debug!("camera reset");
                self.pending = OrbitDelta::default();
                camera.reset_to_default();
            }
            _ => (),
        }
    }

    /// Advances damped motion by one frame.
    pub fn update(&mut self, camera: &mut OrbitCamera) {
        let Some(factor) = self.damping else {
            return;
        };
        if self.pending.is_negligible() {
            self.pending = OrbitDelta::default();
            return;
        }

        self.pending.scaled(factor).apply_to(camera);
        self.pending = self.pending.scaled(1.0 - factor);
    }

    fn push(&mut self, delta: OrbitDelta, camera: &mut OrbitCamera) {
        match self.damping {
            Some(_) => self.pending.add(delta),
            None => delta.apply_to(camera),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector3;

    fn drag(controller: &mut CameraController, camera: &mut OrbitCamera, dx: f64) -> bool {
        controller.process_events(&DeviceEvent::MouseMotion { delta: (dx, 0.0) }, camera)
    }

    #[test]
    fn drag_rotates_only_while_pressed() {
        let mut camera = OrbitCamera::new(10.0, 0.3, 0.0, Vector3::new(0.0, 0.0, 0.0), 1.0);
        let mut controller = CameraController::new(0.005, 0.1);

        assert!(!drag(&mut controller, &mut camera, 100.0));
        assert_eq!(camera.yaw, 0.0);

        controller.set_mouse_pressed(true);
        assert!(drag(&mut controller, &mut camera, 100.0));
        assert!((camera.yaw + 0.5).abs() < 1e-6);
    }

    #[test]
    fn disabled_controller_ignores_input() {
        let mut camera = OrbitCamera::new(10.0, 0.3, 0.0, Vector3::new(0.0, 0.0, 0.0), 1.0);
        let mut controller = CameraController::new(0.005, 0.1);
        controller.set_enabled(false);
        controller.set_mouse_pressed(true);

        assert!(!drag(&mut controller, &mut camera, 100.0));
        assert_eq!(camera.yaw, 0.0);
    }

    #[test]
    fn damping_spreads_motion_over_frames() {
        let mut camera = OrbitCamera::new(10.0, 0.3, 0.0, Vector3::new(0.0, 0.0, 0.0), 1.0);
        let mut controller = CameraController::new(0.01, 0.1);
        controller.set_damping(Some(0.05));
        controller.set_mouse_pressed(true);

        drag(&mut controller, &mut camera, -100.0);
        assert_eq!(camera.yaw, 0.0);

        controller.update(&mut camera);
        assert!((camera.yaw - 0.05).abs() < 1e-5);

        for _ in 0..500 {
            controller.update(&mut camera);
        }
        assert!((camera.yaw - 1.0).abs() < 1e-3);
    }

    #[test]
    fn disabling_drops_motion_in_flight() {
        let mut camera = OrbitCamera::new(10.0, 0.3, 0.0, Vector3::new(0.0, 0.0, 0.0), 1.0);
        let mut controller = CameraController::new(0.01, 0.1);
        controller.set_damping(Some(0.05));
        controller.set_mouse_pressed(true);
        drag(&mut controller, &mut camera, -100.0);

        controller.set_enabled(false);
        controller.update(&mut camera);
        assert_eq!(camera.yaw, 0.0);
    }
}
