//! Window, event loop and per-frame driving of the active demo.

use cgmath::Vector3;
use log::{error, info};
use std::{sync::Arc, time::Instant};
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{DeviceEvent, DeviceId, ElementState, Event, KeyEvent, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    config::GalleryConfig,
    demos::{DemoManager, PointerEvent, PointerEventKind, DEFAULT_DEMO_ID},
    error::{GalleryError, Result},
    gfx::{
        camera::{CameraController, CameraManager, OrbitCamera},
        rendering::RenderEngine,
        scene::Scene,
    },
    ui::{gallery_panel, UiManager},
};

/// The gallery application. Build it with [`GalleryApp::new`], then [`GalleryApp::run`].
pub struct GalleryApp {
    event_loop: EventLoop<()>,
    state: AppState,
}

struct AppState {
    config: GalleryConfig,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    scene: Scene,
    demos: DemoManager,
    cursor: Option<(f32, f32)>,
    last_frame: Instant,
    /// First fatal error raised inside a winit callback.
    failure: Option<GalleryError>,
}

impl GalleryApp {
    pub fn new(config: GalleryConfig) -> Result<Self> {
        let event_loop = EventLoop::new()?;

        let aspect = config.width as f32 / config.height.max(1) as f32;
        let camera = OrbitCamera::looking_at(Vector3::new(0.0, 0.0, 5.0), Vector3::new(0.0, 0.0, 0.0), aspect);
        let controller = CameraController::new(0.005, 0.1);
        let scene = Scene::new(CameraManager::new(camera, controller), config.width, config.height);

        Ok(Self {
            event_loop,
            state: AppState {
                config,
                window: None,
                render_engine: None,
                ui_manager: None,
                scene,
                demos: DemoManager::new(),
                cursor: None,
                last_frame: Instant::now(),
                failure: None,
            },
        })
    }

    /// Runs until the window closes or a fatal error occurs.
    pub fn run(mut self) -> Result<()> {
        self.event_loop.set_control_flow(ControlFlow::Poll);
        self.event_loop.run_app(&mut self.state)?;

        match self.state.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: GalleryError) {
        error!("{}", err);
        if self.failure.is_none() {
            self.failure = Some(err);
        }
        event_loop.exit();
    }

    fn viewport(&self) -> (f32, f32) {
        let camera = &self.scene.overlay.camera;
        (camera.width, camera.height)
    }

    fn pointer(&mut self, kind: PointerEventKind, position: (f32, f32)) {
        let event = PointerEvent::new(kind, position, self.viewport());
        self.demos.on_pointer(&event, &mut self.scene);
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attributes = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(event_loop.create_window(attributes)?);

        let (width, height): (u32, u32) = window.inner_size().into();
        let renderer = pollster::block_on(RenderEngine::new(window.clone(), width, height))?;
        let ui_manager = UiManager::new(renderer.device(), renderer.queue(), renderer.surface_format(), &window);

        self.scene.resize(width, height);
        let start = self.config.start_demo.clone();
        self.demos
            .switch_to(start.as_deref().unwrap_or(DEFAULT_DEMO_ID), &mut self.scene);

        self.window = Some(window);
        self.render_engine = Some(renderer);
        self.ui_manager = Some(ui_manager);
        self.last_frame = Instant::now();
        info!("window ready ({}x{})", width, height);
        Ok(())
    }

    fn redraw(&mut self) -> Result<()> {
        let (Some(window), Some(render_engine), Some(ui_manager)) =
            (self.window.as_ref(), self.render_engine.as_mut(), self.ui_manager.as_mut())
        else {
            return Ok(());
        };

        let now = Instant::now();
        let delta_time = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.demos.update(delta_time, &mut self.scene);
        self.scene.update();

        let demos = &mut self.demos;
        let scene = &mut self.scene;
        let stats = scene.statistics();
        ui_manager.update_logic(window, |ui| {
            demos.render_ui(ui, scene);
            if let Some(id) = gallery_panel(ui, demos, stats) {
                demos.switch_to(id, scene);
            }
        });

        render_engine.sync_scene(&mut self.scene);
        render_engine.render_frame(
            &self.scene,
            Some(|device: &wgpu::Device, queue: &wgpu::Queue, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView| {
                ui_manager.render_display_only(device, queue, encoder, view);
            }),
        )
    }

    fn keyboard(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        let pressed = event.state == ElementState::Pressed;
        if code == KeyCode::Escape && pressed {
            event_loop.exit();
            return;
        }
        self.scene.camera_manager.process_keyboard_event(event);
        if !event.repeat {
            self.demos.on_key(code, pressed, &mut self.scene);
        }
    }
}

/// The key a release event lets go of.
fn released_key(key: PhysicalKey, state: ElementState) -> Option<KeyCode> {
    match (key, state) {
        (PhysicalKey::Code(code), ElementState::Released) => Some(code),
        _ => None,
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.init_window(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(window) = self.window.clone() else {
            return;
        };

        if let Some(ui_manager) = self.ui_manager.as_mut() {
            let ui_event: Event<()> = Event::WindowEvent {
                window_id,
                event: event.clone(),
            };
            if ui_manager.handle_input(&window, &ui_event) {
                // Releases still reach the scene so nothing stays held behind the UI.
                match &event {
                    WindowEvent::MouseInput { state: ElementState::Released, .. } => {
                        self.scene.camera_manager.controller.set_mouse_pressed(false);
                    }
                    WindowEvent::KeyboardInput { event: key_event, .. } => {
                        if let Some(code) = released_key(key_event.physical_key, key_event.state) {
                            self.scene.camera_manager.process_keyboard_event(key_event);
                            self.demos.on_key(code, false, &mut self.scene);
                        }
                    }
                    _ => (),
                }
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
                self.scene.resize(width, height);
            }
            WindowEvent::KeyboardInput { event, .. } => self.keyboard(event_loop, &event),
            WindowEvent::Focused(false) => self.demos.on_focus_lost(&mut self.scene),
            WindowEvent::CursorMoved { position, .. } => {
                let position = (position.x as f32, position.y as f32);
                self.cursor = Some(position);
                self.pointer(PointerEventKind::Move, position);
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                self.scene.camera_manager.controller.set_mouse_pressed(false);
                self.pointer(PointerEventKind::Leave, (0.0, 0.0));
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                let pressed = state == ElementState::Pressed;
                self.scene.camera_manager.controller.set_mouse_pressed(pressed);
                if let Some(position) = self.cursor {
                    let kind = if pressed {
                        PointerEventKind::Down
                    } else {
                        PointerEventKind::Up
                    };
                    self.pointer(kind, position);
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(err) = self.redraw() {
                    self.fail(event_loop, err);
                }
            }
            _ => (),
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        if let Some(ui_manager) = self.ui_manager.as_ref() {
            if ui_manager.wants_mouse() {
                return;
            }
        }
        self.scene.camera_manager.process_event(&event);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demos::test_support;
    use winit::keyboard::NativeKeyCode;

    #[test]
    fn only_releases_of_known_keys_pass_the_ui() {
        assert_eq!(
            released_key(PhysicalKey::Code(KeyCode::ArrowUp), ElementState::Released),
            Some(KeyCode::ArrowUp)
        );
        assert_eq!(released_key(PhysicalKey::Code(KeyCode::ArrowUp), ElementState::Pressed), None);
        assert_eq!(
            released_key(PhysicalKey::Unidentified(NativeKeyCode::Unidentified), ElementState::Released),
            None
        );
    }

    #[test]
    fn arrow_released_under_the_ui_stops_the_pan() {
        let mut scene = test_support::scene();
        let mut demos = DemoManager::new();
        demos.switch_to(DEFAULT_DEMO_ID, &mut scene);

        demos.on_key(KeyCode::ArrowLeft, true, &mut scene);
        // The release arrives while ImGui owns the keyboard.
        if let Some(code) = released_key(PhysicalKey::Code(KeyCode::ArrowLeft), ElementState::Released) {
            demos.on_key(code, false, &mut scene);
        }

        let before = scene.camera_manager.camera.eye;
        demos.update(0.1, &mut scene);
        assert_eq!(scene.camera_manager.camera.eye, before);
    }
}
