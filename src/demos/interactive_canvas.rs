//! # Interactive 3D Canvas With Objects
//!
//! Hosts an [`InteractionController`] on a ground plane: clean clicks place
//! shapes, drags in draw mode capture freehand tubes, arrow keys pan the camera.
//! The controller's store is the single source of truth; this demo mirrors it
//! into scene objects named after the store ids (`obj-<n>`, `line-<n>`).

use cgmath::{Deg, Vector3};
use imgui::Ui;
use log::{debug, info};
use winit::keyboard::KeyCode;

use super::{Demo, PointerEvent, PointerEventKind};
use crate::{
    canvas::{CanvasEvent, InteractionController, LineId, ObjectId, PanKey, ShapeKind},
    config::CanvasConfig,
    gfx::{
        camera::{OrbitCamera, OrbitCameraBounds},
        color::{color_from_position, RED},
        geometry::{
            build_line_tube, generate_box, generate_sphere, generate_star, generate_tetrahedron,
            generate_torus, GeometryData,
        },
        picking::ground_hit,
        scene::{GridHelper, Light, LightRig, Object, Scene},
    },
};

pub const ID: &str = "interactive-3d-canvas-with-objects";

const OBJECT_PREFIX: &str = "obj-";
const LINE_PREFIX: &str = "line-";

/// Mesh of a placed shape, centred on its origin.
pub fn shape_geometry(kind: ShapeKind) -> GeometryData {
    match kind {
        ShapeKind::Triangle => generate_tetrahedron(0.8),
        ShapeKind::Cube => generate_box(1.0, 1.0, 1.0),
        ShapeKind::Sphere => generate_sphere(0.5, 32, 32),
        ShapeKind::Star => generate_star(5, 0.6, 0.3, 0.3),
        ShapeKind::Torus => generate_torus(0.5, 0.25, 16, 100),
    }
}

pub struct InteractiveCanvas {
    controller: InteractionController,
    /// Slider value, kept here so the slider can show it while not drawing.
    thickness: u8,
}

impl Default for InteractiveCanvas {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl InteractiveCanvas {
    pub fn new(config: CanvasConfig) -> Self {
        let controller = InteractionController::new(config);
        let thickness = controller.store().line_thickness();
        Self {
            controller,
            thickness,
        }
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    fn apply_orbit(&self, scene: &mut Scene) {
        scene
            .camera_manager
            .controller
            .set_enabled(self.controller.orbit_enabled());
    }

    fn sync_object(&self, id: ObjectId, scene: &mut Scene) {
        let Some(placed) = self.controller.store().object(id) else {
            return;
        };
        let object = Object::new(id.to_string(), &shape_geometry(placed.kind))
            .with_position(Vector3::from(placed.position))
            .with_color(color_from_position(placed.position));
        scene.add_object(object);
    }

    /// Rebuilds the tube of line `id` from its current points.
    fn sync_line(&self, id: LineId, scene: &mut Scene) {
        let Some(line) = self.controller.store().line(id) else {
            return;
        };
        let Some(tube) = build_line_tube(line.points(), line.thickness, self.controller.config()) else {
            return;
        };

        let name = id.to_string();
        match scene.object_mut(&name) {
            Some(object) => object.set_geometry(&tube.data),
            None => {
                scene.add_object(Object::new(name, &tube.data).with_color(RED));
            }
        }
    }

    /// Replaces every mirrored object with what the store currently holds.
    fn rebuild_mirror(&self, scene: &mut Scene) {
        scene.remove_objects_where(|o| o.name.starts_with(OBJECT_PREFIX) || o.name.starts_with(LINE_PREFIX));
        let store = self.controller.store();
        for id in store.objects().iter().map(|o| o.id) {
            self.sync_object(id, scene);
        }
        for id in store.lines().iter().map(|l| l.id) {
            self.sync_line(id, scene);
        }
    }

    fn handle(&mut self, event: Option<CanvasEvent>, scene: &mut Scene) {
        match event {
            Some(CanvasEvent::ObjectPlaced(id)) => self.sync_object(id, scene),
            Some(CanvasEvent::LineStarted(id)) | Some(CanvasEvent::LineExtended(id)) => self.sync_line(id, scene),
            Some(CanvasEvent::LineFinished(_)) | Some(CanvasEvent::ClickDiscarded) | None => {}
        }
    }

    pub fn change_mode(&mut self, change: impl FnOnce(&mut InteractionController), scene: &mut Scene) {
        change(&mut self.controller);
        self.apply_orbit(scene);
    }

    pub fn clear(&mut self, scene: &mut Scene) {
        self.controller.clear_all();
        self.thickness = self.controller.store().line_thickness();
        self.rebuild_mirror(scene);
        self.apply_orbit(scene);
        info!("canvas cleared");
    }

    fn toolbar(&mut self, ui: &Ui, scene: &mut Scene) {
        let mode = self.controller.mode();
        for kind in ShapeKind::ALL {
            let active = mode.placing() == Some(kind);
            let _highlight = active.then(|| ui.push_style_color(imgui::StyleColor::Button, [0.4, 0.49, 0.92, 1.0]));
            if ui.button(format!("{} {}", kind.icon(), kind.label())) {
                self.change_mode(|c| {
                    c.toggle_shape(kind);
                }, scene);
            }
            ui.same_line();
        }

        let drawing = mode.is_drawing();
        {
            let _highlight = drawing.then(|| ui.push_style_color(imgui::StyleColor::Button, [0.3, 0.69, 0.31, 0.9]));
            if ui.button("\u{270F} Draw") {
                self.change_mode(|c| {
                    c.toggle_drawing();
                }, scene);
            }
        }
        ui.same_line();
        {
            let _danger = ui.push_style_color(imgui::StyleColor::Button, [0.96, 0.26, 0.21, 0.9]);
            if ui.button("Clear") {
                self.clear(scene);
            }
        }

        if self.controller.mode().is_drawing() {
            let config = self.controller.config();
            let (min, max) = (config.min_line_thickness, config.max_line_thickness);
            ui.set_next_item_width(120.0);
            if ui.slider("Thickness", min, max, &mut self.thickness) {
                self.controller.set_line_thickness(self.thickness);
            }
        }
    }
}

impl Demo for InteractiveCanvas {
    fn id(&self) -> &'static str {
        ID
    }

    fn name(&self) -> &'static str {
        "Interactive 3D Canvas With Objects"
    }

    fn description(&self) -> &'static str {
        "Interactive 3D canvas: place shapes and draw lines"
    }

    fn initialize(&mut self, scene: &mut Scene) {
        let aspect = scene.camera_manager.camera.aspect;
        let mut camera = OrbitCamera::looking_at(Vector3::new(0.0, 5.0, 10.0), Vector3::new(0.0, 0.0, 0.0), aspect)
            .with_fovy(Deg(75.0))
            .with_bounds(OrbitCameraBounds::default().with_distance(5.0, 100.0));
        camera.update_view_proj();
        scene.camera_manager.camera = camera;
        scene.camera_manager.controller.set_damping(Some(0.05));

        scene.lights = LightRig::new(0.5)
            .with_light(Light::directional([10.0, 10.0, 5.0], [1.0, 1.0, 1.0], 1.0))
            .with_light(Light::point([-10.0, -10.0, -5.0], [1.0, 1.0, 1.0], 0.5));
        scene.grid = Some(GridHelper::new(100.0, 100, -0.01));

        self.rebuild_mirror(scene);
        self.apply_orbit(scene);
    }

    fn update(&mut self, delta_time: f32, scene: &mut Scene) {
        let [dx, dy, dz] = self.controller.pan_tick(delta_time);
        if dx != 0.0 || dy != 0.0 || dz != 0.0 {
            let camera = &mut scene.camera_manager.camera;
            let eye = camera.eye + Vector3::new(dx, dy, dz);
            camera.set_eye(eye);
        }

        let config = *self.controller.config();
        for placed in self.controller.store().objects() {
            let Some(object) = scene.object_mut(&placed.id.to_string()) else {
                continue;
            };
            object.rotation.y += config.spin_speed * delta_time;
            if placed.kind == ShapeKind::Star {
                object.rotation.z += config.star_roll_speed * delta_time;
            }
        }
    }

    fn on_pointer(&mut self, event: &PointerEvent, scene: &mut Scene) {
        if event.kind == PointerEventKind::Leave {
            let result = self.controller.on_pointer_leave();
            self.handle(result, scene);
            return;
        }

        let ray = event.ray(&scene.camera_manager.camera);
        let Some(hit) = ground_hit(&ray, self.controller.config().ground_size) else {
            // Off the ground plane counts as leaving it.
            let result = self.controller.on_pointer_leave();
            self.handle(result, scene);
            return;
        };
        let point = [hit.x, hit.y, hit.z];

        let result = match event.kind {
            PointerEventKind::Down => self.controller.on_pointer_down(point, event.timestamp),
            PointerEventKind::Move => self.controller.on_pointer_move(point),
            PointerEventKind::Up => self.controller.on_pointer_up(point, event.timestamp),
            PointerEventKind::Leave => None,
        };
        if let Some(event) = result {
            debug!("canvas: {:?}", event);
        }
        self.handle(result, scene);
    }

    fn on_key(&mut self, key: KeyCode, pressed: bool, _scene: &mut Scene) {
        let Some(key) = PanKey::from_key_code(key) else {
            return;
        };
        if pressed {
            self.controller.key_down(key);
        } else {
            self.controller.key_up(key);
        }
    }

    fn on_focus_lost(&mut self, _scene: &mut Scene) {
        self.controller.release_all_keys();
    }

    fn render_ui(&mut self, ui: &Ui, scene: &mut Scene) {
        ui.window("Canvas")
            .position([20.0, 20.0], imgui::Condition::FirstUseEver)
            .always_auto_resize(true)
            .build(|| {
                self.toolbar(ui, scene);
                ui.separator();
                let store = self.controller.store();
                ui.text(format!(
                    "{} shapes, {} lines",
                    store.objects().len(),
                    store.lines().len()
                ));
                ui.text_disabled("Arrow keys pan the camera.");
            });
    }

    fn cleanup(&mut self, scene: &mut Scene) {
        self.controller.release_all_keys();
        scene.remove_objects_where(|o| o.name.starts_with(OBJECT_PREFIX) || o.name.starts_with(LINE_PREFIX));
        scene.grid = None;
    }
}
