//! Two spinning cubes that grow and speed up under the pointer, with
//! switchable lights.

use cgmath::Vector3;
use imgui::Ui;

use super::{Demo, PointerEvent, PointerEventKind};
use crate::gfx::{
    color::{GOLD, HOTPINK},
    geometry::generate_cube,
    picking::pick_object,
    scene::{Light, LightRig, Scene},
};

pub const ID: &str = "rotating-cubes";

const CUBE_PREFIX: &str = "cube-";
const HOVER_SCALE: f32 = 1.5;
const HOVER_SPEEDUP: f32 = 1.5;

struct Cube {
    name: String,
    hovered: bool,
}

/// Which lights are switched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightToggles {
    pub point: bool,
    pub ambient: bool,
    pub directional: bool,
}

impl Default for LightToggles {
    fn default() -> Self {
        Self {
            point: false,
            ambient: false,
            directional: true,
        }
    }
}

impl LightToggles {
    pub fn rig(self) -> LightRig {
        let mut rig = LightRig::new(if self.ambient { 20.0 } else { 0.0 });
        if self.point {
            rig.push(Light::point([1.5, 0.0, 1.0], [0.0, 1.0, 0.0], 1.0));
        }
        if self.directional {
            rig.push(Light::directional([0.0, 0.0, 1.0], [1.0, 1.0, 1.0], 1.0));
        }
        rig
    }
}

#[derive(Default)]
pub struct RotatingCubes {
    cubes: Vec<Cube>,
    lights: LightToggles,
}

impl RotatingCubes {
    fn set_hovered(&mut self, hovered: Option<&str>, scene: &mut Scene) {
        for cube in &mut self.cubes {
            cube.hovered = hovered == Some(cube.name.as_str());
            if let Some(object) = scene.object_mut(&cube.name) {
                let s = if cube.hovered { HOVER_SCALE } else { 1.0 };
                object.scale = Vector3::new(s, s, s);
            }
        }
    }
}

impl Demo for RotatingCubes {
    fn id(&self) -> &'static str {
        ID
    }

    fn name(&self) -> &'static str {
        "Rotating Cubes"
    }

    fn description(&self) -> &'static str {
        "Rotating cubes with hover effects"
    }

    fn initialize(&mut self, scene: &mut Scene) {
        scene.camera_manager.controller.set_enabled(false);
        scene.lights = self.lights.rig();

        self.cubes.clear();
        for (side, x, color) in [("left", -1.5, HOTPINK), ("right", 1.5, GOLD)] {
            let name = format!("{}{}", CUBE_PREFIX, side);
            let object = scene.add_procedural_object(&name, &generate_cube());
            object.position = Vector3::new(x, 0.0, 0.0);
            object.color = color;
            self.cubes.push(Cube {
                name: object.name.clone(),
                hovered: false,
            });
        }
    }

    fn update(&mut self, delta_time: f32, scene: &mut Scene) {
        for cube in &self.cubes {
            if let Some(object) = scene.object_mut(&cube.name) {
                let speed = if cube.hovered { HOVER_SPEEDUP } else { 1.0 };
                object.rotation.x += delta_time * speed;
            }
        }
    }

    fn on_pointer(&mut self, event: &PointerEvent, scene: &mut Scene) {
        if event.kind == PointerEventKind::Leave {
            self.set_hovered(None, scene);
            return;
        }

        let ray = event.ray(&scene.camera_manager.camera);
        let hit = pick_object(&ray, &scene.objects, |o| o.name.starts_with(CUBE_PREFIX))
            .map(|pick| scene.objects[pick.object_index].name.clone());
        self.set_hovered(hit.as_deref(), scene);
    }

    fn render_ui(&mut self, ui: &Ui, scene: &mut Scene) {
        let mut changed = false;
        ui.window("Lights")
            .position([20.0, 20.0], imgui::Condition::FirstUseEver)
            .always_auto_resize(true)
            .build(|| {
                changed |= ui.checkbox("Point light", &mut self.lights.point);
                changed |= ui.checkbox("Ambient light", &mut self.lights.ambient);
                changed |= ui.checkbox("Directional light", &mut self.lights.directional);
            });
        if changed {
            scene.lights = self.lights.rig();
        }
    }

    fn cleanup(&mut self, scene: &mut Scene) {
        scene.remove_objects_with_prefix(CUBE_PREFIX);
        self.cubes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demos::test_support;

    fn pointer_at_centre() -> PointerEvent {
        PointerEvent::new(PointerEventKind::Move, (640.0, 400.0), (1280.0, 800.0))
    }

    #[test]
    fn default_rig_is_directional_only() {
        let rig = LightToggles::default().rig();
        assert_eq!(rig.lights().len(), 1);
        assert_eq!(rig.ambient_intensity, 0.0);

        let all = LightToggles {
            point: true,
            ambient: true,
            directional: true,
        }
        .rig();
        assert_eq!(all.lights().len(), 2);
        assert_eq!(all.ambient_intensity, 20.0);
    }

    #[test]
    fn hover_grows_and_speeds_up_only_that_cube() {
        let mut scene = test_support::scene();
        let mut demo = RotatingCubes::default();
        demo.initialize(&mut scene);
        assert_eq!(scene.objects.len(), 2);
        assert!(scene.object("cube-right").is_some());

        // aim at the right-hand cube
        let right = scene.objects[1].position;
        scene.camera_manager.camera.target = right;
        scene.camera_manager.camera.set_eye(right + Vector3::new(0.0, 0.0, 5.0));
        demo.on_pointer(&pointer_at_centre(), &mut scene);

        assert_eq!(scene.objects[0].scale.x, 1.0);
        assert_eq!(scene.objects[1].scale.x, HOVER_SCALE);

        demo.update(1.0, &mut scene);
        assert!((scene.objects[0].rotation.x - 1.0).abs() < 1e-6);
        assert!((scene.objects[1].rotation.x - HOVER_SPEEDUP).abs() < 1e-6);

        demo.on_pointer(&PointerEvent::new(PointerEventKind::Leave, (0.0, 0.0), (1280.0, 800.0)), &mut scene);
        assert_eq!(scene.objects[1].scale.x, 1.0);
    }

    #[test]
    fn orbit_is_off_while_open() {
        let mut scene = test_support::scene();
        RotatingCubes::default().initialize(&mut scene);
        assert!(!scene.camera_manager.controller.enabled());
    }
}
