//! Normal-shaded torus under orbit controls, with an orientation cube in the
//! top-right corner.

use imgui::Ui;

use super::{Demo, PointerEvent, PointerEventKind};
use crate::gfx::{
    geometry::generate_torus,
    gizmos::ViewCube,
    scene::{Scene, Shading},
};

pub const ID: &str = "torus-cube-view";

#[derive(Default)]
pub struct TorusCubeView {
    view_cube: ViewCube,
    pointer: Option<(f32, f32)>,
}

impl Demo for TorusCubeView {
    fn id(&self) -> &'static str {
        ID
    }

    fn name(&self) -> &'static str {
        "Torus Cube View"
    }

    fn description(&self) -> &'static str {
        "Interactive torus with cube view"
    }

    fn initialize(&mut self, scene: &mut Scene) {
        scene
            .add_procedural_object("torus", &generate_torus(1.0, 0.5, 32, 100))
            .shading = Shading::Normals;
        self.view_cube.install(scene);
        self.view_cube.update(scene, None);
    }

    fn update(&mut self, _delta_time: f32, scene: &mut Scene) {
        self.view_cube.update(scene, self.pointer);
    }

    fn on_pointer(&mut self, event: &PointerEvent, _scene: &mut Scene) {
        self.pointer = match event.kind {
            PointerEventKind::Leave => None,
            _ => Some(event.position),
        };
    }

    fn render_ui(&mut self, ui: &Ui, scene: &mut Scene) {
        ui.window("Torus")
            .position([20.0, 20.0], imgui::Condition::FirstUseEver)
            .always_auto_resize(true)
            .build(|| {
                match self.view_cube.hovered() {
                    Some(face) => ui.text(format!("Facing: {}", face.label())),
                    None => ui.text("Hover the cube to name a face."),
                }
                if ui.button("Reset view") {
                    scene.camera_manager.camera.reset_to_default();
                }
            });
    }

    fn cleanup(&mut self, scene: &mut Scene) {
        self.view_cube.uninstall(scene);
        self.pointer = None;
    }
}
