//! A lit 2x2x2 box under a green key light.

use imgui::Ui;

use super::Demo;
use crate::gfx::{
    color::WHITE,
    geometry::generate_box,
    scene::{Light, LightRig, Scene},
};

pub const ID: &str = "simple-square";

#[derive(Default)]
pub struct SimpleSquare;

impl Demo for SimpleSquare {
    fn id(&self) -> &'static str {
        ID
    }

    fn name(&self) -> &'static str {
        "Simple Square"
    }

    fn description(&self) -> &'static str {
        "A basic square with lighting"
    }

    fn initialize(&mut self, scene: &mut Scene) {
        scene.lights = LightRig::new(0.1).with_light(Light::directional([0.0, 0.0, 1.0], [0.0, 1.0, 0.0], 1.0));
        scene
            .add_procedural_object("square", &generate_box(2.0, 2.0, 2.0))
            .color = WHITE;
    }

    fn update(&mut self, _delta_time: f32, _scene: &mut Scene) {}

    fn render_ui(&mut self, ui: &Ui, _scene: &mut Scene) {
        ui.window("Simple Square")
            .position([20.0, 20.0], imgui::Condition::FirstUseEver)
            .always_auto_resize(true)
            .build(|| {
                ui.text("Drag to orbit, scroll to zoom.");
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demos::test_support;

    #[test]
    fn one_box_lit_green_from_the_front() {
        let mut scene = test_support::scene();
        SimpleSquare.initialize(&mut scene);

        let square = scene.object("square").unwrap();
        assert_eq!(square.local_bounds().unwrap().max.x, 1.0);
        assert_eq!(scene.lights.ambient_intensity, 0.1);
        assert_eq!(scene.lights.lights()[0].color, [0.0, 1.0, 0.0]);
    }
}
