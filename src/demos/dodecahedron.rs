//! Two spinning dodecahedrons that can be hovered and dragged around their own
//! depth plane.

use cgmath::Vector3;
use imgui::Ui;
use log::debug;

use super::{Demo, PointerEvent, PointerEventKind};
use crate::gfx::{
    color::{with_alpha, GOLD, HOTPINK},
    geometry::generate_dodecahedron,
    picking::{pick_object, Plane},
    scene::{Light, LightRig, Scene},
};

pub const ID: &str = "dodecahedron";

const NAME_PREFIX: &str = "dodecahedron-";

struct Shape {
    name: String,
    base_color: [f32; 4],
    /// Fixed depth the shape is dragged in.
    plane_z: f32,
    hovered: bool,
}

/// A drag in progress: which shape, and where on it the pointer grabbed.
struct Grab {
    shape: usize,
    offset: Vector3<f32>,
}

#[derive(Default)]
pub struct DodecahedronGestures {
    shapes: Vec<Shape>,
    grab: Option<Grab>,
}

impl DodecahedronGestures {
    fn shape_under(&self, event: &PointerEvent, scene: &Scene) -> Option<usize> {
        let ray = event.ray(&scene.camera_manager.camera);
        let pick = pick_object(&ray, &scene.objects, |o| o.name.starts_with(NAME_PREFIX))?;
        let name = &scene.objects[pick.object_index].name;
        self.shapes.iter().position(|s| &s.name == name)
    }

    /// Pointer position on the drag plane of `shape`.
    fn plane_point(&self, shape: usize, event: &PointerEvent, scene: &Scene) -> Option<Vector3<f32>> {
        let plane = Plane::through(
            Vector3::new(0.0, 0.0, self.shapes[shape].plane_z),
            Vector3::unit_z(),
        );
        plane.intersect_ray(&event.ray(&scene.camera_manager.camera))
    }

    fn set_hovered(&mut self, hovered: Option<usize>, scene: &mut Scene) {
        for (index, shape) in self.shapes.iter_mut().enumerate() {
            shape.hovered = hovered == Some(index);
            if let Some(object) = scene.object_mut(&shape.name) {
                let color = if shape.hovered { HOTPINK } else { shape.base_color };
                object.color = with_alpha(color, shape.base_color[3]);
            }
        }
    }
}

impl Demo for DodecahedronGestures {
    fn id(&self) -> &'static str {
        ID
    }

    fn name(&self) -> &'static str {
        "Dodecahedron With Gestures"
    }

    fn description(&self) -> &'static str {
        "Interactive dodecahedron with gestures"
    }

    fn initialize(&mut self, scene: &mut Scene) {
        scene.camera_manager.controller.set_enabled(false);
        scene.lights = LightRig::new(0.5)
            .with_light(Light::point([10.0, 10.0, 10.0], [1.0, 1.0, 1.0], 1.0))
            .with_light(Light::point([-10.0, -10.0, -10.0], [1.0, 1.0, 1.0], 1.0));

        self.shapes.clear();
        self.grab = None;
        for (label, z, opacity) in [("front", 1.0, 0.8), ("back", -2.0, 1.0)] {
            let base_color = with_alpha(GOLD, opacity);
            let object = scene.add_procedural_object(
                &format!("{}{}", NAME_PREFIX, label),
                &generate_dodecahedron(1.0),
            );
            object.position = Vector3::new(0.0, 0.0, z);
            object.color = base_color;
            self.shapes.push(Shape {
                name: object.name.clone(),
                base_color,
                plane_z: z,
                hovered: false,
            });
        }
    }

    fn update(&mut self, delta_time: f32, scene: &mut Scene) {
        for shape in &self.shapes {
            if let Some(object) = scene.object_mut(&shape.name) {
                object.rotation.x += delta_time;
                object.rotation.y += delta_time;
            }
        }
    }

    fn on_pointer(&mut self, event: &PointerEvent, scene: &mut Scene) {
        match event.kind {
            PointerEventKind::Down => {
                self.grab = self.shape_under(event, scene).and_then(|shape| {
                    let hit = self.plane_point(shape, event, scene)?;
                    let position = scene.object(&self.shapes[shape].name)?.position;
                    debug!("grabbed '{}'", self.shapes[shape].name);
                    Some(Grab {
                        shape,
                        offset: position - hit,
                    })
                });
            }
            PointerEventKind::Move => {
                if let Some(grab) = &self.grab {
                    if let Some(hit) = self.plane_point(grab.shape, event, scene) {
                        let shape = &self.shapes[grab.shape];
                        let mut position = hit + grab.offset;
                        position.z = shape.plane_z;
                        if let Some(object) = scene.object_mut(&shape.name) {
                            object.position = position;
                        }
                    }
                    return;
                }
                let hovered = self.shape_under(event, scene);
                self.set_hovered(hovered, scene);
            }
            PointerEventKind::Up => {
                self.grab = None;
            }
            PointerEventKind::Leave => {
                self.grab = None;
                self.set_hovered(None, scene);
            }
        }
    }

    fn render_ui(&mut self, ui: &Ui, scene: &mut Scene) {
        ui.window("Dodecahedrons")
            .position([20.0, 20.0], imgui::Condition::FirstUseEver)
            .always_auto_resize(true)
            .build(|| {
                ui.text("Drag a shape to move it.");
                if ui.button("Reset positions") {
                    for shape in &self.shapes {
                        if let Some(object) = scene.object_mut(&shape.name) {
                            object.position = Vector3::new(0.0, 0.0, shape.plane_z);
                        }
                    }
                }
            });
    }

    fn cleanup(&mut self, scene: &mut Scene) {
        scene.remove_objects_with_prefix(NAME_PREFIX);
        self.shapes.clear();
        self.grab = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demos::test_support;

    const VIEWPORT: (f32, f32) = (1280.0, 800.0);

    fn event(kind: PointerEventKind, x: f32, y: f32) -> PointerEvent {
        PointerEvent::new(kind, (x, y), VIEWPORT)
    }

    fn setup() -> (Scene, DodecahedronGestures) {
        let mut scene = test_support::scene();
        let mut demo = DodecahedronGestures::default();
        demo.initialize(&mut scene);
        (scene, demo)
    }

    #[test]
    fn front_shape_is_translucent_gold() {
        let (scene, _) = setup();
        let front = scene.object("dodecahedron-front").unwrap();
        assert_eq!(front.color[3], 0.8);
        assert!(front.is_transparent());
        assert!(!scene.object("dodecahedron-back").unwrap().is_transparent());
    }

    #[test]
    fn hover_picks_the_nearer_shape_and_keeps_opacity() {
        let (mut scene, mut demo) = setup();
        demo.on_pointer(&event(PointerEventKind::Move, 640.0, 400.0), &mut scene);

        let front = scene.object("dodecahedron-front").unwrap();
        assert_eq!(front.color, with_alpha(HOTPINK, 0.8));
        assert_eq!(scene.object("dodecahedron-back").unwrap().color, GOLD);

        demo.on_pointer(&event(PointerEventKind::Move, 5.0, 5.0), &mut scene);
        assert_eq!(scene.object("dodecahedron-front").unwrap().color, with_alpha(GOLD, 0.8));
    }

    #[test]
    fn drag_follows_the_pointer_in_the_shape_plane() {
        let (mut scene, mut demo) = setup();
        demo.on_pointer(&event(PointerEventKind::Down, 640.0, 400.0), &mut scene);
        demo.on_pointer(&event(PointerEventKind::Move, 840.0, 300.0), &mut scene);

        let moved = scene.object("dodecahedron-front").unwrap().position;
        assert_eq!(moved.z, 1.0);
        assert!(moved.x > 0.5, "{:?}", moved);
        assert!(moved.y > 0.0, "{:?}", moved);

        demo.on_pointer(&event(PointerEventKind::Up, 840.0, 300.0), &mut scene);
        demo.on_pointer(&event(PointerEventKind::Move, 100.0, 100.0), &mut scene);
        assert_eq!(scene.object("dodecahedron-front").unwrap().position, moved);
    }

    #[test]
    fn pressing_empty_space_grabs_nothing() {
        let (mut scene, mut demo) = setup();
        demo.on_pointer(&event(PointerEventKind::Down, 5.0, 5.0), &mut scene);
        assert!(demo.grab.is_none());

        demo.grab = Some(Grab {
            shape: 1,
            offset: Vector3::new(0.0, 0.0, 0.0),
        });
        demo.on_pointer(&event(PointerEventKind::Leave, 0.0, 0.0), &mut scene);
        assert!(demo.grab.is_none());
    }
}
