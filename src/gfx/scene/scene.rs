use log::debug;
use wgpu::util::DeviceExt;

use crate::gfx::{
    camera::{CameraManager, OverlayCamera},
    color::{GRID_CENTRE, GRID_LINE},
    geometry::{generate_grid, GeometryData, LineGeometry},
};

use super::{lights::LightRig, object::Object};

/// Line grid on the XZ plane, drawn by the line pipeline.
pub struct GridHelper {
    geometry: LineGeometry,
    vertex_buffer: Option<wgpu::Buffer>,
}

impl GridHelper {
    /// `size` x `size` grid with `divisions` cells per side, lifted to height `y`.
    pub fn new(size: f32, divisions: u32, y: f32) -> Self {
        let mut geometry = generate_grid(size, divisions, GRID_CENTRE, GRID_LINE);
        for vertex in &mut geometry.vertices {
            vertex.position[1] = y;
        }
        Self {
            geometry,
            vertex_buffer: None,
        }
    }

    pub fn geometry(&self) -> &LineGeometry {
        &self.geometry
    }

    pub fn vertex_count(&self) -> u32 {
        self.geometry.vertices.len() as u32
    }

    pub fn vertex_buffer(&self) -> Option<&wgpu::Buffer> {
        self.vertex_buffer.as_ref()
    }

    pub fn sync_gpu(&mut self, device: &wgpu::Device) {
        if self.vertex_buffer.is_some() || self.geometry.vertices.is_empty() {
            return;
        }
        self.vertex_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Grid Vertex Buffer"),
            contents: bytemuck::cast_slice(&self.geometry.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        }));
    }
}

/// Objects drawn after the main pass with a pixel-space camera, on top of the scene.
pub struct OverlayLayer {
    pub camera: OverlayCamera,
    pub objects: Vec<Object>,
}

/// Main scene containing objects, lights, helpers and camera
pub struct Scene {
    pub camera_manager: CameraManager,
    pub objects: Vec<Object>,
    pub lights: LightRig,
    pub grid: Option<GridHelper>,
    pub overlay: OverlayLayer,
}

impl Scene {
    pub fn new(camera_manager: CameraManager, width: u32, height: u32) -> Self {
        Self {
            camera_manager,
            objects: Vec::new(),
            lights: LightRig::default(),
            grid: None,
            overlay: OverlayLayer {
                camera: OverlayCamera::new(width, height),
                objects: Vec::new(),
            },
        }
    }

    /// Updates the scene (camera damping and matrices)
    pub fn update(&mut self) {
        self.camera_manager.update();
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera_manager.camera.resize_projection(width, height);
        self.overlay.camera.resize(width, height);
    }

    /// Adds an object, renaming it if the name is already taken. Returns its index.
    pub fn add_object(&mut self, mut object: Object) -> usize {
        object.name = self.ensure_unique_name(&object.name);
        debug!("scene: added '{}'", object.name);
        self.objects.push(object);
        self.objects.len() - 1
    }

    /// Builds an object from generated geometry and adds it.
    pub fn add_procedural_object(&mut self, name: &str, geometry: &GeometryData) -> &mut Object {
        let index = self.add_object(Object::new(name, geometry));
        &mut self.objects[index]
    }

    pub fn object(&self, name: &str) -> Option<&Object> {
        self.objects.iter().find(|o| o.name == name)
    }

    pub fn object_mut(&mut self, name: &str) -> Option<&mut Object> {
        self.objects.iter_mut().find(|o| o.name == name)
    }

    pub fn remove_object(&mut self, name: &str) -> Option<Object> {
        let index = self.objects.iter().position(|o| o.name == name)?;
        Some(self.objects.remove(index))
    }

    /// Removes every object matching `predicate`, returning how many went.
    pub fn remove_objects_where(&mut self, mut predicate: impl FnMut(&Object) -> bool) -> usize {
        let before = self.objects.len();
        self.objects.retain(|o| !predicate(o));
        before - self.objects.len()
    }

    pub fn remove_objects_with_prefix(&mut self, prefix: &str) -> usize {
        self.remove_objects_where(|o| o.name.starts_with(prefix))
    }

    /// Drops all objects, overlay objects and the grid, and restores default lighting.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.overlay.objects.clear();
        self.grid = None;
        self.lights = LightRig::default();
    }

    pub fn ensure_unique_name(&self, desired_name: &str) -> String {
        let mut counter = 0;
        let mut test_name = desired_name.to_string();

        while self.objects.iter().any(|obj| obj.name == test_name) {
            counter += 1;
            test_name = format!("{} ({})", desired_name, counter);
        }

        test_name
    }

    /// Gets statistics about the scene
    pub fn statistics(&self) -> SceneStatistics {
        let meshes = self.objects.iter().flat_map(|o| o.meshes());
        let (total_vertices, total_triangles) = meshes.fold((0, 0), |(v, t), mesh| {
            (v + mesh.vertices().len() as u32, t + mesh.index_count() / 3)
        });

        SceneStatistics {
            object_count: self.objects.len(),
            visible_count: self.objects.iter().filter(|o| o.visible).count(),
            light_count: self.lights.lights().len(),
            total_triangles,
            total_vertices,
        }
    }
}

/// Scene statistics for debugging and UI display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneStatistics {
    pub object_count: usize,
    pub visible_count: usize,
    pub light_count: usize,
    pub total_triangles: u32,
    pub total_vertices: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{
        camera::{CameraController, OrbitCamera},
        geometry::generate_cube,
        scene::lights::Light,
    };
    use cgmath::Vector3;

    fn scene() -> Scene {
        let camera = OrbitCamera::looking_at(Vector3::new(0.0, 5.0, 10.0), Vector3::new(0.0, 0.0, 0.0), 1.6);
        Scene::new(CameraManager::new(camera, CameraController::new(0.005, 0.1)), 1280, 800)
    }

    #[test]
    fn duplicate_names_are_suffixed() {
        let mut scene = scene();
        scene.add_procedural_object("cube", &generate_cube());
        let second = scene.add_procedural_object("cube", &generate_cube());
        assert_eq!(second.name, "cube (1)");
        assert!(scene.object("cube (1)").is_some());
    }

    #[test]
    fn prefix_removal_leaves_other_objects() {
        let mut scene = scene();
        for name in ["obj-1", "obj-2", "line-3", "ground"] {
            scene.add_procedural_object(name, &generate_cube());
        }
        assert_eq!(scene.remove_objects_with_prefix("obj-"), 2);
        assert_eq!(scene.objects.len(), 2);
        assert!(scene.remove_object("line-3").is_some());
        assert!(scene.remove_object("line-3").is_none());
    }

    #[test]
    fn clear_resets_everything_but_the_camera() {
        let mut scene = scene();
        scene.add_procedural_object("cube", &generate_cube());
        scene.grid = Some(GridHelper::new(100.0, 100, -0.01));
        scene.lights.clear();
        scene.lights.push(Light::point([0.0; 3], [0.0, 1.0, 0.0], 1.0));

        scene.clear();
        assert!(scene.objects.is_empty());
        assert!(scene.grid.is_none());
        assert_eq!(scene.lights, LightRig::default());
    }

    #[test]
    fn grid_sits_at_requested_height() {
        let grid = GridHelper::new(100.0, 100, -0.01);
        assert_eq!(grid.vertex_count(), 101 * 4);
        assert!(grid.geometry().vertices.iter().all(|v| v.position[1] == -0.01));
    }

    #[test]
    fn statistics_count_geometry() {
        let mut scene = scene();
        scene.add_procedural_object("a", &generate_cube()).visible = false;
        scene.add_procedural_object("b", &generate_cube());
        let stats = scene.statistics();
        assert_eq!(stats.object_count, 2);
        assert_eq!(stats.visible_count, 1);
        assert_eq!(stats.total_triangles, 24);
        assert_eq!(stats.total_vertices, 48);
    }
}
