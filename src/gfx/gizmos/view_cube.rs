//! # Orientation View Cube
//!
//! A small cube drawn in the overlay layer in the top-right corner. Its
//! rotation follows the main camera's view rotation, so its faces show which
//! world axis points where. Each face is a separate overlay object so the face
//! under the pointer can be highlighted.

use cgmath::{Matrix3, Matrix4, SquareMatrix, Vector3};

use crate::gfx::{
    camera::{OrbitCamera, OverlayCamera},
    color::{rgb_hex, HOTPINK},
    geometry::{generate_cube, GeometryData},
    picking::{screen_to_ray, AABB},
    scene::{Object, Scene, Shading},
};

const NAME_PREFIX: &str = "view-cube-";

/// Face of the view cube, named by the world axis its normal points along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubeFace {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl CubeFace {
    /// Same order as the faces of `generate_cube`.
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PosX,
        CubeFace::NegX,
        CubeFace::PosY,
        CubeFace::NegY,
        CubeFace::PosZ,
        CubeFace::NegZ,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CubeFace::PosX => "Right",
            CubeFace::NegX => "Left",
            CubeFace::PosY => "Top",
            CubeFace::NegY => "Bottom",
            CubeFace::PosZ => "Front",
            CubeFace::NegZ => "Back",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    fn base_color(self) -> [f32; 4] {
        match self {
            CubeFace::PosX | CubeFace::NegX => rgb_hex(0xd9a3a3),
            CubeFace::PosY | CubeFace::NegY => rgb_hex(0xa3d9a3),
            CubeFace::PosZ | CubeFace::NegZ => rgb_hex(0xa3a3d9),
        }
    }

    /// Face whose outward normal is closest to `local_point` on a unit cube.
    pub fn from_local_point(local_point: Vector3<f32>) -> CubeFace {
        let abs = [local_point.x.abs(), local_point.y.abs(), local_point.z.abs()];
        if abs[0] >= abs[1] && abs[0] >= abs[2] {
            if local_point.x >= 0.0 { CubeFace::PosX } else { CubeFace::NegX }
        } else if abs[1] >= abs[2] {
            if local_point.y >= 0.0 { CubeFace::PosY } else { CubeFace::NegY }
        } else if local_point.z >= 0.0 {
            CubeFace::PosZ
        } else {
            CubeFace::NegZ
        }
    }

    fn object_name(self) -> String {
        format!("{}{}", NAME_PREFIX, self.label().to_lowercase())
    }
}

/// One face of the unit cube as its own mesh.
fn face_geometry(face: CubeFace) -> GeometryData {
    let cube = generate_cube();
    let first_vertex = face.index() * 4;
    let first_index = face.index() * 6;
    let vertices = first_vertex..first_vertex + 4;

    GeometryData {
        vertices: cube.vertices[vertices.clone()].to_vec(),
        tex_coords: cube.tex_coords[vertices.clone()].to_vec(),
        normals: cube.normals[vertices].to_vec(),
        indices: cube.indices[first_index..first_index + 6]
            .iter()
            .map(|i| i - first_vertex as u32)
            .collect(),
    }
}

/// Euler XYZ angles reproducing `m` as `Rx * Ry * Rz`.
fn euler_xyz(m: &Matrix3<f32>) -> Vector3<f32> {
    // cgmath is column-major: m.c.r
    let m13 = m.z.x.clamp(-1.0, 1.0);
    let y = m13.asin();
    if m13.abs() < 0.999_999 {
        Vector3::new((-m.z.y).atan2(m.z.z), y, (-m.y.x).atan2(m.x.x))
    } else {
        Vector3::new(m.y.z.atan2(m.y.y), y, 0.0)
    }
}

pub struct ViewCube {
    /// Edge length in pixels.
    pub size: f32,
    /// Distance in pixels from the top and right edges to the cube centre.
    pub inset: f32,
    rotation: Matrix3<f32>,
    hovered: Option<CubeFace>,
}

impl Default for ViewCube {
    fn default() -> Self {
        Self {
            size: 80.0,
            inset: 120.0,
            rotation: Matrix3::identity(),
            hovered: None,
        }
    }
}

impl ViewCube {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<CubeFace> {
        self.hovered
    }

    /// Adds the six face objects to the scene's overlay layer.
    pub fn install(&self, scene: &mut Scene) {
        self.uninstall(scene);
        for face in CubeFace::ALL {
            scene.overlay.objects.push(
                Object::new(face.object_name(), &face_geometry(face))
                    .with_color(face.base_color())
                    .with_shading(Shading::Unlit),
            );
        }
    }

    pub fn uninstall(&self, scene: &mut Scene) {
        scene
            .overlay
            .objects
            .retain(|o| !o.name.starts_with(NAME_PREFIX));
    }

    /// Cube centre in overlay space.
    pub fn centre(&self, overlay: &OverlayCamera) -> Vector3<f32> {
        Vector3::new(
            overlay.width * 0.5 - self.inset,
            overlay.height * 0.5 - self.inset,
            0.0,
        )
    }

    pub fn model_matrix(&self, overlay: &OverlayCamera) -> Matrix4<f32> {
        Matrix4::from_translation(self.centre(overlay))
            * Matrix4::from(self.rotation)
            * Matrix4::from_scale(self.size)
    }

    /// Face under `pointer` (pixels, top-left origin), if any.
    pub fn face_at(&self, pointer: (f32, f32), overlay: &OverlayCamera) -> Option<CubeFace> {
        let ray = screen_to_ray(pointer, (overlay.width, overlay.height), overlay);
        let inverse = self.model_matrix(overlay).invert()?;
        let local_ray = ray.transformed(&inverse);
        let unit = AABB::new(Vector3::new(-0.5, -0.5, -0.5), Vector3::new(0.5, 0.5, 0.5));
        let t = unit.intersect_ray(&local_ray)?;
        Some(CubeFace::from_local_point(local_ray.point_at(t)))
    }

    /// Follows the camera and refreshes the hover highlight.
    pub fn update(&mut self, scene: &mut Scene, pointer: Option<(f32, f32)>) {
        self.sync_to(
            &scene.camera_manager.camera,
            &mut scene.overlay.objects,
            scene.overlay.camera,
            pointer,
        );
    }

    fn sync_to(
        &mut self,
        camera: &OrbitCamera,
        objects: &mut [Object],
        overlay: OverlayCamera,
        pointer: Option<(f32, f32)>,
    ) {
        self.rotation = camera.view_rotation();
        self.hovered = pointer.and_then(|p| self.face_at(p, &overlay));

        let euler = euler_xyz(&self.rotation);
        let centre = self.centre(&overlay);
        for face in CubeFace::ALL {
            let name = face.object_name();
            let Some(object) = objects.iter_mut().find(|o| o.name == name) else {
                continue;
            };
            object.position = centre;
            object.rotation = euler;
            object.scale = Vector3::new(self.size, self.size, self.size);
            object.color = if self.hovered == Some(face) {
                HOTPINK
            } else {
                face.base_color()
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, Rad, Vector4};

    fn camera(eye: Vector3<f32>) -> OrbitCamera {
        OrbitCamera::looking_at(eye, Vector3::new(0.0, 0.0, 0.0), 1.0)
    }

    #[test]
    fn face_slices_follow_cube_order() {
        for face in CubeFace::ALL {
            let geometry = face_geometry(face);
            assert_eq!(geometry.vertex_count(), 4);
            assert!(geometry.indices.iter().all(|&i| i < 4));
            let n = Vector3::from(geometry.normals[0]);
            let centre: Vector3<f32> = geometry
                .vertices
                .iter()
                .map(|&v| Vector3::from(v))
                .fold(Vector3::new(0.0, 0.0, 0.0), |a, b| a + b)
                / 4.0;
            assert_eq!(CubeFace::from_local_point(centre), face);
            assert!((n - centre * 2.0).magnitude() < 1e-6);
        }
    }

    #[test]
    fn euler_round_trips_through_the_object_matrix() {
        let rotation = Vector3::new(0.4, -0.9, 1.3);
        let object = Object::new("o", &generate_cube()).with_rotation(rotation);
        let m = object.model_matrix();
        let m3 = Matrix3::from_cols(m.x.truncate(), m.y.truncate(), m.z.truncate());
        let back = euler_xyz(&m3);
        assert!((back - rotation).magnitude() < 1e-4, "{:?}", back);

        let rebuilt = Matrix4::from_angle_x(Rad(back.x))
            * Matrix4::from_angle_y(Rad(back.y))
            * Matrix4::from_angle_z(Rad(back.z));
        let p = Vector4::new(1.0, 2.0, 3.0, 0.0);
        assert!(((rebuilt * p) - (m * p)).magnitude() < 1e-4);
    }

    #[test]
    fn front_face_is_under_the_cube_centre_when_looking_down_z() {
        let overlay = OverlayCamera::new(800, 600);
        let mut cube = ViewCube::new();
        let mut objects: Vec<Object> = CubeFace::ALL
            .iter()
            .map(|f| Object::new(f.object_name(), &face_geometry(*f)))
            .collect();

        cube.sync_to(&camera(Vector3::new(0.0, 0.0, 10.0)), &mut objects, overlay, None);
        // pixel of the cube centre: x = 800 - 120, y = 120
        assert_eq!(cube.face_at((680.0, 120.0), &overlay), Some(CubeFace::PosZ));
        assert_eq!(cube.face_at((100.0, 500.0), &overlay), None);
    }

    #[test]
    fn looking_from_above_shows_the_top_face() {
        let overlay = OverlayCamera::new(800, 600);
        let mut cube = ViewCube::new();
        let mut objects: Vec<Object> = CubeFace::ALL
            .iter()
            .map(|f| Object::new(f.object_name(), &face_geometry(*f)))
            .collect();

        let above = camera(Vector3::new(0.0, 10.0, 0.01));
        cube.sync_to(&above, &mut objects, overlay, Some((680.0, 120.0)));
        assert_eq!(cube.hovered(), Some(CubeFace::PosY));

        let top = objects.iter().find(|o| o.name == "view-cube-top").unwrap();
        assert_eq!(top.color, HOTPINK);
        let right = objects.iter().find(|o| o.name == "view-cube-right").unwrap();
        assert_eq!(right.color, CubeFace::PosX.base_color());
        assert_eq!(right.scale.x, 80.0);
    }
}
