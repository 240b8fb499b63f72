use std::ops::Range;

use cgmath::{Matrix, Matrix4, Rad, SquareMatrix, Vector3};
use log::trace;
use wgpu::util::DeviceExt;

use crate::{
    gfx::{geometry::GeometryData, picking::AABB},
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

use super::vertex::Vertex3D;

/// How the fragment shader colours an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shading {
    /// Base colour under the scene lights.
    #[default]
    Lit,
    /// Surface normal mapped to RGB.
    Normals,
    /// Flat base colour, no lighting.
    Unlit,
}

impl Shading {
    fn shader_code(self) -> f32 {
        match self {
            Shading::Lit => 0.0,
            Shading::Normals => 1.0,
            Shading::Unlit => 2.0,
        }
    }
}

/// Per-object uniform. Must match `ObjectUniform` in `mesh.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    pub color: [f32; 4],
    /// x: shading mode
    pub params: [f32; 4],
}

/// Bind group layout shared by every object's uniform (group 1).
pub fn object_bind_group_layout(device: &wgpu::Device) -> BindGroupLayoutWithDesc {
    BindGroupLayoutBuilder::new()
        .next_binding_rendering(binding_types::uniform())
        .create(device, "Object Bind Group Layout")
}

pub struct Mesh {
    vertices: Vec<Vertex3D>,
    indices: Vec<u32>,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    index_count: u32,
}

impl Mesh {
    pub fn from_geometry(geometry: &GeometryData) -> Self {
        Self {
            vertices: geometry.to_vertices(),
            indices: geometry.indices.clone(),
            vertex_buffer: None,
            index_buffer: None,
            index_count: geometry.indices.len() as u32,
        }
    }

    pub fn vertices(&self) -> &[Vertex3D] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn is_uploaded(&self) -> bool {
        self.vertex_buffer.is_some() && self.index_buffer.is_some()
    }

    pub fn upload(&mut self, device: &wgpu::Device) {
        if self.vertices.is_empty() || self.indices.is_empty() {
            return;
        }

        self.vertex_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: bytemuck::cast_slice(&self.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.index_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Index Buffer"),
            contents: bytemuck::cast_slice(&self.indices),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }
}

pub struct ObjectGpuResources {
    pub uniform_buffer: UniformBuffer<ObjectUniform>,
    pub bind_group: wgpu::BindGroup,
}

/// A named mesh with a transform, colour and shading mode.
///
/// Rotation is Euler XYZ in radians; the model matrix is `T * Rx * Ry * Rz * S`.
pub struct Object {
    pub name: String,
    meshes: Vec<Mesh>,
    pub position: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
    pub color: [f32; 4],
    pub shading: Shading,
    pub visible: bool,
    local_bounds: Option<AABB>,
    gpu_resources: Option<ObjectGpuResources>,
}

impl Object {
    pub fn new(name: impl Into<String>, geometry: &GeometryData) -> Self {
        Self {
            name: name.into(),
            meshes: vec![Mesh::from_geometry(geometry)],
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
            color: [0.8, 0.8, 0.8, 1.0],
            shading: Shading::Lit,
            visible: true,
            local_bounds: bounds_of(geometry),
            gpu_resources: None,
        }
    }

    pub fn with_position(mut self, position: Vector3<f32>) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Vector3<f32>) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vector3<f32>) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_color(mut self, color: [f32; 4]) -> Self {
        self.color = color;
        self
    }

    pub fn with_shading(mut self, shading: Shading) -> Self {
        self.shading = shading;
        self
    }

    /// Replaces the mesh. GPU buffers are rebuilt on the next sync.
    pub fn set_geometry(&mut self, geometry: &GeometryData) {
        self.meshes = vec![Mesh::from_geometry(geometry)];
        self.local_bounds = bounds_of(geometry);
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn is_transparent(&self) -> bool {
        self.color[3] < 1.0
    }

    pub fn local_bounds(&self) -> Option<AABB> {
        self.local_bounds
    }

    pub fn model_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from_angle_x(Rad(self.rotation.x))
            * Matrix4::from_angle_y(Rad(self.rotation.y))
            * Matrix4::from_angle_z(Rad(self.rotation.z))
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }

    pub fn uniform(&self) -> ObjectUniform {
        let model = self.model_matrix();
        // Inverse transpose keeps normals perpendicular under non-uniform scale.
        let normal_matrix = model
            .invert()
            .map(|m| m.transpose())
            .unwrap_or_else(Matrix4::identity);
        ObjectUniform {
            model: model.into(),
            normal_matrix: normal_matrix.into(),
            color: self.color,
            params: [self.shading.shader_code(), 0.0, 0.0, 0.0],
        }
    }

    pub fn bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu_resources.as_ref().map(|res| &res.bind_group)
    }

    /// Uploads anything missing on the GPU and refreshes the uniform.
    pub fn sync_gpu(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &BindGroupLayoutWithDesc,
    ) {
        for mesh in self.meshes.iter_mut().filter(|m| !m.is_uploaded()) {
            trace!("uploading mesh for '{}' ({} indices)", self.name, mesh.index_count);
            mesh.upload(device);
        }

        let uniform = self.uniform();
        match &mut self.gpu_resources {
            Some(resources) => resources.uniform_buffer.update_content(queue, uniform),
            None => {
                let uniform_buffer = UniformBuffer::new_with_data(device, &uniform);
                let bind_group = BindGroupBuilder::new(layout)
                    .resource(uniform_buffer.binding_resource())
                    .create(device, &format!("{} Bind Group", self.name));
                self.gpu_resources = Some(ObjectGpuResources {
                    uniform_buffer,
                    bind_group,
                });
            }
        }
    }
}

fn bounds_of(geometry: &GeometryData) -> Option<AABB> {
    geometry
        .bounds()
        .map(|(min, max)| AABB::new(Vector3::from(min), Vector3::from(max)))
}

pub trait DrawObject<'a> {
    fn draw_mesh(&mut self, mesh: &'a Mesh);
    fn draw_mesh_instanced(&mut self, mesh: &'a Mesh, instances: Range<u32>);
    /// Binds the object's uniform at group 1 and draws its meshes.
    fn draw_object(&mut self, object: &'a Object);
}

impl<'a, 'b> DrawObject<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_mesh(&mut self, mesh: &'b Mesh) {
        self.draw_mesh_instanced(mesh, 0..1);
    }

    fn draw_mesh_instanced(&mut self, mesh: &'b Mesh, instances: Range<u32>) {
        let (Some(vertex_buffer), Some(index_buffer)) = (&mesh.vertex_buffer, &mesh.index_buffer)
        else {
            return;
        };

        self.set_vertex_buffer(0, vertex_buffer.slice(..));
        self.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.index_count, 0, instances);
    }

    fn draw_object(&mut self, object: &'b Object) {
        let Some(bind_group) = object.bind_group() else {
            return;
        };
        self.set_bind_group(1, bind_group, &[]);
        for mesh in &object.meshes {
            self.draw_mesh(mesh);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::{generate_box, generate_cube};
    use cgmath::{InnerSpace, Vector4};

    #[test]
    fn model_matrix_applies_scale_then_rotation_then_translation() {
        let object = Object::new("box", &generate_cube())
            .with_position(Vector3::new(1.0, 2.0, 3.0))
            .with_rotation(Vector3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0))
            .with_scale(Vector3::new(2.0, 1.0, 1.0));

        let p = object.model_matrix() * Vector4::new(1.0, 0.0, 0.0, 1.0);
        // x scaled to 2, rotated about Y onto -Z, then translated
        assert!((p.x - 1.0).abs() < 1e-5);
        assert!((p.y - 2.0).abs() < 1e-5);
        assert!((p.z - 1.0).abs() < 1e-5);
    }

    #[test]
    fn normal_matrix_corrects_non_uniform_scale() {
        let object = Object::new("box", &generate_cube()).with_scale(Vector3::new(4.0, 1.0, 1.0));
        let uniform = object.uniform();
        let normal_matrix = Matrix4::from(uniform.normal_matrix);
        let n = (normal_matrix * Vector4::new(1.0, 1.0, 0.0, 0.0)).truncate().normalize();
        // a 45 degree normal tilts towards +Y once X is stretched
        assert!(n.y > n.x);
    }

    #[test]
    fn geometry_swap_updates_bounds() {
        let mut object = Object::new("line", &generate_cube());
        assert_eq!(object.local_bounds().unwrap().max, Vector3::new(0.5, 0.5, 0.5));

        object.set_geometry(&generate_box(4.0, 1.0, 1.0));
        assert_eq!(object.local_bounds().unwrap().max.x, 2.0);
        assert!(!object.meshes()[0].is_uploaded());

        object.set_geometry(&GeometryData::new());
        assert!(object.local_bounds().is_none());
    }

    #[test]
    fn shading_and_alpha_reach_the_uniform() {
        let object = Object::new("o", &generate_cube())
            .with_shading(Shading::Normals)
            .with_color([1.0, 0.0, 0.0, 0.5]);
        assert!(object.is_transparent());
        let uniform = object.uniform();
        assert_eq!(uniform.params[0], 1.0);
        assert_eq!(uniform.color[3], 0.5);
    }
}
