//! Global uniform bindings for camera and scene lighting
//!
//! One uniform buffer per camera (the main orbit camera and the overlay camera)
//! is bound to slot 0 of every pipeline.

use crate::{
    gfx::{
        camera::CameraUniform,
        scene::lights::{LightKind, LightRig, MAX_LIGHTS},
    },
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// One light as the shaders see it.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    /// xyz: position, w: 0 for directional, 1 for point
    pub position: [f32; 4],
    /// rgb: colour, a: intensity
    pub color: [f32; 4],
}

/// Global uniform buffer content.
/// MUST match the `Globals` struct in the shaders exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUBOContent {
    pub view_position: [f32; 4],
    pub view_proj: [[f32; 4]; 4],
    /// rgb: ambient colour pre-multiplied by intensity
    pub ambient: [f32; 4],
    /// x: number of active lights
    pub light_count: [u32; 4],
    pub lights: [LightUniform; MAX_LIGHTS],
}

impl GlobalUBOContent {
    pub fn new(camera: CameraUniform, rig: &LightRig) -> Self {
        let mut lights = [LightUniform::default(); MAX_LIGHTS];
        for (slot, light) in lights.iter_mut().zip(rig.lights()) {
            let w = match light.kind {
                LightKind::Directional => 0.0,
                LightKind::Point => 1.0,
            };
            let [x, y, z] = light.position;
            let [r, g, b] = light.color;
            *slot = LightUniform {
                position: [x, y, z, w],
                color: [r, g, b, light.intensity],
            };
        }

        let [r, g, b] = rig.ambient_color;
        let a = rig.ambient_intensity;
        Self {
            view_position: camera.view_position,
            view_proj: camera.view_proj,
            ambient: [r * a, g * a, b * a, 1.0],
            light_count: [rig.lights().len().min(MAX_LIGHTS) as u32, 0, 0, 0],
            lights,
        }
    }

    /// Camera only, no lights and full ambient. Used for the overlay layer.
    pub fn unlit(camera: CameraUniform) -> Self {
        Self {
            view_position: camera.view_position,
            view_proj: camera.view_proj,
            ambient: [1.0, 1.0, 1.0, 1.0],
            light_count: [0; 4],
            lights: [LightUniform::default(); MAX_LIGHTS],
        }
    }
}

/// Type alias for the global uniform buffer
pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

/// Layout plus one bind group per global uniform buffer.
pub struct GlobalBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform())
            .create(device, "Globals Bind Group Layout");

        GlobalBindings { bind_group_layout }
    }

    pub fn create_bind_group(&self, device: &wgpu::Device, ubo: &GlobalUBO, label: &str) -> wgpu::BindGroup {
        BindGroupBuilder::new(&self.bind_group_layout)
            .resource(ubo.binding_resource())
            .create(device, label)
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }
}
