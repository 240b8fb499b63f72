//! WGPU-based rendering engine
//!
//! Owns the surface, device and pipelines and draws a [`Scene`] in three
//! passes: the main pass (opaque meshes, grid lines, then blended meshes back
//! to front), an overlay pass with its own camera and a fresh depth buffer, and
//! finally the UI callback.

use std::sync::Arc;

use cgmath::MetricSpace;
use log::{info, warn};
use wgpu::TextureFormat;

use crate::{
    error::{GalleryError, Result},
    gfx::{
        camera::Camera,
        resources::{
            global_bindings::{GlobalBindings, GlobalUBO, GlobalUBOContent},
            texture_resource::TextureResource,
        },
        scene::{
            object::{object_bind_group_layout, DrawObject, Object},
            scene::Scene,
        },
    },
    wgpu_utils::BindGroupLayoutWithDesc,
};

use super::pipeline_manager::{PipelineConfig, PipelineManager, VertexLayoutKind};

const MESH_PIPELINE: &str = "Mesh";
const TRANSPARENT_PIPELINE: &str = "MeshTransparent";
const GRID_PIPELINE: &str = "Grid";

/// Background behind every demo.
pub const DEFAULT_CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.08,
    g: 0.09,
    b: 0.11,
    a: 1.0,
};

/// Core rendering engine managing GPU resources and draw calls
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    format: TextureFormat,
    pipeline_manager: PipelineManager,
    scene_ubo: GlobalUBO,
    scene_bind_group: wgpu::BindGroup,
    overlay_ubo: GlobalUBO,
    overlay_bind_group: wgpu::BindGroup,
    object_layout: BindGroupLayoutWithDesc,
    pub clear_color: wgpu::Color,
}

impl RenderEngine {
    /// Creates a new render engine for the given window
    ///
    /// # Errors
    /// Fails when no surface, adapter, device or surface format is available,
    /// or when a pipeline cannot be built.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
    ) -> Result<RenderEngine> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        info!("using adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or(GalleryError::NoSurfaceFormat)?;
        let alpha_mode = surface_capabilities
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        let global_bindings = GlobalBindings::new(&device);
        let scene_ubo = GlobalUBO::new(&device);
        let scene_bind_group =
            global_bindings.create_bind_group(&device, &scene_ubo, "Scene Globals Bind Group");
        let overlay_ubo = GlobalUBO::new(&device);
        let overlay_bind_group =
            global_bindings.create_bind_group(&device, &overlay_ubo, "Overlay Globals Bind Group");
        let object_layout = object_bind_group_layout(&device);

        let device_handle: Arc<wgpu::Device> = device.into();
        let queue_handle: Arc<wgpu::Queue> = queue.into();
        let mut pipeline_manager = PipelineManager::new(device_handle.clone());

        pipeline_manager.load_shader("mesh", include_str!("mesh.wgsl"));
        pipeline_manager.load_shader("grid", include_str!("grid.wgsl"));

        let mesh_config = PipelineConfig::default()
            .with_shader("mesh")
            .with_color_format(format)
            .with_depth(TextureResource::DEPTH_FORMAT)
            // Tubes and placed shapes are viewed from every side.
            .with_cull_mode(None)
            .with_bind_group_layouts(vec![
                global_bindings.bind_group_layout().clone(),
                object_layout.layout.clone(),
            ]);

        pipeline_manager.register_pipeline(
            MESH_PIPELINE,
            mesh_config.clone().with_label("MESH"),
        );
        pipeline_manager.register_pipeline(
            TRANSPARENT_PIPELINE,
            mesh_config.with_label("MESH TRANSPARENT").transparent(),
        );
        pipeline_manager.register_pipeline(
            GRID_PIPELINE,
            PipelineConfig::default()
                .with_label("GRID")
                .with_shader("grid")
                .with_color_format(format)
                .with_depth(TextureResource::DEPTH_FORMAT)
                .with_vertex_layout(VertexLayoutKind::Line)
                .with_primitive_topology(wgpu::PrimitiveTopology::LineList)
                .with_cull_mode(None)
                .with_bind_group_layouts(vec![global_bindings.bind_group_layout().clone()]),
        );

        pipeline_manager
            .create_all_pipelines()
            .map_err(GalleryError::Pipeline)?;
        let stats = pipeline_manager.stats();
        info!(
            "render engine ready ({:?}, {}x{}, {} pipelines from {} shaders)",
            format, config.width, config.height, stats.total_pipelines, stats.loaded_shaders
        );

        Ok(RenderEngine {
            surface,
            device: device_handle,
            queue: queue_handle,
            config,
            depth_texture,
            format,
            pipeline_manager,
            scene_ubo,
            scene_bind_group,
            overlay_ubo,
            overlay_bind_group,
            object_layout,
            clear_color: DEFAULT_CLEAR_COLOR,
        })
    }

    /// Pushes camera, lights, transforms and new meshes to the GPU.
    pub fn sync_scene(&mut self, scene: &mut Scene) {
        let camera_uniform = scene.camera_manager.camera.build_uniform();
        self.scene_ubo
            .update_content(&self.queue, GlobalUBOContent::new(camera_uniform, &scene.lights));
        self.overlay_ubo.update_content(
            &self.queue,
            GlobalUBOContent::unlit(scene.overlay.camera.build_uniform()),
        );

        for object in scene.objects.iter_mut().chain(scene.overlay.objects.iter_mut()) {
            object.sync_gpu(&self.device, &self.queue, &self.object_layout);
        }
        if let Some(grid) = &mut scene.grid {
            grid.sync_gpu(&self.device);
        }
    }

    /// Renders a frame with an optional UI overlay.
    ///
    /// Lost or outdated surfaces are reconfigured and the frame is skipped; so is
    /// a timed-out acquire. Only running out of memory is reported as an error.
    pub fn render_frame<F>(&mut self, scene: &Scene, ui_callback: Option<F>) -> Result<()>
    where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(GalleryError::OutOfMemory),
            Err(e) => {
                warn!("skipping frame: {}", e);
                return Ok(());
            }
        };

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(self.depth_attachment()),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_bind_group(0, &self.scene_bind_group, &[]);

            if let Some(pipeline) = self.pipeline_manager.pipeline(MESH_PIPELINE) {
                render_pass.set_pipeline(pipeline);
                for object in scene.objects.iter().filter(|o| o.visible && !o.is_transparent()) {
                    render_pass.draw_object(object);
                }
            }

            if let (Some(pipeline), Some(grid)) =
                (self.pipeline_manager.pipeline(GRID_PIPELINE), &scene.grid)
            {
                if let Some(buffer) = grid.vertex_buffer() {
                    render_pass.set_pipeline(pipeline);
                    render_pass.set_vertex_buffer(0, buffer.slice(..));
                    render_pass.draw(0..grid.vertex_count(), 0..1);
                }
            }

            if let Some(pipeline) = self.pipeline_manager.pipeline(TRANSPARENT_PIPELINE) {
                let eye = scene.camera_manager.camera.eye;
                let mut blended: Vec<&Object> = scene
                    .objects
                    .iter()
                    .filter(|o| o.visible && o.is_transparent())
                    .collect();
                blended.sort_by(|a, b| {
                    b.position
                        .distance2(eye)
                        .total_cmp(&a.position.distance2(eye))
                });

                render_pass.set_pipeline(pipeline);
                for object in blended {
                    render_pass.draw_object(object);
                }
            }
        }

        if !scene.overlay.objects.is_empty() {
            let mut overlay_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Overlay Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(self.depth_attachment()),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            overlay_pass.set_bind_group(0, &self.overlay_bind_group, &[]);
            if let Some(pipeline) = self.pipeline_manager.pipeline(MESH_PIPELINE) {
                overlay_pass.set_pipeline(pipeline);
                for object in scene.overlay.objects.iter().filter(|o| o.visible) {
                    overlay_pass.draw_object(object);
                }
            }
        }

        if let Some(ui_callback) = ui_callback {
            ui_callback(
                &self.device,
                &self.queue,
                &mut encoder,
                &surface_texture_view,
            );
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }

    fn depth_attachment(&self) -> wgpu::RenderPassDepthStencilAttachment<'_> {
        wgpu::RenderPassDepthStencilAttachment {
            view: &self.depth_texture.view,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(1.0),
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: None,
        }
    }

    /// Resizes the surface and recreates the depth buffer. Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }

    pub fn surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }
}
