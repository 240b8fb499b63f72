use cgmath::{EuclideanSpace, Matrix4, Point3, SquareMatrix, Vector3};
use winit::event::{DeviceEvent, KeyEvent};

use super::{camera_controller::CameraController, orbit_camera::OrbitCamera, OPENGL_TO_WGPU_MATRIX};

pub struct CameraManager {
    pub camera: OrbitCamera,
    pub controller: CameraController,
}

impl CameraManager {
    pub fn new(camera: OrbitCamera, controller: CameraController) -> Self {
        Self { camera, controller }
    }

    pub fn process_event(&mut self, event: &DeviceEvent) -> bool {
        self.controller.process_events(event, &mut self.camera)
    }

    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        self.controller
            .process_keyed_events(event, &mut self.camera);
    }

    /// Applies damped motion and refreshes the camera uniform. Call once per frame.
    pub fn update(&mut self) {
        self.controller.update(&mut self.camera);
        self.camera.update_view_proj();
    }
}

pub trait Camera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32>;

    fn eye_position(&self) -> Vector3<f32>;

    fn build_uniform(&self) -> CameraUniform {
        let eye = self.eye_position();
        CameraUniform {
            view_position: [eye.x, eye.y, eye.z, 1.0],
            view_proj: convert_matrix4_to_array(self.build_view_projection_matrix()),
        }
    }
}

/// Orthographic camera measuring one world unit per pixel, centred on the
/// viewport. Used for screen-space overlays such as the view cube.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayCamera {
    pub width: f32,
    pub height: f32,
    pub eye: Vector3<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl OverlayCamera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1) as f32,
            height: height.max(1) as f32,
            eye: Vector3::new(0.0, 0.0, 100.0),
            znear: 0.1,
            zfar: 1000.0,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1) as f32;
        self.height = height.max(1) as f32;
    }
}

impl Camera for OverlayCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let view = Matrix4::look_at_rh(
            Point3::from_vec(self.eye),
            Point3::new(self.eye.x, self.eye.y, 0.0),
            Vector3::unit_y(),
        );
        let (hw, hh) = (self.width * 0.5, self.height * 0.5);
        let proj = OPENGL_TO_WGPU_MATRIX * cgmath::ortho(-hw, hw, -hh, hh, self.znear, self.zfar);
        proj * view
    }

    fn eye_position(&self) -> Vector3<f32> {
        self.eye
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug, PartialEq)]
pub struct CameraUniform {
    /// The eye position of the camera in homogenous coordinates.
    ///
    /// Homogenous coordinates are used to fullfill the 16 byte alignment requirement.
    pub view_position: [f32; 4],

    /// Contains the view projection matrix.
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: convert_matrix4_to_array(Matrix4::identity()),
        }
    }
}

pub fn convert_matrix4_to_array(matrix4: Matrix4<f32>) -> [[f32; 4]; 4] {
    matrix4.into()
}
