//! Error types for the platform side of the gallery.
//!
//! The canvas interaction logic never fails; everything that can go wrong lives
//! at the window/GPU boundary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("failed to create the event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create the window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create a rendering surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible graphics adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to open the graphics device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,

    #[error("render pipeline setup failed: {}", .0.join("; "))]
    Pipeline(Vec<String>),

    #[error("GPU ran out of memory while acquiring a frame")]
    OutOfMemory,
}

pub type Result<T> = std::result::Result<T, GalleryError>;
