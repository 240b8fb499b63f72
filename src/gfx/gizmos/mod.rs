//! # Gizmos
//!
//! Visual aids drawn on top of a demo. Currently the orientation view cube,
//! which lives in the scene's overlay layer and mirrors the camera rotation.

pub mod view_cube;

pub use view_cube::{CubeFace, ViewCube};
