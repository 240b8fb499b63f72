//! # Scene Management Module
//!
//! Holds everything the renderer draws: procedurally generated objects with a
//! TRS transform, colour and shading mode, the light rig, an optional grid
//! helper, a screen-space overlay layer, and the orbit camera.
//!
//! ## Key Components
//!
//! - [`Scene`] - container iterated by the render engine each frame
//! - [`Object`] - mesh plus transform, colour and [`Shading`]
//! - [`LightRig`] - ambient term and up to [`MAX_LIGHTS`] lights
//! - [`Vertex3D`] / [`LineVertex`] - vertex formats
//!
//! Objects are identified by name; the canvas demo names mirrored shapes and
//! tubes after their store ids so they can be found and removed again.

pub mod lights;
pub mod object;
pub mod scene;
pub mod vertex;

pub use lights::{Light, LightKind, LightRig, MAX_LIGHTS};
pub use object::{DrawObject, Object, ObjectUniform, Shading};
pub use scene::{GridHelper, Scene, SceneStatistics};
pub use vertex::{LineVertex, Vertex3D};
