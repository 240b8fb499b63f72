//! Interaction core of the 3D canvas.
//!
//! Nothing in here touches the GPU or the window. The host feeds ground-plane
//! hit points, key presses and timestamps into an [`InteractionController`] and
//! mirrors the resulting [`ObjectStore`] into its scene.

pub mod controller;
pub mod keyboard;
pub mod mode;
pub mod store;

pub use controller::{CanvasEvent, InteractionController, PendingClick};
pub use keyboard::{HeldKeys, PanKey};
pub use mode::{InteractionMode, ShapeKind};
pub use store::{DrawnLine, LineId, ObjectId, ObjectStore, PlacedObject};

/// A point in world space.
pub type WorldPoint = [f32; 3];

/// Euclidean distance between two world points.
pub fn distance(a: WorldPoint, b: WorldPoint) -> f32 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}
