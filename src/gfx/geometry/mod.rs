//! # Procedural Geometry Generation
//!
//! Every mesh in the gallery is generated in code: primitives for placed
//! shapes and demo props, grid lines, and tubes swept along drawn curves.
//!
//! ## Usage
//!
//! ```rust
//! use tessel::gfx::geometry::{build_line_tube, generate_torus};
//! use tessel::config::CanvasConfig;
//!
//! let torus = generate_torus(1.0, 0.5, 32, 100);
//! assert!(torus.triangle_count() > 0);
//!
//! let points = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]];
//! let tube = build_line_tube(&points, 2.0, &CanvasConfig::default()).unwrap();
//! assert_eq!(tube.radial_segments, 8);
//! ```

pub mod curve;
pub mod primitives;
pub mod tube;

pub use curve::CatmullRomCurve;
pub use primitives::*;
pub use tube::{build_line_tube, TubeGeometry};

use crate::gfx::scene::vertex::{LineVertex, Vertex3D};

/// Represents generated geometry data ready for GPU upload
#[derive(Debug, Clone, Default)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Texture coordinates (u, v)
    pub tex_coords: Vec<[f32; 2]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Axis-aligned bounds of the vertex positions, or `None` when empty.
    pub fn bounds(&self) -> Option<([f32; 3], [f32; 3])> {
        let first = *self.vertices.first()?;
        Some(self.vertices.iter().fold((first, first), |(mut min, mut max), v| {
            for axis in 0..3 {
                min[axis] = min[axis].min(v[axis]);
                max[axis] = max[axis].max(v[axis]);
            }
            (min, max)
        }))
    }

    /// Interleaves positions and normals into the renderer's vertex format.
    pub fn to_vertices(&self) -> Vec<Vertex3D> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, &position)| Vertex3D {
                position,
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
            })
            .collect()
    }
}

/// Coloured line segments, two vertices per segment.
#[derive(Debug, Clone, Default)]
pub struct LineGeometry {
    pub vertices: Vec<LineVertex>,
}

impl LineGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_segment(&mut self, from: [f32; 3], to: [f32; 3], color: [f32; 4]) {
        self.vertices.push(LineVertex { position: from, color });
        self.vertices.push(LineVertex { position: to, color });
    }

    pub fn segment_count(&self) -> usize {
        self.vertices.len() / 2
    }
}
