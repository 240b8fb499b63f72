//! Scene lighting: an ambient term plus a handful of directional and point lights.

use log::warn;

/// Upper bound on lights the shaders accept.
pub const MAX_LIGHTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightKind {
    /// Parallel rays arriving from `position` towards the origin.
    Directional,
    /// Rays radiating from `position`.
    Point,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub intensity: f32,
}

impl Light {
    pub fn directional(position: [f32; 3], color: [f32; 3], intensity: f32) -> Self {
        Self {
            kind: LightKind::Directional,
            position,
            color,
            intensity,
        }
    }

    pub fn point(position: [f32; 3], color: [f32; 3], intensity: f32) -> Self {
        Self {
            kind: LightKind::Point,
            position,
            color,
            intensity,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LightRig {
    pub ambient_color: [f32; 3],
    pub ambient_intensity: f32,
    lights: Vec<Light>,
}

impl LightRig {
    pub fn new(ambient_intensity: f32) -> Self {
        Self {
            ambient_color: [1.0, 1.0, 1.0],
            ambient_intensity,
            lights: Vec::new(),
        }
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Adds a light. Returns `false` (and drops it) once `MAX_LIGHTS` are in use.
    pub fn push(&mut self, light: Light) -> bool {
        if self.lights.len() >= MAX_LIGHTS {
            warn!("light limit of {} reached, ignoring {:?}", MAX_LIGHTS, light.kind);
            return false;
        }
        self.lights.push(light);
        true
    }

    pub fn clear(&mut self) {
        self.lights.clear();
    }

    pub fn with_light(mut self, light: Light) -> Self {
        self.push(light);
        self
    }
}

impl Default for LightRig {
    /// Soft ambient plus one white key light, so unconfigured scenes are readable.
    fn default() -> Self {
        Self::new(0.3).with_light(Light::directional([5.0, 10.0, 5.0], [1.0, 1.0, 1.0], 1.0))
    }
}
