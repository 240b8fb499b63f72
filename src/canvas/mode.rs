//! Interaction modes and the shapes the canvas can place.

use std::fmt;

/// A shape that can be placed on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Triangle,
    Cube,
    Sphere,
    Star,
    Torus,
}

impl ShapeKind {
    /// All placeable shapes in toolbar order.
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Triangle,
        ShapeKind::Cube,
        ShapeKind::Sphere,
        ShapeKind::Star,
        ShapeKind::Torus,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ShapeKind::Triangle => "Triangle",
            ShapeKind::Cube => "Cube",
            ShapeKind::Sphere => "Sphere",
            ShapeKind::Star => "Star",
            ShapeKind::Torus => "Torus",
        }
    }

    /// Toolbar glyph shown next to the label.
    pub fn icon(self) -> &'static str {
        match self {
            ShapeKind::Triangle => "\u{25B2}",
            ShapeKind::Cube => "\u{25A0}",
            ShapeKind::Sphere => "\u{25CF}",
            ShapeKind::Star => "\u{2605}",
            ShapeKind::Torus => "\u{25EF}",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a primary-button gesture on the canvas does.
///
/// The variants are mutually exclusive, so a selected shape and draw mode can
/// never be active at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    /// Gestures only drive the orbit camera.
    #[default]
    Idle,
    /// A clean click places a shape of this kind.
    Placing(ShapeKind),
    /// A drag captures a freehand line.
    Drawing,
}

impl InteractionMode {
    pub fn is_drawing(self) -> bool {
        matches!(self, InteractionMode::Drawing)
    }

    /// The shape a click would place, if any.
    pub fn placing(self) -> Option<ShapeKind> {
        match self {
            InteractionMode::Placing(kind) => Some(kind),
            _ => None,
        }
    }

    /// Orbit controls fight with line capture, so they are off while drawing.
    pub fn allows_orbit(self) -> bool {
        !self.is_drawing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drawing_disables_orbit() {
        assert!(InteractionMode::Idle.allows_orbit());
        assert!(InteractionMode::Placing(ShapeKind::Cube).allows_orbit());
        assert!(!InteractionMode::Drawing.allows_orbit());
    }

    #[test]
    fn placing_exposes_its_shape() {
        assert_eq!(
            InteractionMode::Placing(ShapeKind::Star).placing(),
            Some(ShapeKind::Star)
        );
        assert_eq!(InteractionMode::Drawing.placing(), None);
        assert_eq!(InteractionMode::default(), InteractionMode::Idle);
    }
}
