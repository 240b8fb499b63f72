//! Tunable settings for the gallery and the interactive canvas.
//!
//! Everything here is plain data with sensible defaults; nothing is read from
//! disk. The only environment hook is `TESSEL_DEMO`, which picks the demo shown
//! at start-up.

use std::time::Duration;

/// Environment variable naming the demo to open first (e.g. `rotating-cubes`).
pub const START_DEMO_ENV: &str = "TESSEL_DEMO";

/// Settings for the interactive canvas demo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasConfig {
    /// Maximum pointer travel (world units) for a press/release to count as a click.
    pub click_move_threshold: f32,
    /// Maximum press duration for a press/release to count as a click.
    pub click_max_duration: Duration,
    /// Camera pan speed for held arrow keys, in world units per second.
    pub pan_speed: f32,
    /// Smallest thickness the toolbar slider allows.
    pub min_line_thickness: u8,
    /// Largest thickness the toolbar slider allows.
    pub max_line_thickness: u8,
    /// Thickness selected when the canvas opens.
    pub default_line_thickness: u8,
    /// Divides the slider thickness to get a world-space tube radius.
    pub thickness_scale: f32,
    /// Lower bound on the number of tube segments along a drawn line.
    pub min_tube_segments: u32,
    /// Sides of the tube cross-section.
    pub tube_radial_segments: u32,
    /// Edge length of the invisible ground plane used for hit-testing.
    pub ground_size: f32,
    /// Spin of placed shapes about Y, radians per second.
    pub spin_speed: f32,
    /// Extra spin of stars about Z, radians per second.
    pub star_roll_speed: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            click_move_threshold: 0.1,
            click_max_duration: Duration::from_millis(300),
            pan_speed: 20.0,
            min_line_thickness: 1,
            max_line_thickness: 5,
            default_line_thickness: 2,
            thickness_scale: 50.0,
            min_tube_segments: 32,
            tube_radial_segments: 8,
            ground_size: 1000.0,
            spin_speed: 0.6,
            star_roll_speed: 0.3,
        }
    }
}

impl CanvasConfig {
    /// Clamps a requested slider value into the configured range.
    pub fn clamp_thickness(&self, thickness: u8) -> u8 {
        thickness.clamp(self.min_line_thickness, self.max_line_thickness)
    }
}

/// Settings for the gallery window.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Id of the demo opened first; `None` opens the interactive canvas.
    pub start_demo: Option<String>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            title: "Tessel - 3D Rendering Gallery".to_string(),
            width: 1280,
            height: 800,
            start_demo: None,
        }
    }
}

impl GalleryConfig {
    /// Default settings with `TESSEL_DEMO` applied when it is set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(demo) = std::env::var(START_DEMO_ENV) {
            let demo = demo.trim();
            if !demo.is_empty() {
                config.start_demo = Some(demo.to_string());
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_defaults_match_the_click_heuristic() {
        let config = CanvasConfig::default();
        assert_eq!(config.click_move_threshold, 0.1);
        assert_eq!(config.click_max_duration, Duration::from_millis(300));
        assert_eq!(config.pan_speed, 20.0);
        assert_eq!(config.default_line_thickness, 2);
    }

    #[test]
    fn thickness_is_clamped_to_slider_range() {
        let config = CanvasConfig::default();
        assert_eq!(config.clamp_thickness(0), 1);
        assert_eq!(config.clamp_thickness(3), 3);
        assert_eq!(config.clamp_thickness(9), 5);
    }
}
