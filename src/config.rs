//! Viewer configuration.
//!
//! Values come from, in increasing priority:
//! 1. Built-in defaults
//! 2. A JSON configuration file (`--config`)
//! 3. Command-line flags

use std::path::Path;

use anyhow::{Context, Result};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::math::Color;
use crate::shapes::Style;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ViewerConfig {
    pub camera: CameraConfig,
    pub orbit: OrbitConfig,
    pub geometry: GeometryConfig,
    pub appearance: AppearanceConfig,
    pub label: LabelConfig,
}

/// Perspective projection and the static framing shown before the orbit starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub initial_position: Vec3,
    pub initial_target: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 48.0,
            near: 0.1,
            far: 1000.0,
            initial_position: Vec3::new(-60.0, 50.0, 150.0),
            initial_target: Vec3::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub radius: f32,
    /// Camera height is `max.z - height_offset`
    pub height_offset: f32,
    /// Degrees added to the orbit angle per frame
    pub step_degrees: f64,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            radius: 115.0,
            height_offset: 120.0,
            step_degrees: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    /// Rod width (local X) and height (local Y)
    pub rod_cross_section: Vec2,
    pub box_extrusion_height: f32,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            rod_cross_section: Vec2::new(2.0, 2.0),
            box_extrusion_height: crate::shapes::DEFAULT_EXTRUSION_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    pub background: Color,
    pub part_color: Color,
    pub outline_color: Color,
    pub highlight_color: Color,
    /// Length of the axes helper; 0 leaves it out
    pub axes_length: f32,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            part_color: Color::WHITE,
            outline_color: Color::BLACK,
            highlight_color: Color::from_hex(0xffaa00),
            axes_length: 100.0,
        }
    }
}

impl AppearanceConfig {
    pub fn style(&self) -> Style {
        Style {
            part_color: self.part_color,
            outline_color: self.outline_color,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Screen-space offset from the pointer, in pixels
    pub offset: Vec2,
    pub prefix: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            offset: Vec2::new(10.0, 10.0),
            prefix: "This is mesh: ".to_string(),
        }
    }
}

impl ViewerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid viewer configuration")
    }

    /// Read a config file; `None` yields the defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            log::debug!("No config file given, using defaults");
            return Ok(Self::default());
        };

        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config = Self::from_json(&json)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.orbit.radius, 115.0);
        assert_eq!(config.orbit.height_offset, 120.0);
        assert_eq!(config.orbit.step_degrees, 0.5);
        assert_eq!(config.appearance.highlight_color.to_hex(), 0xffaa00);
        assert_eq!(config.label.offset, Vec2::new(10.0, 10.0));
        assert_eq!(config.geometry.box_extrusion_height, 5.0);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = ViewerConfig::from_json(
            r##"{ "appearance": { "highlight_color": "#00ff00" }, "orbit": { "radius": 50 } }"##,
        )
        .unwrap();
        assert_eq!(config.appearance.highlight_color, Color::GREEN);
        assert_eq!(config.appearance.part_color, Color::WHITE);
        assert_eq!(config.orbit.radius, 50.0);
        assert_eq!(config.orbit.height_offset, 120.0);
        assert_eq!(config.camera, CameraConfig::default());
    }

    #[test]
    fn test_bad_color_is_rejected() {
        let err = ViewerConfig::from_json(r#"{ "appearance": { "background": "white" } }"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_load_without_path() {
        assert_eq!(ViewerConfig::load(None).unwrap(), ViewerConfig::default());
    }

    #[test]
    fn test_round_trip_json() {
        let config = ViewerConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(ViewerConfig::from_json(&json).unwrap(), config);
    }
}
