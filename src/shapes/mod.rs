//! Procedural geometry for the two primitives a model is made of: rods
//! spanning two points and the extruded reflector box.

mod prism;
mod rod;

pub use prism::{build_box, BoxFace, Prism, BOX_FACE_NAMES, DEFAULT_EXTRUSION_HEIGHT};
pub use rod::{build_rod, Rod, ROD_NAME};

use crate::math::Color;

/// Colours applied to freshly built parts and their outlines
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Style {
    pub part_color: Color,
    pub outline_color: Color,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            part_color: Color::WHITE,
            outline_color: Color::BLACK,
        }
    }
}
