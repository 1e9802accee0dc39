use glam::{Vec2, Vec3};

use super::Style;
use crate::geometry::{Geometry, Transform};
use crate::material::Material;
use crate::scene::{Outline, Part};

/// Every rod carries the same label
pub const ROD_NAME: &str = "Rod";

/// A beam between two points plus its edge outline
#[derive(Clone, Debug)]
pub struct Rod {
    pub part: Part,
    pub outline: Outline,
    pub length: f32,
    pub center: Vec3,
}

/// Build a rectangular beam from `start` to `end`.
///
/// The beam is a `cross_section.x` × `cross_section.y` box whose length runs
/// along local Z. It sits at the midpoint with local +Z turned toward `end`.
/// Coincident endpoints give a zero-length beam with identity orientation.
pub fn build_rod(start: Vec3, end: Vec3, cross_section: Vec2, style: &Style) -> Rod {
    let length = start.distance(end);
    let center = start.lerp(end, 0.5);

    let geometry = Geometry::cuboid(cross_section.x, cross_section.y, length);
    let transform = Transform::looking_at(center, end);
    let outline = Outline::of(&geometry, transform, style.outline_color);
    let part = Part::new(ROD_NAME, geometry, Material::basic(style.part_color), transform);

    Rod {
        part,
        outline,
        length,
        center,
    }
}
