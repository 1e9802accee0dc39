use glam::Vec3;

use super::Style;
use crate::geometry::{Geometry, Transform};
use crate::material::Material;
use crate::scene::{Outline, Part};

pub const DEFAULT_EXTRUSION_HEIGHT: f32 = 5.0;

/// Face names in build order: bottom, top, then the four sides
pub const BOX_FACE_NAMES: [&str; 6] = [
    "Bottom face",
    "Top face",
    "Side face 0",
    "Side face 1",
    "Side face 2",
    "Side face 3",
];

#[derive(Clone, Debug)]
pub struct BoxFace {
    pub part: Part,
    pub outline: Outline,
}

/// Flat-topped prism made of six independently pickable faces
#[derive(Clone, Debug)]
pub struct Prism {
    pub faces: Vec<BoxFace>,
}

/// Extrude `base` straight up the Z axis by `extrusion_height`.
///
/// Faces are built directly in world coordinates and are double-sided, since
/// the winding of `base` is not checked.
pub fn build_box(base: [Vec3; 4], extrusion_height: f32, style: &Style) -> Prism {
    let lift = Vec3::new(0.0, 0.0, extrusion_height);
    let top = base.map(|p| p + lift);

    let sides = (0..4).map(|i| {
        let next = (i + 1) % 4;
        [base[i], base[next], top[next], top[i]]
    });

    let faces = std::iter::once(base)
        .chain(std::iter::once(top))
        .chain(sides)
        .zip(BOX_FACE_NAMES)
        .map(|(corners, name)| {
            let geometry = Geometry::quad(corners);
            let outline = Outline::of(&geometry, Transform::IDENTITY, style.outline_color);
            let part = Part::new(
                name,
                geometry,
                Material::double_sided(style.part_color),
                Transform::IDENTITY,
            );
            BoxFace { part, outline }
        })
        .collect();

    Prism { faces }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Side;

    fn base() -> [Vec3; 4] {
        [
            Vec3::new(0.0, 0.0, -5.0),
            Vec3::new(10.0, 0.0, -5.0),
            Vec3::new(10.0, 10.0, -5.0),
            Vec3::new(0.0, 10.0, -5.0),
        ]
    }

    #[test]
    fn test_six_named_faces() {
        let prism = build_box(base(), DEFAULT_EXTRUSION_HEIGHT, &Style::default());
        let names: Vec<&str> = prism.faces.iter().map(|f| f.part.name()).collect();
        assert_eq!(names, BOX_FACE_NAMES);
    }

    #[test]
    fn test_top_face_is_lifted() {
        let prism = build_box(base(), DEFAULT_EXTRUSION_HEIGHT, &Style::default());
        let bottom = prism.faces[0].part.geometry().positions();
        let top = prism.faces[1].part.geometry().positions();
        assert!(bottom.iter().all(|p| p.z == -5.0));
        assert!(top.iter().all(|p| p.z == 0.0));
    }

    #[test]
    fn test_side_face_corners() {
        let b = base();
        let prism = build_box(b, 5.0, &Style::default());
        let side1 = prism.faces[3].part.geometry().positions();
        let lift = Vec3::new(0.0, 0.0, 5.0);
        assert_eq!(side1, &[b[1], b[2], b[2] + lift, b[1] + lift]);
        let side3 = prism.faces[5].part.geometry().positions();
        assert_eq!(side3, &[b[3], b[0], b[0] + lift, b[3] + lift]);
    }

    #[test]
    fn test_faces_are_double_sided_with_outlines() {
        let prism = build_box(base(), 5.0, &Style::default());
        for face in &prism.faces {
            assert_eq!(face.part.material().side(), Side::Double);
            assert_eq!(face.part.geometry().indices(), &[0, 1, 2, 0, 2, 3]);
            assert_eq!(face.outline.edges().len(), 4);
        }
    }

    #[test]
    fn test_skewed_quad_still_six_faces() {
        let skewed = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(7.0, 1.0, 0.5),
            Vec3::new(9.0, 12.0, 0.0),
            Vec3::new(-2.0, 6.0, 0.2),
        ];
        let prism = build_box(skewed, 3.0, &Style::default());
        assert_eq!(prism.faces.len(), 6);
    }
}
