use crate::math::Color;

/// Which triangle faces get drawn
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Side {
    Front,
    Double,
}

/// Surface appearance of a part
#[derive(Clone, Debug, PartialEq)]
pub enum Material {
    /// Unlit flat colour; the only kind whose colour can be changed
    Basic { color: Color, side: Side },
    /// Shaded from the surface normal; has no colour of its own
    Normal,
}

impl Material {
    pub fn basic(color: Color) -> Self {
        Material::Basic {
            color,
            side: Side::Front,
        }
    }

    pub fn double_sided(color: Color) -> Self {
        Material::Basic {
            color,
            side: Side::Double,
        }
    }

    pub fn color(&self) -> Option<Color> {
        match self {
            Material::Basic { color, .. } => Some(*color),
            Material::Normal => None,
        }
    }

    /// Returns `false` and leaves the material untouched when it has no
    /// colour to set.
    pub fn set_color(&mut self, new_color: Color) -> bool {
        match self {
            Material::Basic { color, .. } => {
                *color = new_color;
                true
            }
            Material::Normal => false,
        }
    }

    pub fn side(&self) -> Side {
        match self {
            Material::Basic { side, .. } => *side,
            Material::Normal => Side::Front,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_color_round_trip() {
        let mut m = Material::double_sided(Color::WHITE);
        assert!(m.set_color(Color::from_hex(0xffaa00)));
        assert_eq!(m.color(), Some(Color::from_hex(0xffaa00)));
        assert!(m.set_color(Color::WHITE));
        assert_eq!(m.color(), Some(Color::WHITE));
        assert_eq!(m.side(), Side::Double);
    }

    #[test]
    fn test_normal_material_ignores_color() {
        let mut m = Material::Normal;
        assert!(!m.set_color(Color::RED));
        assert_eq!(m, Material::Normal);
        assert_eq!(m.color(), None);
    }
}
