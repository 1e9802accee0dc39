use glam::Vec2;

/// Rendering area in physical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Size in bytes of an RGBA8 buffer covering the viewport
    pub fn buffer_size(&self) -> usize {
        self.pixel_count() * 4
    }

    /// Pixel coordinates (origin top-left, y down) to normalized device
    /// coordinates (origin centre, both axes in [-1, 1], y up)
    pub fn to_ndc(&self, pointer: Vec2) -> Vec2 {
        let width = self.width.max(1) as f32;
        let height = self.height.max(1) as f32;
        Vec2::new(
            pointer.x / width * 2.0 - 1.0,
            -(pointer.y / height) * 2.0 + 1.0,
        )
    }

    /// Inverse of [`Viewport::to_ndc`]
    pub fn to_pixels(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.width as f32,
            (1.0 - ndc.y) * 0.5 * self.height as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ndc_corners() {
        let vp = Viewport::new(800, 600);
        assert_eq!(vp.to_ndc(Vec2::new(0.0, 0.0)), Vec2::new(-1.0, 1.0));
        assert_eq!(vp.to_ndc(Vec2::new(800.0, 600.0)), Vec2::new(1.0, -1.0));
        assert_eq!(vp.to_ndc(Vec2::new(400.0, 300.0)), Vec2::ZERO);
    }

    #[test]
    fn test_ndc_round_trip() {
        let vp = Viewport::new(1280, 720);
        let p = Vec2::new(317.0, 42.0);
        assert!((vp.to_pixels(vp.to_ndc(p)) - p).length() < 1e-3);
    }

    #[test]
    fn test_zero_height_aspect() {
        assert_eq!(Viewport::new(640, 0).aspect(), 1.0);
        assert_eq!(Viewport::new(640, 480).buffer_size(), 640 * 480 * 4);
    }
}
