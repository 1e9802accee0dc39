use glam::{Vec2, Vec3};

use crate::camera::Camera;
use crate::material::{Material, Side};
use crate::math::Color;
use crate::scene::SceneGraph;
use crate::viewport::Viewport;

/// Lines win the depth test against surfaces up to this far behind them
const LINE_DEPTH_BIAS: f32 = 0.05;
/// Upper bound on Bresenham steps for a single line
const MAX_LINE_STEPS: i32 = 1 << 14;

/// Vertex after projection: pixel position plus `1 / w`, which interpolates
/// linearly across the screen
#[derive(Copy, Clone, Debug)]
struct ScreenVertex {
    pos: Vec2,
    inv_w: f32,
}

/// RGBA8 colour buffer with a depth buffer holding view distance
#[derive(Clone)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
    depth: Vec<f32>,
}

impl FrameBuffer {
    pub fn new(viewport: Viewport) -> Self {
        let count = viewport.pixel_count();
        Self {
            width: viewport.width,
            height: viewport.height,
            pixels: vec![[0, 0, 0, 255]; count],
            depth: vec![f32::INFINITY; count],
        }
    }

    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color.to_rgba8());
        self.depth.fill(f32::INFINITY);
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(y * self.width + x) as usize])
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Write a pixel if `depth` passes the test, allowing `bias` of slack
    fn plot(&mut self, x: i32, y: i32, depth: f32, bias: f32, color: [u8; 4]) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = (y as u32 * self.width + x as u32) as usize;
        if depth <= self.depth[idx] + bias {
            self.depth[idx] = self.depth[idx].min(depth);
            self.pixels[idx] = color;
        }
    }

    /// Depth-tested triangle fill, sampling at pixel centres
    fn fill_triangle(&mut self, v: [ScreenVertex; 3], color: [u8; 4]) {
        let [a, b, c] = v;
        let area = edge(a.pos, b.pos, c.pos);
        if area.abs() < f32::EPSILON {
            return;
        }

        let min = a.pos.min(b.pos).min(c.pos).floor().max(Vec2::ZERO);
        let max = a
            .pos
            .max(b.pos)
            .max(c.pos)
            .ceil()
            .min(Vec2::new(self.width as f32 - 1.0, self.height as f32 - 1.0));
        if min.x > max.x || min.y > max.y {
            return;
        }

        for y in min.y as i32..=max.y as i32 {
            for x in min.x as i32..=max.x as i32 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let w0 = edge(b.pos, c.pos, p) / area;
                let w1 = edge(c.pos, a.pos, p) / area;
                let w2 = edge(a.pos, b.pos, p) / area;
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }
                let inv_w = w0 * a.inv_w + w1 * b.inv_w + w2 * c.inv_w;
                self.plot(x, y, 1.0 / inv_w, 0.0, color);
            }
        }
    }

    /// Depth-tested line using Bresenham's algorithm
    fn draw_line(&mut self, from: ScreenVertex, to: ScreenVertex, color: [u8; 4]) {
        let (mut x, mut y) = (from.pos.x.round() as i32, from.pos.y.round() as i32);
        let (x2, y2) = (to.pos.x.round() as i32, to.pos.y.round() as i32);

        let dx = (x2 - x).abs();
        let dy = -(y2 - y).abs();
        let steps = dx.max(-dy);
        if steps > MAX_LINE_STEPS {
            return;
        }
        let sx = if x < x2 { 1 } else { -1 };
        let sy = if y < y2 { 1 } else { -1 };
        let mut err = dx + dy;
        let mut step = 0;

        loop {
            let t = if steps == 0 { 0.0 } else { step as f32 / steps as f32 };
            let inv_w = from.inv_w + (to.inv_w - from.inv_w) * t;
            self.plot(x, y, 1.0 / inv_w, LINE_DEPTH_BIAS, color);

            if x == x2 && y == y2 {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
            step += 1;
        }
    }
}

/// Twice the signed area of `a b p`
fn edge(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

/// Projects world points for one frame
struct Projector {
    view_projection: glam::Mat4,
    viewport: Viewport,
    near: f32,
}

impl Projector {
    fn new(camera: &Camera, viewport: Viewport) -> Self {
        Self {
            view_projection: camera.view_projection(),
            viewport,
            near: camera.near,
        }
    }

    fn project(&self, world: Vec3) -> Option<ScreenVertex> {
        let clip = self.view_projection * world.extend(1.0);
        if clip.w <= self.near {
            return None;
        }
        let ndc = Vec2::new(clip.x, clip.y) / clip.w;
        Some(ScreenVertex {
            pos: self.viewport.to_pixels(ndc),
            inv_w: 1.0 / clip.w,
        })
    }
}

fn shade(material: &Material, normal: Vec3) -> [u8; 4] {
    match material {
        Material::Basic { color, .. } => color.to_rgba8(),
        Material::Normal => {
            let n = normal.normalize_or_zero() * 0.5 + Vec3::splat(0.5);
            [
                (n.x * 255.0) as u8,
                (n.y * 255.0) as u8,
                (n.z * 255.0) as u8,
                255,
            ]
        }
    }
}

/// Draw `scene` from `camera`: parts as flat colour, then outlines and axes
/// as lines on top. Primitives touching the near plane are skipped.
pub fn render_scene(
    scene: &SceneGraph,
    camera: &Camera,
    viewport: Viewport,
    background: Color,
) -> FrameBuffer {
    let mut frame = FrameBuffer::new(viewport);
    frame.clear(background);
    let projector = Projector::new(camera, viewport);

    for (_, part) in scene.parts() {
        let material = part.material();
        for tri in part.world_triangles() {
            let Some(screen) = project_all(&projector, tri) else {
                continue;
            };
            // Pixel space has y down, so front faces come out clockwise
            if material.side() == Side::Front && edge(screen[0].pos, screen[1].pos, screen[2].pos) > 0.0 {
                continue;
            }
            let normal = (tri[1] - tri[0]).cross(tri[2] - tri[0]);
            frame.fill_triangle(screen, shade(material, normal));
        }
    }

    for outline in scene.outlines() {
        let color = outline.color().to_rgba8();
        for segment in outline.world_segments() {
            if let Some([a, b]) = project_all(&projector, &segment) {
                frame.draw_line(a, b, color);
            }
        }
    }

    for axes in scene.axes() {
        for (segment, color) in axes.segments() {
            if let Some([a, b]) = project_all(&projector, &segment) {
                frame.draw_line(a, b, color.to_rgba8());
            }
        }
    }

    frame
}

fn project_all<const N: usize>(projector: &Projector, points: &[Vec3; N]) -> Option<[ScreenVertex; N]> {
    let mut out = [ScreenVertex {
        pos: Vec2::ZERO,
        inv_w: 0.0,
    }; N];
    for (slot, &p) in out.iter_mut().zip(points) {
        *slot = projector.project(p)?;
    }
    Some(out)
}
