//! Drawing the scene: a CPU rasterizer producing RGBA frames, and a wgpu
//! surface that presents them with the hover label on top.

pub mod raster;
pub mod surface;

pub use raster::{render_scene, FrameBuffer};
pub use surface::SurfaceRenderer;
