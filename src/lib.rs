pub mod assembler;
pub mod camera;
pub mod cli;
pub mod config;
pub mod geometry;
pub mod material;
pub mod math;
pub mod model;
pub mod picking;
pub mod render;
pub mod scene;
pub mod session;
pub mod shapes;
pub mod viewport;

pub use assembler::assemble_scene;
pub use camera::{Camera, OrbitController};
pub use config::ViewerConfig;
pub use model::{demo_model, Model, ModelError};
pub use picking::{Highlight, Hit, HoverEngine, Label};
pub use scene::{NodeId, SceneGraph};
pub use session::{CameraPhase, ViewerSession};
pub use viewport::Viewport;
