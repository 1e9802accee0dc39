use glam::Vec2;

use crate::assembler::assemble_scene;
use crate::camera::{Camera, OrbitController};
use crate::config::ViewerConfig;
use crate::math::Color;
use crate::model::{Model, ModelError};
use crate::picking::{Highlight, Hit, HoverEngine, Label};
use crate::scene::{NodeId, SceneGraph};
use crate::viewport::Viewport;

/// Which camera behaviour is active
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CameraPhase {
    /// Fixed Y-up framing set at construction
    Framing,
    /// Z-up orbit around the model centre, advanced every frame
    Orbiting,
}

/// Everything one viewer instance owns: the model it writes the orbit angle
/// back to, the scene graph, the committed camera pose and the hover state.
///
/// Frame ticks and pointer events arrive from independent sources and are
/// handled one at a time through `&mut self`. Their relative order is not
/// fixed, so a pick reads whatever pose the last [`ViewerSession::tick`]
/// committed, which may be one frame behind what is on screen. Sharing a
/// session across threads requires wrapping it in a lock so that both the
/// camera pose and the highlight slot stay serialized.
#[derive(Debug, Clone)]
pub struct ViewerSession {
    model: Model,
    scene: SceneGraph,
    camera: Camera,
    phase: CameraPhase,
    orbit: OrbitController,
    hover: HoverEngine,
    viewport: Viewport,
    background: Color,
    frame_count: u64,
}

impl ViewerSession {
    pub fn new(model: Model, config: &ViewerConfig, viewport: Viewport) -> Result<Self, ModelError> {
        let scene = assemble_scene(&model, config)?;
        Ok(Self {
            model,
            scene,
            camera: Camera::framing(&config.camera, viewport.aspect()),
            phase: CameraPhase::Framing,
            orbit: OrbitController::new(config.orbit.clone()),
            hover: HoverEngine::new(config.appearance.highlight_color, config.label.clone()),
            viewport,
            background: config.appearance.background,
            frame_count: 0,
        })
    }

    /// Per-frame update; call right before drawing. The first call ends the
    /// static framing and starts the orbit.
    pub fn tick(&mut self) {
        if self.phase == CameraPhase::Framing {
            log::debug!("Starting camera orbit at {}°", self.model.preview_camera_angle);
            self.phase = CameraPhase::Orbiting;
        }

        let mut pose = self.camera;
        self.orbit.advance(&mut self.model, &mut pose);
        self.camera = pose;
        self.frame_count += 1;
    }

    /// Pointer moved to `pointer` (physical pixels relative to the viewport)
    pub fn pointer_moved(&mut self, pointer: Vec2) -> Option<Hit> {
        self.hover
            .pointer_moved(&mut self.scene, &self.camera, &self.viewport, pointer)
    }

    pub fn pointer_left(&mut self) {
        self.hover.pointer_left(&mut self.scene);
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.camera.aspect = viewport.aspect();
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn phase(&self) -> CameraPhase {
        self.phase
    }

    pub fn label(&self) -> &Label {
        self.hover.label()
    }

    pub fn highlight(&self) -> Option<Highlight> {
        self.hover.highlight()
    }

    pub fn highlighted(&self) -> Option<NodeId> {
        self.hover.highlighted()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
