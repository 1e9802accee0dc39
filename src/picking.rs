//! Pointer picking with a single exclusive highlight and a hover label.

use glam::{Vec2, Vec3};

use crate::camera::Camera;
use crate::config::LabelConfig;
use crate::math::{Color, Ray};
use crate::scene::{NodeId, SceneGraph};
use crate::viewport::Viewport;

/// A pickable part struck by a ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub part: NodeId,
    pub distance: f32,
    pub point: Vec3,
}

/// Every pickable part hit by `ray`, nearest first. Parts at equal distance
/// keep scene traversal order.
pub fn intersect_parts(scene: &SceneGraph, ray: &Ray) -> Vec<Hit> {
    let mut hits: Vec<Hit> = scene
        .pickable_parts()
        .filter_map(|(id, part)| {
            part.intersect(ray).map(|distance| Hit {
                part: id,
                distance,
                point: ray.at(distance),
            })
        })
        .collect();
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

/// Nearest pickable part along `ray`
pub fn pick(scene: &SceneGraph, ray: &Ray) -> Option<Hit> {
    intersect_parts(scene, ray).into_iter().next()
}

/// The part currently drawn in the highlight colour, with the colour it had
/// before. Holding both in one value keeps them set or unset together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub part: NodeId,
    pub saved_color: Color,
}

/// Floating text that follows the pointer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Label {
    pub visible: bool,
    pub text: String,
    /// Top-left corner in physical pixels
    pub position: Vec2,
}

/// Hover state machine driven by pointer events.
///
/// Its only side effects are the colour of at most one part, its own
/// highlight record and the label.
#[derive(Debug, Clone)]
pub struct HoverEngine {
    highlight: Option<Highlight>,
    label: Label,
    pointer: Option<Vec2>,
    highlight_color: Color,
    label_config: LabelConfig,
}

impl HoverEngine {
    pub fn new(highlight_color: Color, label_config: LabelConfig) -> Self {
        Self {
            highlight: None,
            label: Label::default(),
            pointer: None,
            highlight_color,
            label_config,
        }
    }

    /// Handle one pointer move at `pointer` (physical pixels, y down).
    ///
    /// Picking uses `camera` as it is right now; if the orbit has advanced
    /// since the last drawn frame the result can lag by that one frame.
    pub fn pointer_moved(
        &mut self,
        scene: &mut SceneGraph,
        camera: &Camera,
        viewport: &Viewport,
        pointer: Vec2,
    ) -> Option<Hit> {
        self.pointer = Some(pointer);

        let ray = camera.ray_through(viewport.to_ndc(pointer));
        let hit = pick(scene, &ray);

        self.set_hovered(scene, hit.map(|h| h.part));

        match hit.and_then(|h| scene.part(h.part)) {
            Some(part) => {
                self.label.visible = true;
                self.label.position = pointer + self.label_config.offset;
                self.label.text = format!("{}{}", self.label_config.prefix, part.name());
            }
            None => self.label.visible = false,
        }

        hit
    }

    /// Pointer left the viewport: restore any highlight and hide the label
    pub fn pointer_left(&mut self, scene: &mut SceneGraph) {
        self.pointer = None;
        self.set_hovered(scene, None);
        self.label.visible = false;
    }

    fn set_hovered(&mut self, scene: &mut SceneGraph, hovered: Option<NodeId>) {
        if let Some(current) = self.highlight {
            if Some(current.part) == hovered {
                return;
            }
            if let Some(part) = scene.part_mut(current.part) {
                part.material_mut().set_color(current.saved_color);
                log::debug!("Restored {} ({:?})", part.name(), current.part);
            }
            self.highlight = None;
        }

        let Some(id) = hovered else {
            return;
        };
        let Some(part) = scene.part_mut(id) else {
            return;
        };
        // Parts without a colour of their own get the label but no highlight
        if let Some(saved_color) = part.material().color() {
            part.material_mut().set_color(self.highlight_color);
            self.highlight = Some(Highlight {
                part: id,
                saved_color,
            });
            log::debug!("Highlighted {} ({:?})", part.name(), id);
        }
    }

    pub fn highlight(&self) -> Option<Highlight> {
        self.highlight
    }

    pub fn highlighted(&self) -> Option<NodeId> {
        self.highlight.map(|h| h.part)
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }
}
