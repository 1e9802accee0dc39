use crate::config::ViewerConfig;
use crate::model::{Model, ModelError};
use crate::scene::{Axes, Node, SceneGraph};
use crate::shapes::{build_box, build_rod};

/// Build the static scene for `model`: axes helper, reflector box, then one
/// rod per bar. Runs once at startup.
pub fn assemble_scene(model: &Model, config: &ViewerConfig) -> Result<SceneGraph, ModelError> {
    model.validate()?;

    let style = config.appearance.style();
    let mut scene = SceneGraph::new();
    let root = scene.root();

    if config.appearance.axes_length > 0.0 {
        scene.add(
            root,
            Node::Axes(Axes {
                length: config.appearance.axes_length,
            }),
        );
    }

    let prism = build_box(
        model.reflector_quad()?,
        config.geometry.box_extrusion_height,
        &style,
    );
    let box_group = scene.add_group(root, Some("Box"));
    for face in prism.faces {
        scene.add_part(box_group, face.part);
        scene.add_outline(box_group, face.outline);
    }

    let mut rods = 0;
    for (start, end) in model.rod_spans() {
        log::debug!("Adding rod with coords {} and {}", start, end);
        let rod = build_rod(start, end, config.geometry.rod_cross_section, &style);
        let group = scene.add_group(root, None);
        scene.add_part(group, rod.part);
        scene.add_outline(group, rod.outline);
        rods += 1;
    }

    log::info!(
        "Scene assembled: 6 box faces, {} rods, {} nodes",
        rods,
        scene.len()
    );
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::demo_model;

    #[test]
    fn test_demo_scene_counts() {
        let model = demo_model();
        let scene = assemble_scene(&model, &ViewerConfig::default()).unwrap();
        assert_eq!(scene.parts().count(), 6 + model.bar_list.len());
        assert_eq!(scene.outlines().count(), 6 + model.bar_list.len());
        assert_eq!(scene.axes().count(), 1);
    }

    #[test]
    fn test_axes_can_be_disabled() {
        let mut config = ViewerConfig::default();
        config.appearance.axes_length = 0.0;
        let scene = assemble_scene(&demo_model(), &config).unwrap();
        assert_eq!(scene.axes().count(), 0);
    }

    #[test]
    fn test_invalid_model_fails_fast() {
        let mut model = demo_model();
        model.reflector.face.truncate(2);
        let err = assemble_scene(&model, &ViewerConfig::default()).unwrap_err();
        assert_eq!(err, ModelError::FaceVertexCount(2));
    }
}
