use glam::{Vec2, Vec3};
use rod_viewer::scene::Node;
use rod_viewer::shapes::BOX_FACE_NAMES;
use rod_viewer::{CameraPhase, Model, ViewerConfig, ViewerSession, Viewport};

const SINGLE_ROD_MODEL: &str = r#"{
    "l3dModel": {
        "center": [5, 5, -2.5],
        "max": [10, 10, 0],
        "previewCameraAngle": 30,
        "barList": [[[0, 0, 0], [10, 0, 0]]],
        "reflector": { "face": [[0, 0, -5], [10, 0, -5], [10, 10, -5], [0, 10, -5]] }
    }
}"#;

fn session() -> ViewerSession {
    let model = Model::from_json(SINGLE_ROD_MODEL).expect("model parses");
    ViewerSession::new(model, &ViewerConfig::default(), Viewport::new(800, 600)).expect("model is valid")
}

#[cfg(test)]
mod session_tests {
    use super::*;

    #[test]
    fn test_end_to_end_scene_contents() {
        let s = session();
        let scene = s.scene();

        let rods: Vec<_> = scene.parts().filter(|(_, p)| p.name() == "Rod").collect();
        assert_eq!(rods.len(), 1);
        let (_, rod) = rods[0];
        assert_eq!(rod.transform().translation, Vec3::new(5.0, 0.0, 0.0));
        let size = rod.geometry().bounds().unwrap().size();
        assert!((size.z - 10.0).abs() < 1e-5, "rod length 10, got {}", size.z);

        let faces: Vec<_> = scene
            .parts()
            .filter(|(_, p)| BOX_FACE_NAMES.contains(&p.name()))
            .collect();
        assert_eq!(faces.len(), 6);
        assert_eq!(scene.outlines().count(), 7, "one outline per face and per rod");

        let bottom = faces.iter().find(|(_, p)| p.name() == "Bottom face").unwrap().1;
        let top = faces.iter().find(|(_, p)| p.name() == "Top face").unwrap().1;
        assert_eq!(bottom.geometry().bounds().unwrap().max.z, -5.0);
        assert_eq!(top.geometry().bounds().unwrap().min.z, 0.0);
    }

    #[test]
    fn test_rod_ignores_intermediate_points() {
        let mut model = Model::from_json(SINGLE_ROD_MODEL).unwrap();
        model.bar_list = vec![vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(40.0, -7.0, 3.0),
            Vec3::new(1.0, 2.0, 2.0),
            Vec3::new(6.0, 0.0, 12.0),
        ]];
        let s = ViewerSession::new(model, &ViewerConfig::default(), Viewport::new(800, 600)).unwrap();

        let (_, rod) = s.scene().parts().find(|(_, p)| p.name() == "Rod").unwrap();
        assert_eq!(rod.transform().translation, Vec3::new(3.0, 0.0, 6.0));
        let length = rod.geometry().bounds().unwrap().size().z;
        assert!((length - 180f32.sqrt()).abs() < 1e-4, "length {}", length);
    }

    #[test]
    fn test_each_rod_has_its_own_group() {
        let s = session();
        let scene = s.scene();
        let root = scene.group(scene.root()).unwrap();
        let unnamed_groups = root
            .children()
            .iter()
            .filter(|&&id| matches!(scene.node(id), Some(Node::Group(g)) if g.name.is_none()))
            .count();
        assert_eq!(unnamed_groups, 1);
    }

    #[test]
    fn test_orbit_stays_on_circle() {
        let mut s = session();
        let center = s.model().center;
        let height = s.model().max.z - 120.0;

        for frame in 0..1000 {
            s.tick();
            let position = s.camera().position;
            let radius = (position.truncate() - center.truncate()).length();
            assert!((radius - 115.0).abs() < 1e-3, "frame {}: radius {}", frame, radius);
            assert_eq!(position.z, height, "frame {}", frame);
            assert_eq!(s.camera().target, center);
            assert_eq!(s.camera().up, Vec3::Z);
        }

        assert_eq!(s.phase(), CameraPhase::Orbiting);
        assert_eq!(s.model().preview_camera_angle, 30.0 + 1000.0 * 0.5);
        assert_eq!(s.frame_count(), 1000);
    }

    #[test]
    fn test_first_frame_uses_stored_angle() {
        let mut s = session();
        s.tick();
        let position = s.camera().position;
        let theta = 30f32.to_radians();
        let expected = Vec3::new(5.0 + 115.0 * theta.cos(), 5.0 + 115.0 * theta.sin(), -120.0);
        assert!((position - expected).length() < 1e-3, "got {:?}", position);
    }

    #[test]
    fn test_hover_through_session() {
        let mut s = session();
        s.tick();

        // Nothing in the top-left corner from the orbit pose
        assert!(s.pointer_moved(Vec2::new(1.0, 1.0)).is_none());
        assert!(!s.label().visible);

        // The model centre sits inside the box
        let ndc = s.camera().project(s.model().center).unwrap();
        let hit = s.pointer_moved(s.viewport().to_pixels(ndc.truncate()) + Vec2::new(3.0, 2.0));
        let hit = hit.expect("looking at the centre hits the box");
        assert!(s.label().visible);
        assert_eq!(s.highlighted(), Some(hit.part));

        s.pointer_left();
        assert!(!s.label().visible);
        assert_eq!(s.highlight(), None);
    }
}
