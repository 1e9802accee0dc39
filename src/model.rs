use std::path::Path;

use anyhow::{Context, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structural problems that make a model impossible to assemble
#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("reflector face needs exactly 4 points, found {0}")]
    FaceVertexCount(usize),
    #[error("bar list is empty; nothing to build")]
    EmptyBarList,
    #[error("bar {index} has {len} point(s); a rod needs at least 2")]
    BarTooShort { index: usize, len: usize },
    #[error("non-finite coordinate in {0}")]
    NonFinite(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reflector {
    pub face: Vec<Vec3>,
}

/// Model description as supplied by the host application.
///
/// `preview_camera_angle` is the only field the viewer writes: the orbit
/// advances it every frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub center: Vec3,
    pub max: Vec3,
    /// Degrees. Grows without bound.
    #[serde(default)]
    pub preview_camera_angle: f64,
    pub bar_list: Vec<Vec<Vec3>>,
    pub reflector: Reflector,
}

/// Files either hold the model directly or wrap it as `{"l3dModel": ...}`
#[derive(Deserialize)]
#[serde(untagged)]
enum ModelDocument {
    Wrapped {
        #[serde(rename = "l3dModel")]
        l3d_model: Model,
    },
    Bare(Model),
}

impl Model {
    pub fn from_json(json: &str) -> Result<Self> {
        let document: ModelDocument =
            serde_json::from_str(json).context("Model JSON does not match the expected layout")?;
        Ok(match document {
            ModelDocument::Wrapped { l3d_model } => l3d_model,
            ModelDocument::Bare(model) => model,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read model file: {:?}", path))?;
        let model = Self::from_json(&json)
            .with_context(|| format!("Failed to parse model file: {:?}", path))?;
        log::info!(
            "Loaded model {:?}: {} bars, reflector with {} points",
            path,
            model.bar_list.len(),
            model.reflector.face.len()
        );
        Ok(model)
    }

    /// Check the shape of the data before any geometry is built
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.reflector.face.len() != 4 {
            return Err(ModelError::FaceVertexCount(self.reflector.face.len()));
        }
        if self.bar_list.is_empty() {
            return Err(ModelError::EmptyBarList);
        }
        if let Some((index, bar)) = self.bar_list.iter().enumerate().find(|(_, bar)| bar.len() < 2) {
            return Err(ModelError::BarTooShort {
                index,
                len: bar.len(),
            });
        }

        if !self.center.is_finite() {
            return Err(ModelError::NonFinite("center".to_string()));
        }
        if !self.max.is_finite() {
            return Err(ModelError::NonFinite("max".to_string()));
        }
        if !self.preview_camera_angle.is_finite() {
            return Err(ModelError::NonFinite("previewCameraAngle".to_string()));
        }
        if !self.reflector.face.iter().all(|p| p.is_finite()) {
            return Err(ModelError::NonFinite("reflector face".to_string()));
        }
        if let Some(index) = self
            .bar_list
            .iter()
            .position(|bar| !bar.iter().all(|p| p.is_finite()))
        {
            return Err(ModelError::NonFinite(format!("bar {}", index)));
        }

        Ok(())
    }

    /// Reflector corners, once [`Model::validate`] has passed
    pub fn reflector_quad(&self) -> Result<[Vec3; 4], ModelError> {
        <[Vec3; 4]>::try_from(self.reflector.face.as_slice())
            .map_err(|_| ModelError::FaceVertexCount(self.reflector.face.len()))
    }

    /// First and last point of every bar
    pub fn rod_spans(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        self.bar_list
            .iter()
            .filter_map(|bar| Some((*bar.first()?, *bar.last()?)))
    }
}

/// Small truss over a 10×10 reflector, used when no model file is given
pub fn demo_model() -> Model {
    let corners = [
        Vec3::new(0.0, 0.0, -5.0),
        Vec3::new(10.0, 0.0, -5.0),
        Vec3::new(10.0, 10.0, -5.0),
        Vec3::new(0.0, 10.0, -5.0),
    ];
    let apex = Vec3::new(5.0, 5.0, 30.0);

    let legs = corners.iter().map(|&c| vec![c + Vec3::Z * 5.0, apex]);
    let rim = (0..4).map(|i| {
        let a = corners[i] + Vec3::Z * 15.0;
        let b = corners[(i + 1) % 4] + Vec3::Z * 15.0;
        // Midpoint is ignored when rods are built; kept to mirror real bar data
        vec![a, a.lerp(b, 0.5), b]
    });

    Model {
        center: Vec3::new(5.0, 5.0, 12.5),
        max: Vec3::new(10.0, 10.0, 30.0),
        preview_camera_angle: 0.0,
        bar_list: legs.chain(rim).collect(),
        reflector: Reflector {
            face: corners.to_vec(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WRAPPED: &str = r#"{
        "l3dModel": {
            "center": [5.0, 5.0, 0.0],
            "max": [10.0, 10.0, 0.0],
            "previewCameraAngle": 30,
            "barList": [[[0, 0, 0], [3, 3, 3], [10, 0, 0]]],
            "reflector": { "face": [[0, 0, -5], [10, 0, -5], [10, 10, -5], [0, 10, -5]] }
        }
    }"#;

    #[test]
    fn test_parse_wrapped_document() {
        let model = Model::from_json(WRAPPED).unwrap();
        assert_eq!(model.center, Vec3::new(5.0, 5.0, 0.0));
        assert_eq!(model.preview_camera_angle, 30.0);
        assert_eq!(model.bar_list[0].len(), 3);
        assert!(model.validate().is_ok());
    }

    #[test]
    fn test_parse_bare_model() {
        let bare = r#"{
            "center": [0, 0, 0], "max": [1, 1, 1],
            "barList": [[[0, 0, 0], [1, 0, 0]]],
            "reflector": { "face": [[0, 0, 0], [1, 0, 0], [1, 1, 0], [0, 1, 0]] }
        }"#;
        let model = Model::from_json(bare).unwrap();
        assert_eq!(model.preview_camera_angle, 0.0);
        assert_eq!(model.bar_list.len(), 1);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Model::from_json("{\"center\": 3}").is_err());
    }

    #[test]
    fn test_rod_spans_use_endpoints_only() {
        let model = Model::from_json(WRAPPED).unwrap();
        let spans: Vec<_> = model.rod_spans().collect();
        assert_eq!(spans, vec![(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0))]);
    }

    #[test]
    fn test_validate_face_count() {
        let mut model = demo_model();
        model.reflector.face.pop();
        assert_eq!(model.validate(), Err(ModelError::FaceVertexCount(3)));
        assert_eq!(model.reflector_quad(), Err(ModelError::FaceVertexCount(3)));
    }

    #[test]
    fn test_validate_empty_bar_list() {
        let mut model = demo_model();
        model.bar_list.clear();
        assert_eq!(model.validate(), Err(ModelError::EmptyBarList));
    }

    #[test]
    fn test_validate_short_bar() {
        let mut model = demo_model();
        model.bar_list.push(vec![Vec3::ZERO]);
        let index = model.bar_list.len() - 1;
        assert_eq!(
            model.validate(),
            Err(ModelError::BarTooShort { index, len: 1 })
        );
    }

    #[test]
    fn test_validate_non_finite() {
        let mut model = demo_model();
        model.bar_list[2][0].x = f32::NAN;
        assert_eq!(
            model.validate(),
            Err(ModelError::NonFinite("bar 2".to_string()))
        );
    }

    #[test]
    fn test_error_messages() {
        let err = ModelError::BarTooShort { index: 4, len: 1 };
        assert_eq!(err.to_string(), "bar 4 has 1 point(s); a rod needs at least 2");
    }

    #[test]
    fn test_demo_model_is_valid() {
        let model = demo_model();
        assert!(model.validate().is_ok());
        assert_eq!(model.bar_list.len(), 8);
    }
}
