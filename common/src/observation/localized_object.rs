use crate::observation::bounding_box::BoundingBox;
use crate::observation::observation::Observation;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct Vertex {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

/// Object annotation as returned by the external detector: a label, a score
/// and a normalized polygon.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LocalizedObject {
    pub name: String,
    #[serde(default)]
    pub score: Option<f32>,
    #[serde(default)]
    pub vertices: Vec<Vertex>,
}

impl LocalizedObject {
    pub fn is_labeled(&self, labels: &[String]) -> bool {
        let name = self.name.to_lowercase();
        labels.iter().any(|label| label.to_lowercase() == name)
    }

    /// Envelope of the polygon. `None` when the detector sent no vertices.
    pub fn to_observation(&self) -> Option<Observation> {
        let first = self.vertices.first()?;
        let (mut x_min, mut y_min, mut x_max, mut y_max) = (first.x, first.y, first.x, first.y);
        for vertex in &self.vertices[1..] {
            x_min = x_min.min(vertex.x);
            y_min = y_min.min(vertex.y);
            x_max = x_max.max(vertex.x);
            y_max = y_max.max(vertex.y);
        }
        Some(Observation::new(BoundingBox::new(x_min, y_min, x_max, y_max), self.score))
    }
}

pub fn observations_from_objects(objects: &[LocalizedObject], labels: &[String]) -> Vec<Observation> {
    objects
        .iter()
        .filter(|object| object.is_labeled(labels))
        .filter_map(LocalizedObject::to_observation)
        .collect()
}
