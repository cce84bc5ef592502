use crate::observation::bounding_box::BoundingBox;
use crate::utils::log_entry::observation::ObservationEntry;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct Observation {
    pub bounding_box: BoundingBox,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl Observation {
    pub fn new(bounding_box: BoundingBox, confidence: Option<f32>) -> Self {
        Self {
            bounding_box,
            confidence,
        }
    }
}

impl From<BoundingBox> for Observation {
    fn from(bounding_box: BoundingBox) -> Self {
        Self::new(bounding_box, None)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RawObservation {
    pub coordinates: Vec<f64>,
    #[serde(default)]
    pub confidence: Option<f32>,
}

impl RawObservation {
    pub fn new(coordinates: Vec<f64>, confidence: Option<f32>) -> Self {
        Self {
            coordinates,
            confidence,
        }
    }
}

impl From<Observation> for RawObservation {
    fn from(value: Observation) -> Self {
        Self::new(value.bounding_box.coordinates().to_vec(), value.confidence)
    }
}

impl TryFrom<RawObservation> for Observation {
    type Error = ObservationEntry;

    fn try_from(value: RawObservation) -> Result<Self, Self::Error> {
        let bounding_box = BoundingBox::from_coordinates(&value.coordinates)?;
        Ok(Observation::new(bounding_box, value.confidence))
    }
}
