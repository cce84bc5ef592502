use crate::utils::log_entry::observation::ObservationEntry;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Axis-aligned box in image coordinates normalized to `[0, 1]`.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct BoundingBox {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl BoundingBox {
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Anything other than exactly four finite values is rejected.
    pub fn from_coordinates(coordinates: &[f64]) -> Result<Self, ObservationEntry> {
        let [x_min, y_min, x_max, y_max] = <[f64; 4]>::try_from(coordinates)
            .map_err(|_| ObservationEntry::InvalidBoxError(coordinates.len()))?;
        if let Some(index) = [x_min, y_min, x_max, y_max].iter().position(|value| !value.is_finite()) {
            return Err(ObservationEntry::NonFiniteCoordinateError(index));
        }
        Ok(Self::new(x_min, y_min, x_max, y_max))
    }

    pub fn coordinates(&self) -> [f64; 4] {
        [self.x_min, self.y_min, self.x_max, self.y_max]
    }

    /// Per-coordinate closeness: every coordinate must differ by strictly less
    /// than `threshold`. This is not an overlap measure.
    pub fn is_similar(&self, other: &BoundingBox, threshold: f64) -> bool {
        self.coordinates()
            .iter()
            .zip(other.coordinates().iter())
            .all(|(a, b)| (a - b).abs() < threshold)
    }
}

impl TryFrom<&[f64]> for BoundingBox {
    type Error = ObservationEntry;

    fn try_from(value: &[f64]) -> Result<Self, Self::Error> {
        Self::from_coordinates(value)
    }
}

impl Display for BoundingBox {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.4}, {:.4}, {:.4}, {:.4})", self.x_min, self.y_min, self.x_max, self.y_max)
    }
}
