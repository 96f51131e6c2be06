use serde::{Deserialize, Serialize};

use crate::geometry::GeometryError;

/// MediaPipe FaceMesh indices for the left-eye EAR contour:
/// [outer corner, upper lid ×2, inner corner, lower lid ×2].
pub const LEFT_EYE_INDICES: [usize; 6] = [33, 160, 158, 133, 153, 144];

/// MediaPipe FaceMesh indices for the right-eye EAR contour.
pub const RIGHT_EYE_INDICES: [usize; 6] = [263, 387, 385, 362, 380, 373];

/// A 2D landmark in normalized [0,1] frame coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// Ordered 6-point eye contour used by the EAR formula:
/// `[outer corner, upper lid 1, upper lid 2, inner corner, lower lid 1, lower lid 2]`.
///
/// Order is load-bearing — it determines which points pair up as vertical
/// and horizontal distances in [`eye_aspect_ratio`](crate::eye_aspect_ratio).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EyeLandmarks(pub [Point; 6]);

impl EyeLandmarks {
    /// Build an eye contour from a slice of exactly 6 points.
    pub fn from_slice(points: &[Point]) -> Result<Self, GeometryError> {
        let arr: [Point; 6] = points
            .try_into()
            .map_err(|_| GeometryError::WrongCardinality(points.len()))?;
        Ok(Self(arr))
    }

    pub fn points(&self) -> &[Point; 6] {
        &self.0
    }
}

/// The full landmark set the external frame source delivers for one face,
/// indexed 0..N-1 in a fixed scheme (468 points for MediaPipe FaceMesh).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceLandmarks(pub Vec<Point>);

impl FaceLandmarks {
    pub fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Extract a 6-point eye contour by fixed landmark indices.
    pub fn eye(&self, indices: &[usize; 6]) -> Result<EyeLandmarks, GeometryError> {
        let mut points = [Point::new(0.0, 0.0); 6];
        for (slot, &idx) in points.iter_mut().zip(indices.iter()) {
            *slot = *self
                .0
                .get(idx)
                .ok_or(GeometryError::LandmarkIndexOutOfRange {
                    index: idx,
                    len: self.0.len(),
                })?;
        }
        Ok(EyeLandmarks(points))
    }

    /// Left-eye contour using the MediaPipe FaceMesh indices.
    pub fn left_eye(&self) -> Result<EyeLandmarks, GeometryError> {
        self.eye(&LEFT_EYE_INDICES)
    }

    /// Right-eye contour using the MediaPipe FaceMesh indices.
    pub fn right_eye(&self) -> Result<EyeLandmarks, GeometryError> {
        self.eye(&RIGHT_EYE_INDICES)
    }
}
