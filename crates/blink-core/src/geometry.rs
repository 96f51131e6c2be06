//! Eye aspect ratio geometry.
//!
//! EAR (Soukupová & Čech) relates vertical eyelid distances to horizontal
//! eye width: `(|p1-p5| + |p2-p4|) / (2 * |p0-p3|)`. Open eyes sit around
//! 0.3, closed eyes near 0. The ratio is dimensionless, so it is invariant
//! to face scale and distance from the camera.

use thiserror::Error;

use crate::types::{EyeLandmarks, Point};

/// Horizontal widths at or below this are treated as degenerate rather
/// than divided through. Normalized coordinates make a real eye width
/// orders of magnitude larger.
const MIN_EYE_WIDTH: f32 = 1e-6;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("degenerate eye: outer and inner corners coincide (width ≤ {MIN_EYE_WIDTH})")]
    DegenerateEye,
    #[error("expected 6 eye landmarks, got {0}")]
    WrongCardinality(usize),
    #[error("landmark index {index} out of range for a {len}-point set")]
    LandmarkIndexOutOfRange { index: usize, len: usize },
}

/// Euclidean distance between two landmarks.
pub fn distance(a: Point, b: Point) -> f32 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Compute the eye aspect ratio for one 6-point eye contour.
///
/// Returns [`GeometryError::DegenerateEye`] when the horizontal width
/// `|p0-p3|` is effectively zero, rather than letting infinity propagate
/// into the debouncer.
pub fn eye_aspect_ratio(eye: &EyeLandmarks) -> Result<f32, GeometryError> {
    let p = eye.points();
    let a = distance(p[1], p[5]);
    let b = distance(p[2], p[4]);
    let c = distance(p[0], p[3]);

    if c <= MIN_EYE_WIDTH {
        return Err(GeometryError::DegenerateEye);
    }
    Ok((a + b) / (2.0 * c))
}
