//! blink-core — Blink detection from facial eye landmarks.
//!
//! Converts per-frame eye-landmark coordinates (MediaPipe FaceMesh scheme)
//! into a debounced blink count via the eye aspect ratio (EAR). Camera
//! capture, model inference and presentation live outside this crate; the
//! only input contract is "per frame, zero or one face's landmarks".

pub mod debounce;
pub mod geometry;
pub mod tracker;
pub mod types;

pub use debounce::{BlinkConfig, BlinkDebouncer, BlinkPhase, FrameOutcome, Observation};
pub use geometry::{distance, eye_aspect_ratio, GeometryError};
pub use tracker::{BlinkTracker, FrameReport};
pub use types::{EyeLandmarks, FaceLandmarks, Point, LEFT_EYE_INDICES, RIGHT_EYE_INDICES};
