//! Per-session blink tracking over full face-landmark frames.
//!
//! Composes eye extraction, per-eye EAR and the debouncer into a single
//! synchronous per-frame call. The frame source drives this one frame at
//! a time; the tracker owns all session state.

use crate::debounce::{BlinkConfig, BlinkDebouncer, BlinkPhase, Observation};
use crate::geometry::eye_aspect_ratio;
use crate::types::FaceLandmarks;

/// Everything derived from one processed frame.
///
/// `avg_ear` is `None` when the frame carried no usable observation
/// (no face, malformed landmark set, or degenerate eye geometry).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// 0-based index of the frame within this session.
    pub frame_index: u64,
    pub left_ear: Option<f32>,
    pub right_ear: Option<f32>,
    pub avg_ear: Option<f32>,
    /// Cumulative blinks this session.
    pub total_blinks: u64,
    /// True only on the frame where a blink is counted.
    pub blink_detected: bool,
}

/// Session-scoped blink tracker: feed it zero or one face's landmarks per
/// frame, read back the running count.
///
/// Malformed frames never error out of this API — a frame the geometry
/// rejects is reported to the debouncer as a missing observation, which
/// resets any closure in progress (the same policy as a frame with no
/// face at all).
#[derive(Debug)]
pub struct BlinkTracker {
    debouncer: BlinkDebouncer,
    frames_processed: u64,
}

impl BlinkTracker {
    pub fn new(config: BlinkConfig) -> Self {
        Self {
            debouncer: BlinkDebouncer::new(config),
            frames_processed: 0,
        }
    }

    /// Process one frame: `None` when the frame source saw no face.
    pub fn process_frame(&mut self, landmarks: Option<&FaceLandmarks>) -> FrameReport {
        let frame_index = self.frames_processed;
        self.frames_processed += 1;

        let ears = landmarks.and_then(|face| self.measure(face, frame_index));

        let observation = match ears {
            Some((_, _, avg)) => Observation::Ear(avg),
            None => Observation::Missing,
        };
        let outcome = self.debouncer.observe(observation);

        if outcome.blink_detected {
            tracing::info!(
                frame = frame_index,
                total = outcome.total_blinks,
                "blink detected"
            );
        }

        let (left_ear, right_ear, avg_ear) = match ears {
            Some((l, r, avg)) => (Some(l), Some(r), Some(avg)),
            None => (None, None, None),
        };

        FrameReport {
            frame_index,
            left_ear,
            right_ear,
            avg_ear,
            total_blinks: outcome.total_blinks,
            blink_detected: outcome.blink_detected,
        }
    }

    /// Compute (left, right, average) EAR, or `None` when the landmark set
    /// is unusable this frame.
    fn measure(&self, face: &FaceLandmarks, frame_index: u64) -> Option<(f32, f32, f32)> {
        let result = face
            .left_eye()
            .and_then(|eye| eye_aspect_ratio(&eye))
            .and_then(|left| {
                let right = eye_aspect_ratio(&face.right_eye()?)?;
                Ok((left, right))
            });

        match result {
            Ok((left, right)) => {
                let avg = (left + right) / 2.0;
                tracing::trace!(frame = frame_index, left, right, avg, "frame EAR");
                Some((left, right, avg))
            }
            Err(err) => {
                tracing::debug!(
                    frame = frame_index,
                    error = %err,
                    "unusable landmarks; treating frame as no observation"
                );
                None
            }
        }
    }

    pub fn total_blinks(&self) -> u64 {
        self.debouncer.total_blinks()
    }

    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }

    pub fn phase(&self) -> BlinkPhase {
        self.debouncer.phase()
    }

    /// Start a fresh session, keeping the configuration.
    pub fn reset(&mut self) {
        self.debouncer.reset();
        self.frames_processed = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Point, LEFT_EYE_INDICES, RIGHT_EYE_INDICES};

    /// Build a 468-point landmark set whose two EAR contours both measure
    /// the given eyelid gap over a fixed eye width of 0.1.
    fn face_with_gap(gap: f32) -> FaceLandmarks {
        let mut points = vec![Point::new(0.5, 0.5); 468];
        for (base_x, indices) in [(0.3, &LEFT_EYE_INDICES), (0.6, &RIGHT_EYE_INDICES)] {
            let [outer, up1, up2, inner, low1, low2] = *indices;
            points[outer] = Point::new(base_x, 0.4);
            points[inner] = Point::new(base_x + 0.1, 0.4);
            points[up1] = Point::new(base_x + 0.03, 0.4 - gap / 2.0);
            points[up2] = Point::new(base_x + 0.07, 0.4 - gap / 2.0);
            points[low1] = Point::new(base_x + 0.07, 0.4 + gap / 2.0);
            points[low2] = Point::new(base_x + 0.03, 0.4 + gap / 2.0);
        }
        FaceLandmarks::new(points)
    }

    /// EAR = (gap + gap) / (2 * 0.1) = gap * 10
    fn open_face() -> FaceLandmarks {
        face_with_gap(0.035) // EAR 0.35
    }

    fn closed_face() -> FaceLandmarks {
        face_with_gap(0.010) // EAR 0.10
    }

    #[test]
    fn test_ears_reported_per_eye() {
        let mut tracker = BlinkTracker::new(BlinkConfig::default());
        let report = tracker.process_frame(Some(&open_face()));
        let avg = report.avg_ear.unwrap();
        assert!((avg - 0.35).abs() < 1e-3, "avg = {avg}");
        assert!((report.left_ear.unwrap() - report.right_ear.unwrap()).abs() < 1e-6);
        assert_eq!(report.total_blinks, 0);
    }

    #[test]
    fn test_blink_from_landmark_frames() {
        let mut tracker = BlinkTracker::new(BlinkConfig::default());
        tracker.process_frame(Some(&open_face()));
        tracker.process_frame(Some(&closed_face()));
        let report = tracker.process_frame(Some(&closed_face()));
        assert!(report.blink_detected);
        assert_eq!(report.total_blinks, 1);

        let report = tracker.process_frame(Some(&open_face()));
        assert!(!report.blink_detected);
        assert_eq!(report.total_blinks, 1);
    }

    #[test]
    fn test_no_face_frame_reports_no_ear() {
        let mut tracker = BlinkTracker::new(BlinkConfig::default());
        let report = tracker.process_frame(None);
        assert_eq!(report.avg_ear, None);
        assert_eq!(report.total_blinks, 0);
        assert!(!report.blink_detected);
    }

    #[test]
    fn test_dropout_mid_closure_suppresses_blink() {
        let mut tracker = BlinkTracker::new(BlinkConfig::default());
        tracker.process_frame(Some(&closed_face()));
        tracker.process_frame(None); // tracking dropout
        let report = tracker.process_frame(Some(&closed_face()));
        assert_eq!(report.total_blinks, 0);
    }

    #[test]
    fn test_short_landmark_set_treated_as_missing() {
        let mut tracker = BlinkTracker::new(BlinkConfig::default());
        let truncated = FaceLandmarks::new(vec![Point::new(0.5, 0.5); 10]);
        let report = tracker.process_frame(Some(&truncated));
        assert_eq!(report.avg_ear, None);
        assert_eq!(report.total_blinks, 0);
    }

    #[test]
    fn test_degenerate_eye_treated_as_missing() {
        // All 468 points coincide → zero eye width
        let mut tracker = BlinkTracker::new(BlinkConfig::default());
        let collapsed = FaceLandmarks::new(vec![Point::new(0.5, 0.5); 468]);
        let report = tracker.process_frame(Some(&collapsed));
        assert_eq!(report.avg_ear, None);
    }

    #[test]
    fn test_frame_indices_advance_and_reset() {
        let mut tracker = BlinkTracker::new(BlinkConfig::default());
        assert_eq!(tracker.process_frame(None).frame_index, 0);
        assert_eq!(tracker.process_frame(Some(&open_face())).frame_index, 1);
        assert_eq!(tracker.frames_processed(), 2);
        tracker.reset();
        assert_eq!(tracker.process_frame(None).frame_index, 0);
    }
}
