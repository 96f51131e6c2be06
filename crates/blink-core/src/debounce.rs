//! Blink debouncing — turning a noisy per-frame EAR stream into discrete
//! blink events.
//!
//! A blink is counted only after the average EAR stays below threshold for
//! a minimum run of consecutive frames, and a latch guarantees each
//! sustained closure counts exactly once no matter how long it lasts.

use serde::Deserialize;

/// Debouncer parameters. Defaults match the commonly used EAR literature
/// values (threshold 0.25, two consecutive frames at ~30 fps).
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct BlinkConfig {
    /// Average EAR below this value means "eyes considered closed this frame".
    pub ear_threshold: f32,
    /// Consecutive closed-eye frames required before a blink is counted.
    pub min_consecutive_frames: u32,
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self {
            ear_threshold: 0.25,
            min_consecutive_frames: 2,
        }
    }
}

/// One frame's input to the debouncer.
///
/// A frame with no usable face must be reported as [`Missing`](Self::Missing),
/// never silently dropped: the debouncer treats it like an open eye (run
/// counter and latch reset), so tracking dropout in the middle of a closure
/// cannot fabricate a blink.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Observation {
    /// Average EAR across both eyes for this frame.
    Ear(f32),
    /// No face / no usable eye geometry this frame.
    Missing,
}

/// Per-frame output: the running count and whether this exact frame
/// crossed the debounce bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutcome {
    /// Cumulative blinks this session. Monotonically non-decreasing.
    pub total_blinks: u64,
    /// True only on the single frame where a blink is counted.
    pub blink_detected: bool,
}

/// Diagnostic view of the debouncer's position in its state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkPhase {
    /// Eyes open (or no observation); run counter at zero.
    Open,
    /// Below threshold, but not yet for enough frames to count.
    Closing,
    /// A counted blink whose closure is still ongoing.
    Blinking,
}

/// Stateful filter from per-frame EAR observations to blink events.
///
/// Owns all mutable session state; create one per detection session and
/// feed it exactly one [`Observation`] per processed frame, in order.
#[derive(Debug, Clone)]
pub struct BlinkDebouncer {
    config: BlinkConfig,
    below_count: u32,
    in_blink: bool,
    total_blinks: u64,
}

impl BlinkDebouncer {
    pub fn new(config: BlinkConfig) -> Self {
        Self {
            config,
            below_count: 0,
            in_blink: false,
            total_blinks: 0,
        }
    }

    /// Process one frame's observation and return the updated count plus
    /// whether a blink was counted on this frame.
    pub fn observe(&mut self, obs: Observation) -> FrameOutcome {
        let mut blink_detected = false;

        match obs {
            Observation::Ear(avg_ear) if avg_ear < self.config.ear_threshold => {
                self.below_count += 1;
                if self.below_count >= self.config.min_consecutive_frames && !self.in_blink {
                    self.total_blinks += 1;
                    self.in_blink = true;
                    blink_detected = true;
                    tracing::debug!(total = self.total_blinks, "blink counted");
                }
            }
            // Open eye and missing face share a branch: both end any
            // closure in progress and restart the run counter.
            Observation::Ear(_) | Observation::Missing => {
                self.below_count = 0;
                self.in_blink = false;
            }
        }

        FrameOutcome {
            total_blinks: self.total_blinks,
            blink_detected,
        }
    }

    /// Cumulative blinks counted this session.
    pub fn total_blinks(&self) -> u64 {
        self.total_blinks
    }

    pub fn phase(&self) -> BlinkPhase {
        if self.in_blink {
            BlinkPhase::Blinking
        } else if self.below_count > 0 {
            BlinkPhase::Closing
        } else {
            BlinkPhase::Open
        }
    }

    pub fn config(&self) -> &BlinkConfig {
        &self.config
    }

    /// Return to session-start state, keeping the configuration.
    pub fn reset(&mut self) {
        self.below_count = 0;
        self.in_blink = false;
        self.total_blinks = 0;
    }
}
