use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;

use blink_core::{BlinkConfig, BlinkDebouncer, BlinkTracker, FaceLandmarks, Observation, Point};

mod config;

#[derive(Parser)]
#[command(name = "blink", about = "Replay recorded traces through the blink detector")]
struct Cli {
    /// Override BLINK_EAR_THRESHOLD
    #[arg(long, global = true)]
    threshold: Option<f32>,
    /// Override BLINK_MIN_CONSECUTIVE_FRAMES
    #[arg(long, global = true)]
    min_frames: Option<u32>,
    /// Print the summary as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a JSON-lines landmark trace (one frame per line:
    /// {"landmarks": [[x,y], ...]} or {"landmarks": null})
    Replay {
        /// Path to the trace file
        file: PathBuf,
    },
    /// Replay a plain-text trace of average-EAR values, one per line
    /// (blank line = no observation that frame)
    Ears {
        /// Path to the trace file
        file: PathBuf,
    },
}

/// One line of a landmark trace.
#[derive(Deserialize)]
struct FrameRecord {
    landmarks: Option<Vec<(f32, f32)>>,
}

#[derive(serde::Serialize)]
struct Summary {
    frames: u64,
    blinks: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = config::from_env();
    if let Some(t) = cli.threshold {
        config.ear_threshold = t;
    }
    if let Some(n) = cli.min_frames {
        config.min_consecutive_frames = n;
    }
    tracing::debug!(
        threshold = config.ear_threshold,
        min_frames = config.min_consecutive_frames,
        "debouncer configured"
    );

    let summary = match cli.command {
        Commands::Replay { file } => replay_landmarks(&file, config)?,
        Commands::Ears { file } => replay_ears(&file, config)?,
    };

    if cli.json {
        println!("{}", serde_json::to_string(&summary)?);
    } else {
        println!("{} frames, {} blinks", summary.frames, summary.blinks);
    }
    Ok(())
}

/// Run a landmark trace through the full tracker (extraction → EAR → debounce).
fn replay_landmarks(path: &Path, config: BlinkConfig) -> Result<Summary> {
    let file =
        File::open(path).with_context(|| format!("cannot open trace {}", path.display()))?;
    let mut tracker = BlinkTracker::new(config);

    for (line_no, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: FrameRecord = serde_json::from_str(&line)
            .with_context(|| format!("bad frame record at line {}", line_no + 1))?;
        let face = record
            .landmarks
            .map(|pts| FaceLandmarks::new(pts.into_iter().map(Point::from).collect()));

        let report = tracker.process_frame(face.as_ref());
        if report.blink_detected {
            println!("blink #{} at frame {}", report.total_blinks, report.frame_index);
        }
    }

    Ok(Summary {
        frames: tracker.frames_processed(),
        blinks: tracker.total_blinks(),
    })
}

/// Feed pre-computed average-EAR values straight into the debouncer.
fn replay_ears(path: &Path, config: BlinkConfig) -> Result<Summary> {
    let file =
        File::open(path).with_context(|| format!("cannot open trace {}", path.display()))?;
    let mut debouncer = BlinkDebouncer::new(config);
    let mut frames = 0u64;

    for (line_no, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        let obs = match line.trim() {
            "" => Observation::Missing,
            v => Observation::Ear(
                v.parse()
                    .with_context(|| format!("bad EAR value at line {}", line_no + 1))?,
            ),
        };
        let outcome = debouncer.observe(obs);
        if outcome.blink_detected {
            println!("blink #{} at frame {}", outcome.total_blinks, frames);
        }
        frames += 1;
    }

    Ok(Summary {
        frames,
        blinks: debouncer.total_blinks(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_record_with_landmarks() {
        let record: FrameRecord =
            serde_json::from_str(r#"{"landmarks": [[0.1, 0.2], [0.3, 0.4]]}"#).unwrap();
        let pts = record.landmarks.unwrap();
        assert_eq!(pts.len(), 2);
        assert_eq!(pts[0], (0.1, 0.2));
    }

    #[test]
    fn test_frame_record_no_face() {
        let record: FrameRecord = serde_json::from_str(r#"{"landmarks": null}"#).unwrap();
        assert!(record.landmarks.is_none());
    }
}
