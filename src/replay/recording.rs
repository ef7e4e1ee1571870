use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::game::Command;
use crate::model::hand::Hand;

use super::replay_detector::ReplayDetector;
use crate::app::{Input, TimedInput};
use crate::traits::pose::VideoFrame;

/// One line of a recorded session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecordedEvent {
    /// A captured frame and what the detector reported for it.
    Frame {
        time_ms: f64,
        video_time: f64,
        width: f64,
        height: f64,
        #[serde(default)]
        hands: Vec<Hand>,
    },
    /// A button press.
    Action { time_ms: f64, action: Command },
}

impl RecordedEvent {
    pub fn time_ms(&self) -> f64 {
        match self {
            RecordedEvent::Frame { time_ms, .. } | RecordedEvent::Action { time_ms, .. } => {
                *time_ms
            }
        }
    }
}

/// A recorded session in JSON-lines form, one [`RecordedEvent`] per line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recording {
    events: Vec<RecordedEvent>,
}

impl Recording {
    pub fn new(events: Vec<RecordedEvent>) -> Self {
        Self { events }
    }

    /// Parse JSON lines. Blank lines and lines starting with `#` are skipped.
    /// Timestamps must not decrease.
    pub fn parse(text: &str) -> Result<Self> {
        let mut events: Vec<RecordedEvent> = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let event: RecordedEvent = serde_json::from_str(line)
                .with_context(|| format!("invalid recording line {}", idx + 1))?;
            if let Some(prev) = events.last() {
                if event.time_ms() < prev.time_ms() {
                    bail!(
                        "recording line {} goes back in time ({} ms < {} ms)",
                        idx + 1,
                        event.time_ms(),
                        prev.time_ms()
                    );
                }
            }
            events.push(event);
        }
        Ok(Self { events })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read recording {}", path.display()))?;
        Self::parse(&text)
    }

    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Split into the frame-loop input timeline and a detector that answers
    /// for the recorded frames.
    pub fn into_replay(self) -> (Vec<TimedInput>, ReplayDetector) {
        let mut inputs = Vec::with_capacity(self.events.len());
        let mut detector = ReplayDetector::new();
        for event in self.events {
            match event {
                RecordedEvent::Frame {
                    time_ms,
                    video_time,
                    width,
                    height,
                    hands,
                } => {
                    let frame = VideoFrame {
                        width,
                        height,
                        video_time,
                    };
                    detector.insert(&frame, hands);
                    inputs.push(TimedInput {
                        time_us: ms_to_us(time_ms),
                        input: Input::Frame(frame),
                    });
                }
                RecordedEvent::Action { time_ms, action } => inputs.push(TimedInput {
                    time_us: ms_to_us(time_ms),
                    input: Input::Command(action),
                }),
            }
        }
        (inputs, detector)
    }
}

fn ms_to_us(ms: f64) -> i64 {
    (ms * 1_000.0).round() as i64
}
