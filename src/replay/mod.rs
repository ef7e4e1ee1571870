//! Recorded sessions and their playback.

mod recording;
mod replay_detector;

pub use recording::{RecordedEvent, Recording};
pub use replay_detector::ReplayDetector;
