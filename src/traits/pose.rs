use anyhow::Result;

use crate::model::hand::Hand;

/// Metadata of one captured video frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoFrame {
    pub width: f64,
    pub height: f64,
    /// Presentation time of the frame in the video stream, in seconds.
    /// Repeats when the display refreshes faster than the camera.
    pub video_time: f64,
}

/// Hand landmark detector.
/// Implementations: ReplayDetector (recorded sessions), external model bindings.
pub trait PoseSource {
    /// True once the detection model has finished loading.
    fn is_ready(&self) -> bool;

    /// Detect up to `max_hands` hands in `frame`.
    fn detect(&mut self, frame: &VideoFrame, timestamp_us: i64, max_hands: usize)
        -> Result<Vec<Hand>>;
}
