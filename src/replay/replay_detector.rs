use std::collections::VecDeque;

use anyhow::Result;

use crate::model::hand::Hand;
use crate::traits::pose::{PoseSource, VideoFrame};

/// Pose source answering with hands recorded per frame, in recording order.
///
/// A video time may come back later in a recording (capture restarted), so
/// entries are consumed front to back rather than looked up by time.
#[derive(Debug, Default)]
pub struct ReplayDetector {
    pending: VecDeque<(f64, Vec<Hand>)>,
    calls: usize,
}

impl ReplayDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the hands recorded for `frame`, after everything queued so far.
    pub fn insert(&mut self, frame: &VideoFrame, hands: Vec<Hand>) {
        self.pending.push_back((frame.video_time, hands));
    }

    /// Number of `detect` calls served.
    pub fn calls(&self) -> usize {
        self.calls
    }

    /// Recorded frames not yet consumed.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl PoseSource for ReplayDetector {
    fn is_ready(&self) -> bool {
        true
    }

    /// Answers with the next recorded entry for this video time. Entries
    /// before it were never detected (capture off, or repeated video time)
    /// and are dropped. An unknown video time yields no hands and consumes
    /// nothing.
    fn detect(
        &mut self,
        frame: &VideoFrame,
        _timestamp_us: i64,
        max_hands: usize,
    ) -> Result<Vec<Hand>> {
        self.calls += 1;
        let Some(pos) = self
            .pending
            .iter()
            .position(|(video_time, _)| *video_time == frame.video_time)
        else {
            return Ok(Vec::new());
        };
        self.pending.drain(..pos);
        let mut hands = self
            .pending
            .pop_front()
            .map(|(_, hands)| hands)
            .unwrap_or_default();
        hands.truncate(max_hands);
        Ok(hands)
    }
}
