use std::fmt;

use crate::model::hand::{PerSide, Side};

/// Hit ratio of one side over a cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Accuracy {
    /// Nothing was scored for this side during the cycle.
    NoData,
    /// `hits / total`, always within `0.0..=1.0`.
    Ratio(f64),
}

impl Accuracy {
    pub fn ratio(self) -> Option<f64> {
        match self {
            Accuracy::Ratio(r) => Some(r),
            Accuracy::NoData => None,
        }
    }

    pub fn percent(self) -> Option<f64> {
        self.ratio().map(|r| r * 100.0)
    }
}

impl fmt::Display for Accuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accuracy::Ratio(r) => write!(f, "{:.1}%", r * 100.0),
            Accuracy::NoData => f.write_str("--"),
        }
    }
}

/// Frame-weighted hit counter for one side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreAccumulator {
    hits: u64,
    total: u64,
}

impl ScoreAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, matched: bool) {
        if matched {
            self.hits += 1;
        }
        self.total += 1;
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn accuracy(&self) -> Accuracy {
        if self.total == 0 {
            return Accuracy::NoData;
        }
        Accuracy::Ratio(self.hits as f64 / self.total as f64)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Per-side accuracy emitted when the cursor loops.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleReport {
    /// 1-based index of the cycle that just ended.
    pub cycle: u64,
    pub left: Accuracy,
    pub right: Accuracy,
}

impl CycleReport {
    pub fn get(&self, side: Side) -> Accuracy {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// Scores tap state against the expected state, frame by frame.
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    accumulators: PerSide<ScoreAccumulator>,
}

impl Scorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score one side for the current frame.
    pub fn score(&mut self, side: Side, tapped: bool, expected: bool) {
        self.accumulators.get_mut(side).record(tapped == expected);
    }

    pub fn accumulator(&self, side: Side) -> &ScoreAccumulator {
        self.accumulators.get(side)
    }

    /// Close the cycle: report and zero both accumulators.
    pub fn flush(&mut self, cycle: u64) -> CycleReport {
        let report = CycleReport {
            cycle,
            left: self.accumulators.left.accuracy(),
            right: self.accumulators.right.accuracy(),
        };
        self.reset();
        report
    }

    pub fn reset(&mut self) {
        self.accumulators.left.reset();
        self.accumulators.right.reset();
    }
}
