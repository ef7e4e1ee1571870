use tracing::{info, warn};

use crate::model::hand::{PerSide, Side};

use super::tap::Threshold;

/// Running sum of squared pinch distances for one side.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CalibrationSample {
    pub sum: f64,
    pub count: u32,
}

impl CalibrationSample {
    pub fn add(&mut self, distance: f64) {
        self.sum += distance;
        self.count += 1;
    }

    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        Some(self.sum / f64::from(self.count))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationPhase {
    Idle,
    Collecting { started_us: i64 },
    Complete,
}

/// Fixed-window sampler deriving a tap threshold per side.
#[derive(Debug, Clone)]
pub struct Calibrator {
    phase: CalibrationPhase,
    samples: PerSide<CalibrationSample>,
    thresholds: PerSide<Threshold>,
    duration_us: i64,
    multiplier: f64,
}

impl Calibrator {
    pub fn new(duration_us: i64, multiplier: f64) -> Self {
        Self {
            phase: CalibrationPhase::Idle,
            samples: PerSide::default(),
            thresholds: PerSide::default(),
            duration_us,
            multiplier,
        }
    }

    pub fn phase(&self) -> CalibrationPhase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == CalibrationPhase::Complete
    }

    pub fn is_collecting(&self) -> bool {
        matches!(self.phase, CalibrationPhase::Collecting { .. })
    }

    /// Thresholds, only once the calibration window has elapsed.
    pub fn thresholds(&self) -> Option<&PerSide<Threshold>> {
        self.is_complete().then_some(&self.thresholds)
    }

    pub fn samples(&self) -> &PerSide<CalibrationSample> {
        &self.samples
    }

    /// Enter `Collecting`, discarding samples and thresholds from any earlier run.
    pub fn begin(&mut self, now_us: i64) {
        self.phase = CalibrationPhase::Collecting { started_us: now_us };
        self.samples = PerSide::default();
        self.thresholds = PerSide::default();
        info!("calibration started");
    }

    /// Advance one frame with the pinch distance of every detected hand.
    ///
    /// Returns the new thresholds on the frame the window closes.
    pub fn update<I>(&mut self, now_us: i64, distances: I) -> Option<PerSide<Threshold>>
    where
        I: IntoIterator<Item = (Side, f64)>,
    {
        let CalibrationPhase::Collecting { started_us } = self.phase else {
            return None;
        };

        if now_us - started_us >= self.duration_us {
            self.finish();
            return Some(self.thresholds);
        }

        for (side, distance) in distances {
            self.samples.get_mut(side).add(distance);
        }
        None
    }

    fn finish(&mut self) {
        for side in Side::ALL {
            let threshold = match self.samples.get(side).mean() {
                Some(mean) => Threshold::Calibrated(mean * self.multiplier),
                None => {
                    warn!("no {} hand seen during calibration", side.label());
                    Threshold::Uncalibrated
                }
            };
            *self.thresholds.get_mut(side) = threshold;
        }
        self.phase = CalibrationPhase::Complete;
        info!(
            left = ?self.thresholds.left,
            right = ?self.thresholds.right,
            left_samples = self.samples.left.count,
            right_samples = self.samples.right.count,
            "calibration complete"
        );
    }
}
