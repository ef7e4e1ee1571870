#![allow(dead_code)]

use pinch_rhythm::model::{Hand, Handedness, LANDMARK_COUNT, Landmark};

pub const MS: i64 = 1_000;

/// A hand whose thumb tip and index tip sit `gap` apart; everything else at the centre.
pub fn hand(handedness: Handedness, gap: f64) -> Hand {
    let mut points = [Landmark::new(0.5, 0.5); LANDMARK_COUNT];
    points[8] = Landmark::new(0.5 + gap, 0.5);
    Hand::new(points, handedness)
}

/// Open hand: pinch distance 0.04, so calibration yields threshold 0.01.
pub fn open(handedness: Handedness) -> Hand {
    hand(handedness, 0.2)
}

/// Pinched hand: pinch distance 0.0025, well under the calibrated threshold.
pub fn pinched(handedness: Handedness) -> Hand {
    hand(handedness, 0.05)
}
