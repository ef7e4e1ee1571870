/// Per-side pinch threshold produced by calibration.
///
/// A side that saw no samples during calibration stays `Uncalibrated`
/// instead of carrying a 0/0 threshold.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Threshold {
    #[default]
    Uncalibrated,
    Calibrated(f64),
}

impl Threshold {
    pub fn value(self) -> Option<f64> {
        match self {
            Threshold::Calibrated(v) => Some(v),
            Threshold::Uncalibrated => None,
        }
    }

    pub fn is_calibrated(self) -> bool {
        matches!(self, Threshold::Calibrated(_))
    }
}

/// Edge reported by a single detector update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapEdge {
    None,
    Pressed,
    Released,
}

/// Hysteresis classifier turning pinch distance into a tapped/untapped state.
#[derive(Debug, Clone, Copy, Default)]
pub struct TapDetector {
    tapped: bool,
}

impl TapDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_tapped(&self) -> bool {
        self.tapped
    }

    /// Feed the current squared pinch distance.
    /// Untapped flips to tapped below `threshold`; tapped flips back at or above it.
    pub fn update(&mut self, distance: f64, threshold: f64) -> TapEdge {
        if self.tapped {
            if distance >= threshold {
                self.tapped = false;
                return TapEdge::Released;
            }
        } else if distance < threshold {
            self.tapped = true;
            return TapEdge::Pressed;
        }
        TapEdge::None
    }

    pub fn reset(&mut self) {
        self.tapped = false;
    }
}
