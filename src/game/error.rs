use thiserror::Error;

/// Reasons a user command is rejected. The session is left unchanged.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    #[error("Hand detector is not loaded yet")]
    DetectorNotReady,

    #[error("Camera capture is not running")]
    CaptureNotRunning,

    #[error("Tap tracking needs a completed calibration")]
    CalibrationIncomplete,

    #[error("Calibration saw no hands; recalibrate before tracking taps")]
    NoCalibratedHand,
}
