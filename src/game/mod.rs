mod calibration;
mod cursor;
mod error;
mod score;
mod session;
mod tap;

pub use calibration::{CalibrationPhase, CalibrationSample, Calibrator};
pub use cursor::{CursorTick, RhythmCursor};
pub use error::SessionError;
pub use score::{Accuracy, CycleReport, ScoreAccumulator, Scorer};
pub use session::{Command, FrameInput, FrameOutput, Session, SessionEvent};
pub use tap::{TapDetector, TapEdge, Threshold};
