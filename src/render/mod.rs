mod command_recorder;
pub mod overlay;

pub use command_recorder::{CommandRecorder, RecordedFrame};
