//! Pinch-tap rhythm trainer core.
//!
//! Hands detected by an external landmark model drive a per-side tap
//! detector. A short calibration window sets each side's pinch threshold,
//! then taps are scored against a looping rhythm track.

pub mod app;
pub mod config;
pub mod game;
pub mod model;
pub mod render;
pub mod replay;
pub mod traits;
pub mod util;
