//! Hand landmarks and rhythm tracks.

pub mod error;
pub mod hand;
pub mod track;

pub use error::TrackError;
pub use hand::{Hand, Handedness, LANDMARK_COUNT, Landmark, PerSide, Side, squared_distance};
pub use track::{RhythmTrack, TrackLayout, Zone, ZoneKind};
