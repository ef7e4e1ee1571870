//! Seams to the collaborators outside the session core.

pub mod audio;
pub mod pose;
pub mod render;
pub mod time;
