mod controller;

pub use controller::{Controller, Input, TimedInput};
