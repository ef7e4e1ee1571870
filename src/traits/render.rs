use anyhow::Result;

/// Color with RGBA components (0.0..=1.0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// `#00FF00`, hand skeleton connectors.
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0, 1.0);
    /// `#FF0000`, hand landmark dots.
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// A point in frame pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One drawing primitive produced by a session frame.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    Clear,
    Line {
        from: Point,
        to: Point,
        color: Color,
        width: f32,
    },
    Dot {
        at: Point,
        color: Color,
        width: f32,
    },
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: Color,
    },
}

/// Abstraction over drawing surfaces.
/// Implementations: CommandRecorder (testing and headless replay).
pub trait RenderBackend {
    fn begin_frame(&mut self, width: f64, height: f64) -> Result<()>;
    fn draw(&mut self, command: &RenderCommand) -> Result<()>;
    fn end_frame(&mut self) -> Result<()>;
}
