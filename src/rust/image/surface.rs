/// One RGBA pixel, channels in `[r, g, b, a]` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba([0, 0, 0, 0]);
    pub const RED: Rgba = Rgba([255, 0, 0, 255]);
    pub const GREEN: Rgba = Rgba([0, 255, 0, 255]);
    pub const BLUE: Rgba = Rgba([0, 0, 255, 255]);
    pub const BLACK: Rgba = Rgba([0, 0, 0, 255]);

    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba([r, g, b, a])
    }

    pub fn r(&self) -> u8 {
        self.0[0]
    }

    pub fn g(&self) -> u8 {
        self.0[1]
    }

    pub fn b(&self) -> u8 {
        self.0[2]
    }

    pub fn a(&self) -> u8 {
        self.0[3]
    }
}

/// A fixed logical pixel grid that the sampling pipeline can read.
///
/// Implementations expose committed pixel state only: a sampler never sees
/// half-drawn strokes. Coordinates are logical, `(0, 0)` is the top-left
/// pixel and `x < width`, `y < height` always hold for calls made by this
/// crate.
pub trait DrawingSurface {
    /// Returns `(width, height)` in logical pixels.
    fn logical_size(&self) -> (usize, usize);

    /// Returns the color stored for the logical pixel at `(x, y)`.
    fn pixel(&self, x: usize, y: usize) -> Rgba;
}
