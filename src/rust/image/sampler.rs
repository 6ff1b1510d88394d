use ndarray::Array2;

use super::surface::{DrawingSurface, Rgba};

/// Colors read from every logical pixel of a drawing surface.
///
/// Indexed `[[y, x]]`; the grid always matches the surface's logical size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampledImage {
    pixels: Array2<Rgba>,
}

impl SampledImage {
    pub fn width(&self) -> usize {
        self.pixels.ncols()
    }

    pub fn height(&self) -> usize {
        self.pixels.nrows()
    }

    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        self.pixels[[y, x]]
    }

    pub fn pixels(&self) -> &Array2<Rgba> {
        &self.pixels
    }
}

/// Reads the committed pixel state of a [`DrawingSurface`].
pub struct PixelSampler;

impl PixelSampler {
    /// Samples the full logical grid of `surface`. Never mutates the surface.
    pub fn sample<S: DrawingSurface + ?Sized>(surface: &S) -> SampledImage {
        let (width, height) = surface.logical_size();
        let pixels = Array2::from_shape_fn((height, width), |(y, x)| surface.pixel(x, y));
        SampledImage { pixels }
    }
}
