mod canvas;
mod encoder;
mod error;
mod sampler;
mod surface;

pub use canvas::{Canvas, CanvasConfig, Point, DEFAULT_HEIGHT, DEFAULT_WIDTH, DEFAULT_ZOOM};
pub use encoder::{Channel, EncodedImage, ImageEncoder, IntensityGrid};
pub use error::{CanvasError, EncodingError};
pub use sampler::{PixelSampler, SampledImage};
pub use surface::{DrawingSurface, Rgba};
