use super::surface::Rgba;

/// Errors raised while turning pixels into a service payload, or back.
#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    /// The payload is not valid standard base64
    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
    /// The decoded byte count does not match the expected grid
    #[error("Image size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
    /// Width times height does not fit in memory
    #[error("Image dimensions {width}x{height} overflow")]
    DimensionsOverflow { width: usize, height: usize },
    /// A pen color that does not put its signal on exactly one color channel
    #[error("Pen color {0:?} does not carry exactly one color channel")]
    AmbiguousPenColor(Rgba),
}

/// Errors raised by the in-memory drawing surface.
#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    #[error("Invalid canvas dimensions: {width}x{height} at zoom {zoom}")]
    InvalidDimensions { width: usize, height: usize, zoom: u32 },
    #[error("Invalid pen width: {0}")]
    InvalidPenWidth(f32),
    #[error("Invalid point '{0}': expected <x>,<y>")]
    InvalidPoint(String),
}
