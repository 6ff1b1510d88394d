use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::EncodingError;
use super::sampler::SampledImage;
use super::surface::Rgba;

/// The color channel that carries stroke information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Channel {
    Red,
    Green,
    #[default]
    Blue,
    Alpha,
}

impl Channel {
    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
            Channel::Alpha => 3,
        }
    }

    pub fn extract(self, pixel: Rgba) -> u8 {
        pixel.0[self.index()]
    }

    /// Picks the channel a pen of `color` draws on.
    ///
    /// Returns `None` unless exactly one of red, green and blue is non-zero,
    /// since only then does a single channel separate strokes from the
    /// transparent background.
    pub fn of_color(color: Rgba) -> Option<Channel> {
        let lit: Vec<Channel> = [Channel::Red, Channel::Green, Channel::Blue]
            .into_iter()
            .filter(|channel| channel.extract(color) > 0)
            .collect();
        match lit.as_slice() {
            [channel] => Some(*channel),
            _ => None,
        }
    }
}

/// Single-channel intensities `0..=255`, one per logical pixel, indexed `[[y, x]]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntensityGrid {
    values: Array2<u8>,
}

impl IntensityGrid {
    pub fn from_sampled(image: &SampledImage, channel: Channel) -> Self {
        Self {
            values: image.pixels().mapv(|pixel| channel.extract(pixel)),
        }
    }

    /// Rebuilds a grid from row-major bytes.
    pub fn from_bytes(width: usize, height: usize, bytes: Vec<u8>) -> Result<Self, EncodingError> {
        let expected = width
            .checked_mul(height)
            .ok_or(EncodingError::DimensionsOverflow { width, height })?;
        let actual = bytes.len();
        let values = Array2::from_shape_vec((height, width), bytes)
            .map_err(|_| EncodingError::SizeMismatch { expected, actual })?;
        Ok(Self { values })
    }

    pub fn width(&self) -> usize {
        self.values.ncols()
    }

    pub fn height(&self) -> usize {
        self.values.nrows()
    }

    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.values[[y, x]]
    }

    pub fn values(&self) -> &Array2<u8> {
        &self.values
    }

    /// Row-major bytes, the layout the web services expect.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.values.iter().copied().collect()
    }
}

/// Base64 text of an [`IntensityGrid`]; sent on the wire as a JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedImage(String);

impl EncodedImage {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, EncodingError> {
        Ok(STANDARD.decode(&self.0)?)
    }

    /// Decodes the payload into a `width` x `height` grid.
    pub fn decode(&self, width: usize, height: usize) -> Result<IntensityGrid, EncodingError> {
        IntensityGrid::from_bytes(width, height, self.to_bytes()?)
    }
}

impl From<String> for EncodedImage {
    fn from(value: String) -> Self {
        EncodedImage(value)
    }
}

impl fmt::Display for EncodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Turns sampled pixels into the payload the KNN web services accept.
///
/// The encoder keeps the surface's own resolution; adapting it to the
/// model's resolution is left to the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImageEncoder {
    channel: Channel,
}

impl ImageEncoder {
    pub fn new(channel: Channel) -> Self {
        Self { channel }
    }

    /// Creates an encoder reading the channel a pen of `color` draws on.
    pub fn for_pen(color: Rgba) -> Result<Self, EncodingError> {
        Channel::of_color(color)
            .map(Self::new)
            .ok_or(EncodingError::AmbiguousPenColor(color))
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn intensities(&self, image: &SampledImage) -> IntensityGrid {
        IntensityGrid::from_sampled(image, self.channel)
    }

    pub fn encode(&self, image: &SampledImage) -> EncodedImage {
        Self::encode_grid(&self.intensities(image))
    }

    pub fn encode_grid(grid: &IntensityGrid) -> EncodedImage {
        EncodedImage(STANDARD.encode(grid.to_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_of_color() {
        assert_eq!(Channel::of_color(Rgba::BLUE), Some(Channel::Blue));
        assert_eq!(Channel::of_color(Rgba::RED), Some(Channel::Red));
        assert_eq!(Channel::of_color(Rgba::new(0, 128, 0, 255)), Some(Channel::Green));
        assert_eq!(Channel::of_color(Rgba::BLACK), None);
        assert_eq!(Channel::of_color(Rgba::new(255, 0, 255, 255)), None);
    }

    #[test]
    fn test_for_pen_rejects_mixed_colors() {
        assert!(ImageEncoder::for_pen(Rgba::BLUE).is_ok());
        let err = ImageEncoder::for_pen(Rgba::new(10, 10, 10, 255)).unwrap_err();
        assert!(matches!(err, EncodingError::AmbiguousPenColor(_)));
    }

    #[test]
    fn test_encode_grid_is_row_major() {
        let grid = IntensityGrid::from_bytes(2, 2, vec![0, 1, 2, 255]).unwrap();
        assert_eq!(grid.get(1, 0), 1);
        assert_eq!(grid.get(0, 1), 2);
        let encoded = ImageEncoder::encode_grid(&grid);
        assert_eq!(encoded.as_str(), "AAEC/w==");
    }

    #[test]
    fn test_decode_size_mismatch() {
        let encoded = EncodedImage::from("AAEC/w==".to_string());
        let err = encoded.decode(3, 3).unwrap_err();
        assert!(matches!(err, EncodingError::SizeMismatch { expected: 9, actual: 4 }));
    }

    #[test]
    fn test_decode_rejects_overflowing_dimensions() {
        let encoded = EncodedImage::from("AAEC/w==".to_string());
        let err = encoded.decode(usize::MAX, 2).unwrap_err();
        assert!(matches!(
            err,
            EncodingError::DimensionsOverflow { width: usize::MAX, height: 2 }
        ));
    }

    #[test]
    fn test_decode_invalid_base64() {
        let encoded = EncodedImage::from("not base64!".to_string());
        assert!(matches!(encoded.decode(2, 2), Err(EncodingError::InvalidBase64(_))));
    }

    #[test]
    fn test_encoded_image_serializes_as_string() {
        let encoded = EncodedImage::from("AAEC/w==".to_string());
        assert_eq!(serde_json::to_string(&encoded).unwrap(), "\"AAEC/w==\"");
    }
}
