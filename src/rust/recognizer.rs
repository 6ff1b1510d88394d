use log::debug;

use crate::client::{ClassificationResult, KnnWsClient};
use crate::image::{DrawingSurface, EncodedImage, ImageEncoder, PixelSampler};
use crate::result::Outcome;

/// The "classify" action: sample a drawing surface, encode it, and ask
/// the web services for its label.
#[derive(Debug, Clone)]
pub struct Recognizer {
    client: KnnWsClient,
    encoder: ImageEncoder,
}

impl Recognizer {
    pub fn new(client: KnnWsClient, encoder: ImageEncoder) -> Self {
        Self { client, encoder }
    }

    pub fn encoder(&self) -> &ImageEncoder {
        &self.encoder
    }

    /// Encodes the current content of `surface`.
    pub fn encode<S: DrawingSurface + ?Sized>(&self, surface: &S) -> EncodedImage {
        let sampled = PixelSampler::sample(surface);
        debug!(
            "Sampled {}x{} surface using the {:?} channel",
            sampled.width(),
            sampled.height(),
            self.encoder.channel()
        );
        self.encoder.encode(&sampled)
    }

    /// Classifies the current content of `surface`.
    pub async fn recognize<S: DrawingSurface + ?Sized>(
        &self,
        surface: &S,
    ) -> Outcome<ClassificationResult> {
        let image = self.encode(surface);
        self.client.classify(&image).await
    }
}
