//! A client for recognizing hand-drawn digits with k-nearest-neighbor
//! MNIST web services.
//!
//! The crate turns freehand drawing-surface pixels into the base64 image
//! the web services expect, and runs the submit-then-label protocol that
//! classifies it. Every boundary operation returns an [`Outcome`]: either
//! the value, or a [`Failure`] holding the errors to show the user.
//!
//! # Basic Usage
//!
//! ```rust
//! use digitrec::{Canvas, ImageEncoder, PixelSampler, Point};
//!
//! // Draw a "1" on the default 20x20 canvas with the blue pen
//! let mut canvas = Canvas::default();
//! canvas.draw_line(Point::new(10.5, 3.5), Point::new(10.5, 16.5));
//!
//! let encoder = ImageEncoder::for_pen(canvas.pen_color()).unwrap();
//! let image = encoder.encode(&PixelSampler::sample(&canvas));
//!
//! let grid = image.decode(20, 20).unwrap();
//! assert_eq!(grid.get(10, 8), 255);
//! assert_eq!(grid.get(2, 8), 0);
//! ```
//!
//! # Classifying
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use digitrec::{Canvas, ClientConfig, ImageEncoder, KnnWsClient, Point, Recognizer};
//!
//! let mut canvas = Canvas::default();
//! canvas.draw_polyline(&[Point::new(6.0, 4.0), Point::new(14.0, 4.0), Point::new(8.0, 17.0)]);
//!
//! let recognizer = Recognizer::new(
//!     KnnWsClient::new(ClientConfig::from_env())?,
//!     ImageEncoder::for_pen(canvas.pen_color())?,
//! );
//! match recognizer.recognize(&canvas).await {
//!     Ok(result) => println!("Label: {}", result.label),
//!     Err(failure) => {
//!         for error in failure.errors() {
//!             eprintln!("{}", error.message);
//!         }
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod image;
mod recognizer;
pub mod result;

pub use client::{ClassificationResult, ClientError, ImageRecord, KnnWsClient};
pub use config::{ClientConfig, DEFAULT_WS_URL, WS_URL_ENV};
pub use image::{
    Canvas, CanvasConfig, CanvasError, Channel, DrawingSurface, EncodedImage, EncodingError,
    ImageEncoder, IntensityGrid, PixelSampler, Point, Rgba, SampledImage,
};
pub use recognizer::Recognizer;
pub use result::{ErrorEntry, Failure, FailureKind, Outcome};

pub fn init_logger() {
    env_logger::init();
}
