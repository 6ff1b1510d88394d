mod client;
mod error;
mod protocol;

pub use client::KnnWsClient;
pub use error::ClientError;
pub use protocol::{ClassificationResult, ImageRecord};
