use log::{debug, error, info};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use super::error::ClientError;
use super::protocol::{parse_body, ClassificationResult, Created, ImageRecord};
use crate::config::ClientConfig;
use crate::image::EncodedImage;
use crate::result::{Failure, Outcome};

/// Client for the KNN digit classification web services.
///
/// The client only holds immutable endpoint addresses and a connection
/// pool, so it can be cloned freely and used from concurrent tasks; every
/// call is independent of the others.
///
/// ```no_run
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// use digitrec::{ClientConfig, KnnWsClient, PixelSampler, ImageEncoder, Canvas, Point};
///
/// let client = KnnWsClient::new(ClientConfig::from_env())?;
/// let mut canvas = Canvas::default();
/// canvas.draw_line(Point::new(10.0, 3.0), Point::new(10.0, 17.0));
/// let image = ImageEncoder::default().encode(&PixelSampler::sample(&canvas));
///
/// match client.classify(&image).await {
///     Ok(result) => println!("label {} (nearest {})", result.label, result.id),
///     Err(failure) => eprintln!("{}", failure),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct KnnWsClient {
    base_url: String,
    images_url: String,
    labels_url: String,
    http: Client,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<KnnWsClient>();
    }
};

/// Progress of a single classification.
///
/// `FetchingLabel` can only be reached with the id returned by a
/// successful submission.
enum Classification<'a> {
    Submitting(&'a EncodedImage),
    FetchingLabel(Created),
    Success(ClassificationResult),
    Failure(Failure),
}

impl KnnWsClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_http_client(config, http))
    }

    /// Uses an existing `reqwest` client, e.g. one with custom TLS settings.
    pub fn with_http_client(config: ClientConfig, http: Client) -> Self {
        let base_url = config.base_url;
        Self {
            images_url: format!("{}/knn/images", base_url),
            labels_url: format!("{}/knn/labels", base_url),
            base_url,
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn images_url(&self) -> &str {
        &self.images_url
    }

    pub fn labels_url(&self) -> &str {
        &self.labels_url
    }

    /// Classifies a base64 MNIST-compatible image.
    ///
    /// Submits the image, then fetches the label computed for it. The label
    /// is only requested once the submission returned an id; the first
    /// failure ends the exchange. Nothing is retried.
    pub async fn classify(&self, image: &EncodedImage) -> Outcome<ClassificationResult> {
        let mut state = Classification::Submitting(image);
        loop {
            state = match state {
                Classification::Submitting(image) => match self.submit(image).await {
                    Ok(created) => Classification::FetchingLabel(created),
                    Err(failure) => Classification::Failure(failure),
                },
                Classification::FetchingLabel(created) => match self.fetch_label(&created).await {
                    Ok(result) => Classification::Success(result),
                    Err(failure) => Classification::Failure(failure),
                },
                Classification::Success(result) => {
                    info!("Image {} classified as {}", result.id, result.label);
                    return Ok(result);
                }
                Classification::Failure(failure) => return Err(failure),
            };
        }
    }

    /// Retrieves a previously stored image and its label, if any.
    pub async fn get_image(&self, image_id: &str) -> Outcome<ImageRecord> {
        let url = format!("{}/{}", self.images_url, image_id);
        self.exchange(self.http.get(&url), &url).await
    }

    async fn submit(&self, image: &EncodedImage) -> Outcome<Created> {
        debug!("Submitting {} byte image to {}", image.as_str().len(), self.images_url);
        let request = self.http.post(&self.images_url).json(image);
        self.exchange(request, &self.images_url).await
    }

    async fn fetch_label(&self, created: &Created) -> Outcome<ClassificationResult> {
        let url = format!("{}/{}", self.labels_url, created.id);
        self.exchange(self.http.get(&url), &url).await
    }

    /// Sends `request` and maps the JSON body to an outcome. Transport
    /// errors are logged here since callers only see the flattened failure.
    async fn exchange<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &str,
    ) -> Outcome<T> {
        match Self::send(request).await {
            Ok(outcome) => outcome,
            Err(err) => {
                error!("Request to {} failed: {}", url, err.describe());
                Err(err.into())
            }
        }
    }

    async fn send<T: DeserializeOwned>(
        request: RequestBuilder,
    ) -> Result<Outcome<T>, ClientError> {
        let response = request.send().await?;
        debug!("{} responded with status {}", response.url(), response.status());
        let body = response.text().await?;
        Ok(parse_body(&body)?)
    }
}
