use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::image::EncodedImage;
use crate::result::{ErrorEntry, Failure, Outcome};

/// Label computed by the web services for a submitted image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Predicted digit
    pub label: String,
    /// Id of the nearest training image
    pub id: String,
}

/// An image stored by the web services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub features: EncodedImage,
    #[serde(default)]
    pub label: Option<String>,
}

/// Body of a successful image submission.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct Created {
    pub id: String,
}

/// Maps a web service response body to an outcome.
///
/// A body with a non-null `errors` member is a service failure whatever
/// else it carries; the payload type is only checked when `errors` is
/// absent. Fails only when the body is not JSON or the payload does not
/// have the expected shape.
pub(crate) fn parse_body<T: DeserializeOwned>(body: &str) -> Result<Outcome<T>, serde_json::Error> {
    let value: Value = serde_json::from_str(body)?;
    match value.get("errors") {
        Some(errors) if !errors.is_null() => Ok(Err(service_failure(errors))),
        _ => Ok(Ok(serde_json::from_value(value)?)),
    }
}

fn service_failure(errors: &Value) -> Failure {
    let first = match errors {
        Value::Array(entries) => entries.first().map(error_entry),
        other => Some(error_entry(other)),
    };
    Failure::from_service_errors(first.into_iter().collect())
}

/// Reads one reported error, tolerating entries that are not
/// `{message, options}` objects.
fn error_entry(entry: &Value) -> ErrorEntry {
    let message = match entry.get("message") {
        Some(Value::String(message)) => message.clone(),
        Some(message) if !message.is_null() => message.to_string(),
        _ => match entry {
            Value::String(message) => message.clone(),
            other => other.to_string(),
        },
    };
    ErrorEntry {
        message,
        options: entry.get("options").filter(|o| !o.is_null()).cloned(),
    }
}
