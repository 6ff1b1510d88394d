use std::error::Error as _;

use crate::result::Failure;

/// Transport-level errors: the request never produced a readable JSON body.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// The error message followed by the messages of its causes.
    pub fn describe(&self) -> String {
        let mut description = self.to_string();
        let mut source = self.source();
        while let Some(cause) = source {
            let message = cause.to_string();
            if !description.contains(&message) {
                description.push_str(": ");
                description.push_str(&message);
            }
            source = cause.source();
        }
        description
    }
}

impl From<ClientError> for Failure {
    fn from(err: ClientError) -> Self {
        Failure::transport(err.describe())
    }
}
