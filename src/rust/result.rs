use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Message used when the service flags an error but lists none.
const UNSPECIFIED_SERVICE_ERROR: &str = "web service reported an error without details";

/// A single user-facing error, as reported by the web services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEntry {
    /// Human readable description of what went wrong
    pub message: String,
    /// Extra service-specific details (error code, offending widget, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

impl ErrorEntry {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            options: None,
        }
    }

    pub fn with_options(mut self, options: Value) -> Self {
        self.options = Some(options);
        self
    }
}

/// Where a failure originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Connection failure or a response body that could not be read as JSON
    Transport,
    /// A well-formed error response from the web service
    Service,
}

/// The failure side of every boundary operation in this crate.
///
/// Always holds at least one [`ErrorEntry`]. Callers render
/// [`Failure::errors`] in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    kind: FailureKind,
    errors: Vec<ErrorEntry>,
}

/// Success value or [`Failure`]; the return type of all client operations.
pub type Outcome<T> = Result<T, Failure>;

impl Failure {
    /// Builds a transport failure from the description of the underlying error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Transport,
            errors: vec![ErrorEntry::new(message)],
        }
    }

    /// Builds a service failure from a single entry.
    pub fn service(entry: ErrorEntry) -> Self {
        Self {
            kind: FailureKind::Service,
            errors: vec![entry],
        }
    }

    /// Converts the `errors` list of a service response into a failure.
    ///
    /// Only the first entry is surfaced; later entries are dropped.
    pub fn from_service_errors(errors: Vec<ErrorEntry>) -> Self {
        let first = errors
            .into_iter()
            .next()
            .unwrap_or_else(|| ErrorEntry::new(UNSPECIFIED_SERVICE_ERROR));
        Self::service(first)
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn errors(&self) -> &[ErrorEntry] {
        &self.errors
    }

    /// Message of the first error entry.
    pub fn message(&self) -> &str {
        // constructors never leave `errors` empty
        self.errors.first().map(|e| e.message.as_str()).unwrap_or_default()
    }

    /// Options of the first error entry, if any.
    pub fn options(&self) -> Option<&Value> {
        self.errors.first().and_then(|e| e.options.as_ref())
    }

    pub fn is_transport(&self) -> bool {
        self.kind == FailureKind::Transport
    }

    pub fn is_service(&self) -> bool {
        self.kind == FailureKind::Service
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.errors.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for Failure {}
