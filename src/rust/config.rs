use std::env;

/// Environment variable overriding the web services base URL
pub const WS_URL_ENV: &str = "KNN_WS_URL";

/// Web services used when nothing else is configured
pub const DEFAULT_WS_URL: &str = "https://zdu.binghamton.edu:2345";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base address of the KNN web services, without a trailing slash
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WS_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Reads the base URL from `KNN_WS_URL`, falling back to the default.
    pub fn from_env() -> Self {
        match env::var(WS_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::default(),
        }
    }
}
