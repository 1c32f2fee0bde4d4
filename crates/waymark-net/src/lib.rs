//! Waymark Networking
//!
//! Wire protocol of the proximity-alert service, an HTTP client for it and an
//! in-process evaluator that answers the same way.

pub mod wire;
mod service;
mod client;
pub mod local;

pub use client::{ClientConfig, RemoteAlertClient, RemoteAlertClientBuilder};
pub use local::LocalAlertService;
pub use service::AlertService;
pub use url::Url;

/// Raw HTTP response
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    /// 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, NetError> {
        serde_json::from_slice(&self.body).map_err(|e| NetError::Decode(e.to_string()))
    }
}

/// Network error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetError {
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Malformed response: {0}")]
    Decode(String),
}

impl NetError {
    /// Transport failures and 5xx replies may succeed on a later attempt
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::HttpError { status } => *status >= 500,
            Self::InvalidUrl(_) | Self::Decode(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_classes() {
        let ok = Response { status: 204, body: vec![] };
        assert!(ok.is_success());

        let down = Response { status: 503, body: vec![] };
        assert!(!down.is_success());
    }

    #[test]
    fn test_retryable() {
        assert!(NetError::Network("reset".into()).is_retryable());
        assert!(NetError::HttpError { status: 502 }.is_retryable());
        assert!(!NetError::HttpError { status: 404 }.is_retryable());
        assert!(!NetError::Decode("eof".into()).is_retryable());
    }
}
