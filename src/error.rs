//! Error types for the synchronisation pipeline.

use reqwest::StatusCode;
use thiserror::Error;

/// All errors that can arise while talking to the documentation service or
/// the Postman API.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The request could not be constructed at all (malformed URL or body).
    #[error("building request for {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The request was sent but no usable response came back. Covers
    /// connection failures and the 30-second request timeout.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The remote answered with a status outside the accepted set. Carries
    /// the raw response body for diagnostics.
    #[error("unexpected status {status} from {url}: {body}")]
    UnexpectedStatus {
        url: String,
        status: StatusCode,
        body: String,
    },

    /// The response body was not the JSON we expected.
    #[error("decoding response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl SyncError {
    /// Classifies an error from a send call: request construction failures
    /// are reported as such, everything else is a transport failure.
    pub(crate) fn from_send(url: &str, source: reqwest::Error) -> Self {
        if source.is_builder() {
            SyncError::Request {
                url: url.to_string(),
                source,
            }
        } else {
            SyncError::Transport {
                url: url.to_string(),
                source,
            }
        }
    }
}
