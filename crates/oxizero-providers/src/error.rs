//! Typed errors for the provider layer.

use thiserror::Error;

/// Failure modes of one streamed model round.
///
/// Errors raised before any event is delivered come back directly from
/// [`crate::traits::ModelProvider::stream_turn`]; errors mid-stream arrive
/// as `Err` items on the event channel.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The HTTP request could not be sent or completed.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    /// The event stream broke mid-round.
    #[error("stream interrupted: {0}")]
    Stream(String),
}
