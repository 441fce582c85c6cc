//! Submit sink error types

/// Errors a [`SubmitSink`](crate::SubmitSink) can hit while delivering form data.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// Writing to the underlying output failed.
    #[error("Sink I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Form data could not be encoded.
    #[error("Sink encode error: {0}")]
    Encode(#[from] serde_json::Error),
}
