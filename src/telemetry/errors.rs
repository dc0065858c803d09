//! Error types for the `telemetry` module

/// Failures while building an ingestion request. None of them are retried
/// here; the caller decides what to do with a failed build.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// One of the two JSON encoding stages failed. `stage` is `"entry"` for
    /// the inner log record and `"payload"` for the outer envelope.
    #[error("failed to serialize {stage}: {source}")]
    Serialization {
        stage: &'static str,
        #[source]
        source: serde_json::Error,
    },
    /// The gzip encoder failed.
    #[error("error compressing data: {0}")]
    Compression(#[source] std::io::Error),
    /// A body could not be read back as gzip.
    #[error("error decompressing data: {0}")]
    Decompression(#[source] std::io::Error),
    /// The URL or a header value could not be turned into a request.
    #[error("error creating request: {0}")]
    RequestConstruction(String),
    /// The lifecycle event carried no invocation to attribute the payload to.
    #[error("event is not an invocation")]
    NotAnInvocation,
}
