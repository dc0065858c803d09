//! Encoding pipeline that turns a captured telemetry payload into a
//! gzip-compressed ingestion request.
//!
//! The wire shape mimics a CloudWatch Logs subscription delivery: the log
//! record is serialized to a JSON string and embedded as the `entry` field of
//! an outer JSON document carrying the invocation context.

pub mod compression;
pub mod context;
pub mod envelope;
pub mod errors;
pub mod identity;
pub mod request;
pub mod serializer;

/// Namespace Lambda writes function logs under.
pub const LOG_GROUP_PREFIX: &str = "/aws/lambda";

/// Ingest requires a log stream name but never reads it.
pub const LOG_STREAM_PLACEHOLDER: &str = "placeholder";

/// Log group for a function, shared by the log record and the context.
#[inline]
#[must_use]
pub fn log_group_name(function_name: &str) -> String {
    format!("{LOG_GROUP_PREFIX}/{function_name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_group_name() {
        assert_eq!(log_group_name("my-func"), "/aws/lambda/my-func");
        assert_eq!(log_group_name(""), "/aws/lambda/");
    }
}
