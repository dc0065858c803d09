use serde::Serialize;

use crate::telemetry::{LOG_STREAM_PLACEHOLDER, log_group_name};

///
/// Invocation metadata sent alongside every entry.
///
/// Field names are part of the ingest contract; renaming one breaks ingestion.
///
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InvocationContext {
    pub function_name: String,
    pub invoked_function_arn: String,
    // Below are not used by the extension, but ingest requires them to be present
    pub log_group_name: String,
    pub log_stream_name: String,
}

impl InvocationContext {
    #[must_use]
    pub fn new(function_name: &str, invoked_function_arn: &str) -> InvocationContext {
        InvocationContext {
            function_name: function_name.to_string(),
            invoked_function_arn: invoked_function_arn.to_string(),
            log_group_name: log_group_name(function_name),
            log_stream_name: LOG_STREAM_PLACEHOLDER.to_string(),
        }
    }
}
