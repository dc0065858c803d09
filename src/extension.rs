use serde::Deserialize;

/// Tracing header attached to an invocation by the Lambda service.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Tracing {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

/// Event returned by the Extensions API `event/next` endpoint
/// <https://docs.aws.amazon.com/lambda/latest/dg/runtimes-extensions-api.html#extensions-api-next>
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(tag = "eventType")]
pub enum InvocationEvent {
    #[serde(rename(deserialize = "INVOKE"), rename_all = "camelCase")]
    Invoke {
        deadline_ms: u64,
        request_id: String,
        invoked_function_arn: String,
        tracing: Option<Tracing>,
    },
    #[serde(rename(deserialize = "SHUTDOWN"), rename_all = "camelCase")]
    Shutdown {
        shutdown_reason: String,
        deadline_ms: u64,
    },
}

impl InvocationEvent {
    /// ARN the function was invoked with, absent on shutdown.
    #[must_use]
    pub fn invoked_function_arn(&self) -> Option<&str> {
        match self {
            InvocationEvent::Invoke {
                invoked_function_arn,
                ..
            } => Some(invoked_function_arn),
            InvocationEvent::Shutdown { .. } => None,
        }
    }
}
