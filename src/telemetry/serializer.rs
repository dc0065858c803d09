use serde::Serialize;
use tracing::{debug, error};

use crate::telemetry::context::InvocationContext;
use crate::telemetry::envelope::LogRecord;
use crate::telemetry::errors::RequestError;

/// Body of an ingestion request.
///
/// `entry` is the log record already serialized to a JSON string. Ingest
/// decodes it a second time, so it must not be inlined as an object.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OutboundPayload {
    pub context: InvocationContext,
    pub entry: String,
}

/// Encodes the record into `entry`, then the whole payload into bytes.
pub fn serialize(record: &LogRecord, context: InvocationContext) -> Result<Vec<u8>, RequestError> {
    let entry = serde_json::to_string(record).map_err(|source| {
        error!("Failed to serialize log record: {source}");
        RequestError::Serialization {
            stage: "entry",
            source,
        }
    })?;

    let payload = OutboundPayload { context, entry };
    let bytes = serde_json::to_vec(&payload).map_err(|source| {
        error!("Failed to serialize outbound payload: {source}");
        RequestError::Serialization {
            stage: "payload",
            source,
        }
    })?;

    debug!("Serialized telemetry payload: {} bytes", bytes.len());
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::envelope::build_log_record;
    use crate::telemetry::identity::tests::FixedIdentifierSource;
    use serde_json::Value;

    const ARN: &str = "arn:aws:lambda:us-east-1:123456789012:function:my-func";

    #[test]
    fn test_entry_is_a_string() {
        let ids = FixedIdentifierSource::at(1);
        let record = build_log_record(b"hello world", "my-func", &ids);
        let bytes = serialize(&record, InvocationContext::new("my-func", ARN))
            .expect("failed to serialize");

        let value: Value = serde_json::from_slice(&bytes).expect("body is not json");
        let entry = value["entry"].as_str().expect("entry should be a string");
        let entry: Value = serde_json::from_str(entry).expect("entry is not json");

        assert_eq!(entry["logGroup"], "/aws/lambda/my-func");
        assert_eq!(entry["logEvents"][0]["message"], "hello world");
        assert_eq!(entry["logEvents"][0]["timestamp"], 1);
    }

    #[test]
    fn test_exact_wire_format() {
        let ids = FixedIdentifierSource::at(5);
        let record = build_log_record(b"x", "f", &ids);
        let bytes = serialize(&record, InvocationContext::new("f", "arn")).expect("failed to serialize");

        let expected = r#"{"context":{"function_name":"f","invoked_function_arn":"arn","log_group_name":"/aws/lambda/f","log_stream_name":"placeholder"},"entry":"{\"logEvents\":[{\"id\":\"event-0\",\"message\":\"x\",\"timestamp\":5}],\"logGroup\":\"/aws/lambda/f\",\"logStream\":\"\",\"messageType\":\"\",\"owner\":\"\"}"}"#;
        assert_eq!(String::from_utf8(bytes).expect("not utf8"), expected);
    }

    #[test]
    fn test_quotes_in_message_survive_double_encoding() {
        let ids = FixedIdentifierSource::at(0);
        let message = r#"{"level":"info","msg":"a \"quoted\" word"}"#;
        let record = build_log_record(message.as_bytes(), "my-func", &ids);
        let bytes = serialize(&record, InvocationContext::new("my-func", ARN))
            .expect("failed to serialize");

        let value: Value = serde_json::from_slice(&bytes).expect("body is not json");
        let entry: Value = serde_json::from_str(value["entry"].as_str().expect("entry"))
            .expect("entry is not json");
        assert_eq!(entry["logEvents"][0]["message"], message);
    }
}
