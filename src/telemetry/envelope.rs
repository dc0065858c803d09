use serde::Serialize;

use crate::telemetry::identity::IdentifierSource;
use crate::telemetry::log_group_name;

///
/// CloudWatch Logs style record, the shape of a subscription filter delivery.
///
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    pub log_events: Vec<LogEvent>,
    pub log_group: String,
    // Below are not used by the extension, but ingest expects them to be present
    pub log_stream: String,
    pub message_type: String,
    pub owner: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LogEvent {
    pub id: String,
    pub message: String,
    pub timestamp: i64,
}

impl LogEvent {
    /// Wraps a raw payload with a fresh id and the current time.
    #[must_use]
    pub fn new(payload: &[u8], ids: &dyn IdentifierSource) -> LogEvent {
        LogEvent {
            id: ids.unique_id(),
            message: payload_text(payload),
            timestamp: ids.timestamp_millis(),
        }
    }
}

/// Payload as text, one U+FFFD per byte that is not part of valid UTF-8.
/// Ingest expects the per-byte replacement, so a truncated multi-byte
/// sequence yields one replacement for each of its bytes.
fn payload_text(payload: &[u8]) -> String {
    let mut text = String::with_capacity(payload.len());
    for chunk in payload.utf8_chunks() {
        text.push_str(chunk.valid());
        for _ in chunk.invalid() {
            text.push(char::REPLACEMENT_CHARACTER);
        }
    }
    text
}

/// Builds the single-event record for one payload.
#[must_use]
pub fn build_log_record(
    payload: &[u8],
    function_name: &str,
    ids: &dyn IdentifierSource,
) -> LogRecord {
    LogRecord {
        log_events: vec![LogEvent::new(payload, ids)],
        log_group: log_group_name(function_name),
        log_stream: String::new(),
        message_type: String::new(),
        owner: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::identity::tests::FixedIdentifierSource;

    #[test]
    fn test_build_log_record() {
        let ids = FixedIdentifierSource::at(1_666_361_103_165);
        let record = build_log_record(b"hello world", "my-func", &ids);

        assert_eq!(
            record,
            LogRecord {
                log_events: vec![LogEvent {
                    id: "event-0".to_string(),
                    message: "hello world".to_string(),
                    timestamp: 1_666_361_103_165,
                }],
                log_group: "/aws/lambda/my-func".to_string(),
                log_stream: String::new(),
                message_type: String::new(),
                owner: String::new(),
            }
        );
    }

    #[test]
    fn test_empty_payload() {
        let ids = FixedIdentifierSource::at(0);
        let record = build_log_record(b"", "my-func", &ids);
        assert_eq!(record.log_events.len(), 1);
        assert_eq!(record.log_events[0].message, "");
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let ids = FixedIdentifierSource::at(0);
        let record = build_log_record(&[b'o', b'k', 0xff], "my-func", &ids);
        assert_eq!(record.log_events[0].message, "ok\u{fffd}");
    }

    #[test]
    fn test_truncated_sequence_is_replaced_per_byte() {
        let ids = FixedIdentifierSource::at(0);
        // First two bytes of the three-byte euro sign
        let record = build_log_record(&[b'a', 0xE2, 0x82, b'b'], "my-func", &ids);
        assert_eq!(record.log_events[0].message, "a\u{fffd}\u{fffd}b");

        let record = build_log_record(&[0xff, 0xfe, 0xE2, 0x82, 0xAC], "my-func", &ids);
        assert_eq!(record.log_events[0].message, "\u{fffd}\u{fffd}\u{20ac}");
    }

    #[test]
    fn test_each_record_gets_a_fresh_id() {
        let ids = FixedIdentifierSource::at(0);
        let first = build_log_record(b"a", "my-func", &ids);
        let second = build_log_record(b"a", "my-func", &ids);
        assert_ne!(first.log_events[0].id, second.log_events[0].id);
    }

    #[test]
    fn test_serialized_field_names() {
        let ids = FixedIdentifierSource::at(7);
        let record = build_log_record(b"hi", "my-func", &ids);
        let json = serde_json::to_string(&record).expect("failed to serialize record");
        assert_eq!(
            json,
            r#"{"logEvents":[{"id":"event-0","message":"hi","timestamp":7}],"logGroup":"/aws/lambda/my-func","logStream":"","messageType":"","owner":""}"#
        );
    }
}
