use chrono::Utc;
use uuid::Uuid;

/// Source of event identifiers and timestamps.
///
/// Implementations are shared between concurrent request builds, so they
/// must be reentrant and never block.
pub trait IdentifierSource: Send + Sync {
    /// A fresh identifier, never returned twice.
    fn unique_id(&self) -> String;

    /// Current time as milliseconds since the Unix epoch.
    fn timestamp_millis(&self) -> i64;
}

/// Random v4 UUIDs and the system clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemIdentifierSource;

impl IdentifierSource for SystemIdentifierSource {
    fn unique_id(&self) -> String {
        Uuid::new_v4().to_string()
    }

    fn timestamp_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}
