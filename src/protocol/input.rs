use serde::Deserialize;
use serde_json::Value;

/// Upper bound on a stdin payload: 1 MiB.
pub const MAX_JSON_SIZE: usize = 1024 * 1024;

/// The raw event received from Claude Code on stdin.
///
/// Unlike a typed protocol struct, every field here is optional: the input
/// is untrusted and arbitrarily shaped, and validation happens downstream in
/// `domain` — deserialization itself must not be the place an event dies.
/// Legacy camelCase field names (`hookType`, `toolName`) are accepted as
/// aliases; unknown fields are ignored for forward compatibility.
///
/// The duration-bearing fields are kept as raw JSON values because hosts
/// have been observed sending them as numbers *and* as numeric strings;
/// coercion lives in [`crate::domain::execution_duration`].
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawEvent {
    pub session_id: Option<String>,
    #[serde(alias = "hookType")]
    pub hook_event_name: Option<String>,
    #[serde(alias = "toolName")]
    pub tool_name: Option<String>,
    pub tool_input: Option<Value>,
    pub prompt: Option<Value>,
    pub cwd: Option<String>,
    pub transcript_path: Option<String>,
    pub execution_time: Option<Value>,
    pub duration_ms: Option<Value>,
    pub duration: Option<Value>,
}

impl RawEvent {
    /// Parse a stdin payload. `Err` only on malformed JSON or a non-object
    /// top level; a well-formed object with none of the known fields is
    /// still a valid (if useless) event.
    pub fn parse(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }
}
