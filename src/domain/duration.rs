use serde_json::Value;

use crate::protocol::RawEvent;

/// Upper bound on a single recorded duration: one hour in milliseconds.
pub const MAX_DURATION_MS: i64 = 3_600_000;

/// Derive an execution duration in milliseconds from a hook event.
///
/// Field priority: `execution_time` (seconds) → `duration_ms` (milliseconds)
/// → `duration` (seconds). Values may arrive as JSON numbers or numeric
/// strings. The result is clamped to `[0, 3_600_000]`. Anything non-numeric
/// or missing yields `None` — absence, not zero, so summaries don't count
/// phantom instant events.
pub fn execution_duration(event: &RawEvent) -> Option<i64> {
    if let Some(seconds) = numeric(event.execution_time.as_ref()) {
        return Some(clamp_ms(seconds * 1000.0));
    }
    if let Some(ms) = numeric(event.duration_ms.as_ref()) {
        return Some(clamp_ms(ms));
    }
    if let Some(seconds) = numeric(event.duration.as_ref()) {
        return Some(clamp_ms(seconds * 1000.0));
    }
    None
}

fn numeric(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn clamp_ms(ms: f64) -> i64 {
    if !ms.is_finite() {
        return 0;
    }
    (ms as i64).clamp(0, MAX_DURATION_MS)
}
