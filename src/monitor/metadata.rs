use serde_json::{json, Map, Value};

use crate::domain::{sanitize_for_logging, sanitize_text, HookCategory, ToolId};
use crate::protocol::RawEvent;

/// Length bounds for sanitized snippets kept in event metadata.
const PROMPT_SNIPPET_LEN: usize = 50;
const COMMAND_SNIPPET_LEN: usize = 100;
const PATH_LEN: usize = 200;

/// Sanitized event metadata: the JSON blob persisted with the activity row,
/// plus the numeric measurements the filter evaluator needs.
#[derive(Debug)]
pub struct Metadata {
    pub blob: Map<String, Value>,
    pub input_size: u64,
    pub prompt_character_count: u64,
}

impl Metadata {
    pub fn to_json(&self) -> String {
        Value::Object(self.blob.clone()).to_string()
    }
}

/// Extract and sanitize what is worth keeping from an event.
///
/// Every free-text value passes through redaction before it lands in the
/// blob; raw `tool_input` and raw prompts are never stored.
pub fn extract_metadata(
    event: &RawEvent,
    category: HookCategory,
    tool: &ToolId,
    timestamp: &str,
) -> Metadata {
    let mut blob = Map::new();
    blob.insert("hook_category".into(), json!(category.as_str()));
    blob.insert("tool_identifier".into(), json!(tool.as_str()));

    let mut input_size = 0u64;
    let mut prompt_character_count = 0u64;

    match category {
        HookCategory::UserPromptSubmit => {
            if let Some(prompt) = &event.prompt {
                let text = prompt_text(prompt);
                prompt_character_count = text.chars().count() as u64;
                blob.insert(
                    "prompt_character_count".into(),
                    json!(prompt_character_count),
                );
                blob.insert(
                    "prompt_snippet".into(),
                    json!(sanitize_text(&text, PROMPT_SNIPPET_LEN)),
                );
            }
            if let Some(transcript) = &event.transcript_path {
                blob.insert(
                    "transcript_location".into(),
                    json!(sanitize_text(transcript, PATH_LEN)),
                );
            }
            if let Some(cwd) = &event.cwd {
                blob.insert("working_path".into(), json!(sanitize_text(cwd, PATH_LEN)));
            }
        }
        HookCategory::PreToolUse | HookCategory::PostToolUse => {
            if let Some(input) = &event.tool_input {
                input_size = input.to_string().len() as u64;
                blob.insert("input_size".into(), json!(input_size));

                if let Some(command) = input.get("command") {
                    blob.insert(
                        "command_snippet".into(),
                        json!(sanitize_for_logging(command, COMMAND_SNIPPET_LEN)),
                    );
                }
                if let Some(file_path) = input.get("file_path").and_then(Value::as_str) {
                    let path = std::path::Path::new(file_path);
                    if let Some(ext) = path.extension() {
                        blob.insert(
                            "file_extension".into(),
                            json!(format!(".{}", ext.to_string_lossy())),
                        );
                    }
                    if let Some(name) = path.file_name() {
                        blob.insert(
                            "target_file".into(),
                            json!(sanitize_text(&name.to_string_lossy(), PATH_LEN)),
                        );
                    }
                }
            }
        }
        _ => {}
    }

    blob.insert("event_timestamp".into(), json!(timestamp));

    Metadata {
        blob,
        input_size,
        prompt_character_count,
    }
}

fn prompt_text(prompt: &Value) -> String {
    match prompt {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
