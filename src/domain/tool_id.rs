/// Fallback tool identifier for empty or hostile input.
pub const UNKNOWN_TOOL: &str = "unknown";

/// Substrings that disqualify a raw tool name outright (case-insensitive).
/// Same denylist strategy as session ids; the substitute differs.
const DENYLIST: [&str; 12] = [
    "..", "/", "\\", "drop", "delete", "insert", "select", "union", "--", ";", "<", ">",
];

const MAX_LEN: usize = 100;

/// A validated tool identifier.
///
/// Unlike [`super::SessionId`], a tool id carries no uniqueness requirement,
/// so hostile or empty input collapses to the literal `"unknown"` instead of
/// a generated value, and overlong survivors are truncated rather than
/// replaced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ToolId(String);

impl ToolId {
    pub fn validate(raw: Option<&str>) -> Self {
        let raw = match raw {
            Some(r) if !r.is_empty() => r,
            _ => return Self::unknown(),
        };

        let lowered = raw.to_lowercase();
        if DENYLIST.iter().any(|token| lowered.contains(token)) {
            return Self::unknown();
        }

        let mut stripped: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .collect();
        if stripped.is_empty() {
            return Self::unknown();
        }
        stripped.truncate(MAX_LEN);

        ToolId(stripped)
    }

    pub fn unknown() -> Self {
        ToolId(UNKNOWN_TOOL.to_string())
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_TOOL
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ToolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
