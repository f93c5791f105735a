use uuid::Uuid;

/// Substrings that disqualify a raw session id outright (case-insensitive).
///
/// Path traversal tokens, SQL keywords, and markup sequences. A hit means
/// the value was crafted, not mistyped, so the whole input is discarded
/// rather than stripped.
const DENYLIST: [&str; 12] = [
    "..", "/", "\\", "drop", "delete", "insert", "select", "union", "--", ";", "<", ">",
];

const MIN_LEN: usize = 5;
const MAX_LEN: usize = 100;

/// A validated session identifier, safe to embed in SQL parameters, file
/// names, and log lines.
///
/// Construction is total: hostile or unusable input is replaced with a
/// freshly generated UUID, never rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Validate a raw session id from the hook event.
    ///
    /// - denylist substring hit (case-insensitive) → fresh UUID
    /// - otherwise strip to `[A-Za-z0-9_-]`
    /// - stripped length outside [5, 100] → fresh UUID
    pub fn validate(raw: Option<&str>) -> Self {
        let raw = match raw {
            Some(r) => r,
            None => return Self::generated(),
        };

        let lowered = raw.to_lowercase();
        if DENYLIST.iter().any(|token| lowered.contains(token)) {
            return Self::generated();
        }

        let stripped: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .collect();
        if stripped.len() < MIN_LEN || stripped.len() > MAX_LEN {
            return Self::generated();
        }

        SessionId(stripped)
    }

    fn generated() -> Self {
        SessionId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
