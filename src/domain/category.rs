/// The closed set of hook lifecycle categories this monitor records.
///
/// Anything outside the set maps to [`HookCategory::Unknown`] — category
/// validation is total and never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookCategory {
    PreToolUse,
    PostToolUse,
    UserPromptSubmit,
    Stop,
    FilterMatch,
    Unknown,
}

const ALL: [HookCategory; 5] = [
    HookCategory::PreToolUse,
    HookCategory::PostToolUse,
    HookCategory::UserPromptSubmit,
    HookCategory::Stop,
    HookCategory::FilterMatch,
];

impl HookCategory {
    /// Validate a raw category string against the closed set.
    ///
    /// Exact names win. A value merely *prefixed* by an allowed name (e.g.
    /// `"PreToolUseV2"`) still maps to that member — older Claude Code
    /// builds appended suffixes to event names, and the first matching
    /// prefix in declaration order decides the bucket. Everything else is
    /// `Unknown`.
    pub fn validate(raw: &str) -> Self {
        for category in ALL {
            if raw == category.as_str() {
                return category;
            }
        }
        for category in ALL {
            if raw.starts_with(category.as_str()) {
                return category;
            }
        }
        HookCategory::Unknown
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HookCategory::PreToolUse => "PreToolUse",
            HookCategory::PostToolUse => "PostToolUse",
            HookCategory::UserPromptSubmit => "UserPromptSubmit",
            HookCategory::Stop => "Stop",
            HookCategory::FilterMatch => "FilterMatch",
            HookCategory::Unknown => "Unknown",
        }
    }

    /// Whether events of this category are persisted to the activity log.
    ///
    /// `Stop` triggers summary/cleanup instead of a row; `Unknown` is
    /// dropped; `FilterMatch` rows are only ever written by the monitor
    /// itself, never accepted from stdin.
    pub fn is_recordable(&self) -> bool {
        matches!(
            self,
            HookCategory::PreToolUse | HookCategory::PostToolUse | HookCategory::UserPromptSubmit
        )
    }
}

impl std::fmt::Display for HookCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
