pub mod category;
pub mod duration;
pub mod redact;
pub mod session_id;
pub mod tool_id;

pub use category::HookCategory;
pub use duration::execution_duration;
pub use redact::{sanitize_for_logging, sanitize_text};
pub use session_id::SessionId;
pub use tool_id::ToolId;
