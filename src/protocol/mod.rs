pub mod input;

pub use input::{RawEvent, MAX_JSON_SIZE};
