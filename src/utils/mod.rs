//! Utility functions

pub mod encoding;
pub mod format;
pub mod paths;

pub use encoding::{decode_bytes, read_lines};
pub use format::{format_float, format_with_commas};
pub use paths::normalize_path;
