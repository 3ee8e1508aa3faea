//! Path normalization

use std::path::Path;

/// Render a path with forward slashes for logs and reports.
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
