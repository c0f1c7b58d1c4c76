pub mod extract;
pub mod select;

use anyhow::Result;
use serde::Serialize;
use std::path::Path;

/// Save a JSON report, creating the parent directory when needed
pub fn save_report<T: Serialize + ?Sized>(result: &T, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let content = serde_json::to_string_pretty(result)?;
    std::fs::write(output_path, content)?;
    Ok(())
}
