//! Names and writes the cleaned document and the report

use crate::error::Result;
use crate::input::file_detector::FileType;
use log::info;
use std::path::Path;
use tokio::fs;

const CLEANED_SUFFIX: &str = "_cleaned";
const REPORT_SUFFIX: &str = "_detection_report.txt";

/// Everything before the last '.', or the whole name when there is none.
fn base_name(original_name: &str) -> &str {
    match original_name.rfind('.') {
        Some(dot) => &original_name[..dot],
        None => original_name,
    }
}

/// `report.PDF` becomes `report_cleaned.pdf`.
pub fn cleaned_file_name(original_name: &str, file_type: FileType) -> String {
    format!("{}{}{}", base_name(original_name), CLEANED_SUFFIX, file_type.extension())
}

pub fn report_file_name(original_name: &str) -> String {
    format!("{}{}", base_name(original_name), REPORT_SUFFIX)
}

/// Write UTF-8 text, creating missing parent directories.
pub async fn save_to_file(content: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    fs::write(path, content).await?;
    info!("Wrote {}", path.display());
    Ok(())
}
