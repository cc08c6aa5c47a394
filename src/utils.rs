//! Helpers shared by the library and the CLI front end

use crate::constants::{
    COMPRESSED_SIZE_PREFIX, COMPRESSION_RATIO_PREFIX, PROGRESS_SPINNER_TEMPLATE, SUCCESS_PREFIX,
};
use crate::error::{SqueezeError, Result};
use crate::logger::OutputLevel;
use crate::size::{compression_ratio, format_size};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Validate that a file exists and return a descriptive error if not
///
/// # Returns
/// * `Ok(())` if file exists, `Err(SqueezeError::FileNotFound)` otherwise
pub fn validate_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(SqueezeError::FileNotFound(path.to_path_buf()));
    }
    Ok(())
}

/// Create a progress spinner with consistent styling.
///
/// Returns a hidden spinner in quiet mode so callers never have to branch.
pub fn create_progress_spinner(message: &str) -> ProgressBar {
    if crate::logger::level() == OutputLevel::Quiet {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template(PROGRESS_SPINNER_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

/// Print compression result with formatted output
pub fn print_compression_result(original_size: u64, compressed_size: u64) {
    let ratio = compression_ratio(original_size, compressed_size);

    crate::info!(
        "{} {} ({} bytes)",
        COMPRESSED_SIZE_PREFIX,
        format_size(compressed_size),
        compressed_size
    );
    crate::info!("{} {:.1}%", COMPRESSION_RATIO_PREFIX, ratio);

    if ratio > 0.0 {
        crate::info!("{} Reduced file size by {:.1}%", SUCCESS_PREFIX, ratio);
    } else {
        crate::warn!("File size increased by {:.1}%", ratio.abs());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_file_exists() {
        let result = validate_file_exists(Path::new("/nonexistent/file.jpg"));
        assert!(matches!(result, Err(SqueezeError::FileNotFound(_))));
    }

    #[test]
    fn test_validate_file_exists_ok() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        assert!(validate_file_exists(temp.path()).is_ok());
    }
}
