use crate::constants::{KIB, MAX_QUALITY, MIB};

/// Format a byte count for display.
///
/// Below 1 KB the count is shown as whole bytes, otherwise as KB or MB with
/// two decimals (e.g. "512 B", "1.50 KB", "3.25 MB").
pub fn format_size(bytes: u64) -> String {
    if bytes < KIB {
        format!("{} B", bytes)
    } else if bytes < MIB {
        format!("{:.2} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{:.2} MB", bytes as f64 / MIB as f64)
    }
}

/// Rough prediction of the encoded size: the input size scaled linearly by
/// the quality percentage.
///
/// This does not model how a JPEG encoder actually behaves and is only meant
/// as a hint next to the quality control. Real output can be much smaller or
/// larger. Quality above 100 is treated as 100. The result is rounded down
/// to whole bytes, so `estimate_size(1023, 50)` is 511.
pub fn estimate_size(input_len: u64, quality_percent: u8) -> u64 {
    let quality = u128::from(quality_percent.min(MAX_QUALITY));
    (u128::from(input_len) * quality / 100) as u64
}

/// Size reduction as a percentage (negative when the output grew)
pub fn compression_ratio(original_size: u64, compressed_size: u64) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    ((original_size as f64 - compressed_size as f64) / original_size as f64) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_thresholds() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1024), "1.00 KB");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(1024 * 1024 - 1), "1024.00 KB");
        assert_eq!(format_size(1024 * 1024), "1.00 MB");
        assert_eq!(format_size(5 * 1024 * 1024 + 512 * 1024), "5.50 MB");
    }

    #[test]
    fn test_format_size_never_switches_to_gb() {
        assert_eq!(format_size(2048 * 1024 * 1024), "2048.00 MB");
    }

    #[test]
    fn test_estimate_size() {
        assert_eq!(estimate_size(1_000_000, 50), 500_000);
        assert_eq!(estimate_size(12345, 100), 12345);
        assert_eq!(estimate_size(12345, 0), 0);
        assert_eq!(estimate_size(0, 80), 0);
        assert_eq!(estimate_size(999, 80), 799);
        assert_eq!(estimate_size(1023, 50), 511);
    }

    #[test]
    fn test_estimate_size_clamps_quality() {
        assert_eq!(estimate_size(1000, 250), 1000);
    }

    #[test]
    fn test_estimate_size_large_input() {
        assert_eq!(estimate_size(u64::MAX, 100), u64::MAX);
    }

    #[test]
    fn test_compression_ratio() {
        assert_eq!(compression_ratio(1000, 800), 20.0);
        assert_eq!(compression_ratio(1000, 1200), -20.0);
        assert_eq!(compression_ratio(1000, 1000), 0.0);
        assert_eq!(compression_ratio(0, 500), 0.0);
    }
}
