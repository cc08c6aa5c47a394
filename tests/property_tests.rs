use jpeg_squeeze::naming::file_name_from;
use jpeg_squeeze::{estimate_size, format_size, target_dimensions, CompressionParameters};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

proptest! {
    #[test]
    fn format_size_whole_bytes_below_one_kb(bytes in 0u64..1024) {
        prop_assert_eq!(format_size(bytes), format!("{} B", bytes));
    }

    #[test]
    fn format_size_kb_range(bytes in 1024u64..1024 * 1024) {
        let formatted = format_size(bytes);
        prop_assert!(formatted.ends_with(" KB"));
        let value: f64 = formatted.trim_end_matches(" KB").parse().unwrap();
        prop_assert!((value - bytes as f64 / 1024.0).abs() <= 0.0051);
    }

    #[test]
    fn format_size_mb_from_one_mb_up(bytes in 1024u64 * 1024..u64::MAX / 2) {
        let formatted = format_size(bytes);
        prop_assert!(formatted.ends_with(" MB"));
        let (number, _) = formatted.split_once(' ').unwrap();
        let (_, decimals) = number.split_once('.').unwrap();
        prop_assert_eq!(decimals.len(), 2);
    }

    #[test]
    fn estimate_size_bounds(input in 0u64..=u64::MAX / 4, quality in 0u8..=100) {
        let estimate = estimate_size(input, quality);
        prop_assert!(estimate <= input);
        prop_assert_eq!(estimate_size(input, 100), input);
        prop_assert_eq!(estimate_size(input, 0), 0);
    }

    #[test]
    fn estimate_size_monotonic_in_quality(input in 0u64..1_000_000_000, q in 0u8..100) {
        prop_assert!(estimate_size(input, q) <= estimate_size(input, q + 1));
    }

    #[test]
    fn compression_parameters_range(quality in 0u8..=255, scale in 0u32..2000) {
        let result = CompressionParameters::new(Some(quality), Some(scale));
        let valid = quality <= 100 && (1..=1000).contains(&scale);
        prop_assert_eq!(result.is_ok(), valid);
    }

    #[test]
    fn target_dimensions_floor_and_clamp(
        width in 1u32..=4000,
        height in 1u32..=4000,
        scale in 1u32..=100
    ) {
        let fraction = f64::from(scale) / 100.0;
        let (w, h) = target_dimensions(width, height, fraction).unwrap();

        prop_assert!(w >= 1 && h >= 1);
        prop_assert!(w <= width && h <= height);
        prop_assert_eq!(w, ((f64::from(width) * fraction).floor() as u32).max(1));
        prop_assert_eq!(h, ((f64::from(height) * fraction).floor() as u32).max(1));
    }

    #[test]
    fn target_dimensions_identity_at_full_scale(width in 1u32..=16384, height in 1u32..=16384) {
        prop_assert_eq!(target_dimensions(width, height, 1.0).unwrap(), (width, height));
    }

    #[test]
    fn file_names_have_fixed_shape(millis in 0u128..4_000_000_000_000, seed in any::<u64>()) {
        let name = file_name_from(millis, &mut StdRng::seed_from_u64(seed));
        let prefix = format!("compressed_{}_", millis);

        prop_assert!(name.starts_with(&prefix));
        prop_assert!(name.ends_with(".jpg"));
        let suffix: u32 = name[prefix.len()..name.len() - 4].parse().unwrap();
        prop_assert!(suffix < 100_000);
    }
}
