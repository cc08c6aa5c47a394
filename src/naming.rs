use crate::constants::{NAME_SUFFIX_RANGE, OUTPUT_EXTENSION, OUTPUT_NAME_PREFIX};
use rand::Rng;
use std::time::{SystemTime, UNIX_EPOCH};

/// Generate an output file name of the form `compressed_<epoch-ms>_<n>.jpg`.
///
/// The random suffix only keeps two downloads from the same session from
/// overwriting each other. It is not unique in any strong sense and must not
/// be used where unpredictability matters.
pub fn generate_file_name() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    file_name_from(millis, &mut rand::thread_rng())
}

pub fn file_name_from<R: Rng + ?Sized>(epoch_millis: u128, rng: &mut R) -> String {
    let suffix = rng.gen_range(0..NAME_SUFFIX_RANGE);
    format!(
        "{}{}_{}.{}",
        OUTPUT_NAME_PREFIX, epoch_millis, suffix, OUTPUT_EXTENSION
    )
}
