use std::time::Duration;

pub const DEFAULT_QUALITY: u8 = 80;
pub const MIN_QUALITY: u8 = 0;
pub const MAX_QUALITY: u8 = 100;

pub const DEFAULT_SCALE_PERCENT: u32 = 100;
pub const MIN_SCALE_PERCENT: u32 = 1;
pub const MAX_SCALE_PERCENT: u32 = 1000;

/// Maximum input file size in bytes (100MB)
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;
pub const MAX_IMAGE_DIMENSION: u32 = 16384;

pub const KIB: u64 = 1024;
pub const MIB: u64 = 1024 * 1024;

pub const OUTPUT_NAME_PREFIX: &str = "compressed_";
pub const OUTPUT_EXTENSION: &str = "jpg";
pub const OUTPUT_MIME_TYPE: &str = "image/jpeg";
pub const UNKNOWN_MIME_TYPE: &str = "application/octet-stream";
pub const NAME_SUFFIX_RANGE: u32 = 100_000;

/// How long a published result stays downloadable when nothing supersedes it
pub const DEFAULT_DOWNLOAD_TTL: Duration = Duration::from_secs(60);

pub const PROGRESS_SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";

// Common output message prefixes
pub const ORIGINAL_SIZE_PREFIX: &str = "📊 Original size:";
pub const ESTIMATED_SIZE_PREFIX: &str = "🔮 Estimated size:";
pub const COMPRESSED_SIZE_PREFIX: &str = "📈 Compressed size:";
pub const COMPRESSION_RATIO_PREFIX: &str = "🎯 Compression ratio:";
pub const SUCCESS_PREFIX: &str = "✅";
pub const WARNING_PREFIX: &str = "⚠️ ";
pub const ERROR_PREFIX: &str = "❌";
pub const VERBOSE_PREFIX: &str = "🔍";
