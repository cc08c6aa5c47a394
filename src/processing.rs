use crate::constants::{
    DEFAULT_QUALITY, DEFAULT_SCALE_PERCENT, MAX_IMAGE_DIMENSION, MAX_QUALITY, MAX_SCALE_PERCENT,
    MIN_QUALITY, MIN_SCALE_PERCENT, OUTPUT_MIME_TYPE,
};
use crate::error::{SqueezeError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use std::fs;
use std::path::{Path, PathBuf};

/// Quality and scale, both as percentages, as the user set them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionParameters {
    pub quality: u8,
    pub scale: u32,
}

impl Default for CompressionParameters {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            scale: DEFAULT_SCALE_PERCENT,
        }
    }
}

impl CompressionParameters {
    pub fn new(quality: Option<u8>, scale: Option<u32>) -> Result<Self> {
        let quality = quality.unwrap_or(DEFAULT_QUALITY);
        if !(MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
            return Err(SqueezeError::InvalidQuality(quality));
        }

        let scale = scale.unwrap_or(DEFAULT_SCALE_PERCENT);
        if !(MIN_SCALE_PERCENT..=MAX_SCALE_PERCENT).contains(&scale) {
            return Err(SqueezeError::InvalidScale(scale));
        }

        Ok(Self { quality, scale })
    }

    /// Quality as the 0.0-1.0 fraction handed to the encoder
    pub fn quality_fraction(&self) -> f32 {
        f32::from(self.quality) / 100.0
    }

    /// Multiplier applied to both width and height
    pub fn scale_fraction(&self) -> f64 {
        f64::from(self.scale) / 100.0
    }
}

/// Compute the output raster size for a source of `width` x `height`.
///
/// Each side is `floor(side * scale)`, clamped to at least one pixel so a
/// tiny scale never yields an empty raster.
///
/// # Returns
/// * `Err(SqueezeError::InvalidDimensions)` if a side would exceed `MAX_IMAGE_DIMENSION`
pub fn target_dimensions(width: u32, height: u32, scale: f64) -> Result<(u32, u32)> {
    let scale_side = |side: u32| -> f64 { (f64::from(side) * scale).floor().max(1.0) };
    let (w, h) = (scale_side(width), scale_side(height));

    let max = f64::from(MAX_IMAGE_DIMENSION);
    if w > max || h > max {
        return Err(SqueezeError::InvalidDimensions(
            w.min(f64::from(u32::MAX)) as u32,
            h.min(f64::from(u32::MAX)) as u32,
            MAX_IMAGE_DIMENSION,
        ));
    }

    Ok((w as u32, h as u32))
}

/// The decode / resample / encode facility.
///
/// The orchestrator treats this as a black box and runs every call on the
/// blocking pool, so implementations may be slow but must be thread safe.
pub trait RasterCodec: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<DynamicImage>;

    fn resize(&self, image: &DynamicImage, width: u32, height: u32) -> Result<DynamicImage>;

    /// Encode as JPEG. `quality` is a fraction in 0.0-1.0.
    fn encode_jpeg(&self, image: &DynamicImage, quality: f32) -> Result<Vec<u8>>;
}

/// `RasterCodec` backed by the `image` crate
#[derive(Debug, Clone, Copy)]
pub struct ImageCrateCodec {
    filter: FilterType,
}

impl Default for ImageCrateCodec {
    fn default() -> Self {
        Self {
            filter: FilterType::Triangle,
        }
    }
}

impl ImageCrateCodec {
    pub fn with_filter(filter: FilterType) -> Self {
        Self { filter }
    }
}

impl RasterCodec for ImageCrateCodec {
    fn decode(&self, bytes: &[u8]) -> Result<DynamicImage> {
        let img = image::load_from_memory(bytes).map_err(SqueezeError::Decode)?;

        let (width, height) = img.dimensions();
        if width > MAX_IMAGE_DIMENSION || height > MAX_IMAGE_DIMENSION {
            return Err(SqueezeError::InvalidDimensions(
                width,
                height,
                MAX_IMAGE_DIMENSION,
            ));
        }

        Ok(img)
    }

    fn resize(&self, image: &DynamicImage, width: u32, height: u32) -> Result<DynamicImage> {
        if image.dimensions() == (width, height) {
            return Ok(image.clone());
        }
        Ok(image.resize_exact(width, height, self.filter))
    }

    fn encode_jpeg(&self, image: &DynamicImage, quality: f32) -> Result<Vec<u8>> {
        let quality = jpeg_quality(quality);
        // JPEG has no alpha channel; flatten to RGB first.
        let rgb = image.to_rgb8();

        let mut buf = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality);
        encoder.encode_image(&rgb).map_err(SqueezeError::Encode)?;
        Ok(buf)
    }
}

/// Map a 0.0-1.0 fraction onto the 1-100 range the JPEG encoder accepts.
fn jpeg_quality(fraction: f32) -> u8 {
    let percent = (fraction.clamp(0.0, 1.0) * 100.0).round() as u8;
    percent.max(1)
}

/// A finished JPEG ready to hand to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedResult {
    file_name: String,
    bytes: Vec<u8>,
    width: u32,
    height: u32,
}

impl CompressedResult {
    pub fn new(file_name: String, bytes: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            file_name,
            bytes,
            width,
            height,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn mime_type(&self) -> &'static str {
        OUTPUT_MIME_TYPE
    }

    /// Write the JPEG into `dir` under its generated name, creating `dir`
    /// when needed.
    pub fn save_to(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)
            .map_err(|_| SqueezeError::DirectoryCreationFailed(dir.to_path_buf()))?;

        let path = dir.join(&self.file_name);
        fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}
