use crate::error::{SqueezeError, Result};
use crate::input::InputImage;
use crate::naming::generate_file_name;
use crate::processing::{
    target_dimensions, CompressedResult, CompressionParameters, ImageCrateCodec, RasterCodec,
};
use image::GenericImageView;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task;

/// Where the orchestrator is in its single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionState {
    Idle,
    Decoding,
    Resizing,
    Encoding,
    /// The last request ended in an error. A new request may start.
    Failed,
}

impl CompressionState {
    pub fn is_running(&self) -> bool {
        matches!(
            self,
            CompressionState::Decoding | CompressionState::Resizing | CompressionState::Encoding
        )
    }
}

impl fmt::Display for CompressionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CompressionState::Idle => "idle",
            CompressionState::Decoding => "decoding",
            CompressionState::Resizing => "resizing",
            CompressionState::Encoding => "encoding",
            CompressionState::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

fn lock_state(state: &Mutex<CompressionState>) -> MutexGuard<'_, CompressionState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Token for the one request allowed in flight.
///
/// Dropping it without `finish` marks the orchestrator `Failed`, which also
/// covers panics in the codec and futures dropped mid-way.
struct InFlight<'a> {
    state: &'a Mutex<CompressionState>,
    finished: bool,
}

impl<'a> InFlight<'a> {
    fn begin(state: &'a Mutex<CompressionState>) -> Result<Self> {
        let mut current = lock_state(state);
        if current.is_running() {
            return Err(SqueezeError::CompressionInProgress);
        }
        *current = CompressionState::Decoding;
        crate::verbose!("compression state: {}", CompressionState::Decoding);

        Ok(Self {
            state,
            finished: false,
        })
    }

    fn advance(&self, next: CompressionState) {
        *lock_state(self.state) = next;
        crate::verbose!("compression state: {}", next);
    }

    fn finish(mut self) {
        self.finished = true;
        self.advance(CompressionState::Idle);
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.advance(CompressionState::Failed);
        }
    }
}

/// Runs one compression at a time: decode, resize, encode.
///
/// All codec work happens on tokio's blocking pool. Only one request may
/// be in flight; a second `compress` call while one is running is rejected
/// with `SqueezeError::CompressionInProgress` rather than queued.
pub struct CompressionOrchestrator {
    codec: Arc<dyn RasterCodec>,
    state: Mutex<CompressionState>,
}

impl Default for CompressionOrchestrator {
    fn default() -> Self {
        Self::new(Arc::new(ImageCrateCodec::default()))
    }
}

impl CompressionOrchestrator {
    pub fn new(codec: Arc<dyn RasterCodec>) -> Self {
        Self {
            codec,
            state: Mutex::new(CompressionState::Idle),
        }
    }

    pub fn state(&self) -> CompressionState {
        *lock_state(&self.state)
    }

    /// Re-encode `image` as JPEG with the given parameters.
    ///
    /// # Returns
    /// * `Err(SqueezeError::NoInput)` when `image` is `None`; state is untouched
    /// * `Err(SqueezeError::CompressionInProgress)` when another request is running
    /// * `Err(SqueezeError::Decode)` / `Err(SqueezeError::Encode)` from the codec
    pub async fn compress(
        &self,
        image: Option<InputImage>,
        params: CompressionParameters,
    ) -> Result<CompressedResult> {
        let image = image.ok_or(SqueezeError::NoInput)?;
        let flight = InFlight::begin(&self.state)?;

        crate::verbose!(
            "compressing {} ({}, {} bytes) at quality {}%, scale {}%",
            image.name(),
            image.mime_type(),
            image.len(),
            params.quality,
            params.scale
        );

        let bytes = image.shared_bytes();
        let decoded = self.offload(move |codec| codec.decode(&bytes)).await?;

        let (source_width, source_height) = decoded.dimensions();
        let (width, height) =
            target_dimensions(source_width, source_height, params.scale_fraction())?;
        crate::verbose!(
            "resizing {}x{} -> {}x{}",
            source_width,
            source_height,
            width,
            height
        );

        flight.advance(CompressionState::Resizing);
        let raster = self
            .offload(move |codec| codec.resize(&decoded, width, height))
            .await?;

        flight.advance(CompressionState::Encoding);
        let quality = params.quality_fraction();
        let jpeg = self
            .offload(move |codec| codec.encode_jpeg(&raster, quality))
            .await?;

        flight.finish();
        Ok(CompressedResult::new(
            generate_file_name(),
            jpeg,
            width,
            height,
        ))
    }

    async fn offload<T, F>(&self, work: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn RasterCodec) -> Result<T> + Send + 'static,
    {
        let codec = Arc::clone(&self.codec);
        task::spawn_blocking(move || work(codec.as_ref())).await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat};
    use std::io::Cursor;

    fn png_input(width: u32, height: u32) -> InputImage {
        let mut buf = Vec::new();
        DynamicImage::new_rgb8(width, height)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        InputImage::from_bytes("test.png", buf)
    }

    #[test]
    fn test_state_is_running() {
        assert!(!CompressionState::Idle.is_running());
        assert!(CompressionState::Decoding.is_running());
        assert!(CompressionState::Resizing.is_running());
        assert!(CompressionState::Encoding.is_running());
        assert!(!CompressionState::Failed.is_running());
    }

    #[tokio::test]
    async fn test_compress_without_input() {
        let orchestrator = CompressionOrchestrator::default();
        let result = orchestrator
            .compress(None, CompressionParameters::default())
            .await;

        assert!(matches!(result, Err(SqueezeError::NoInput)));
        assert_eq!(orchestrator.state(), CompressionState::Idle);
    }

    #[tokio::test]
    async fn test_compress_scales_and_returns_to_idle() {
        let orchestrator = CompressionOrchestrator::default();
        let params = CompressionParameters::new(Some(70), Some(25)).unwrap();

        let result = orchestrator
            .compress(Some(png_input(80, 40)), params)
            .await
            .unwrap();

        assert_eq!(result.dimensions(), (20, 10));
        assert!(result.file_name().starts_with("compressed_"));
        assert_eq!(orchestrator.state(), CompressionState::Idle);
    }

    #[tokio::test]
    async fn test_decode_failure_marks_failed_and_recovers() {
        let orchestrator = CompressionOrchestrator::default();
        let garbage = InputImage::from_bytes("broken.jpg", b"not really a jpeg".to_vec());

        let result = orchestrator
            .compress(Some(garbage), CompressionParameters::default())
            .await;
        assert!(matches!(result, Err(SqueezeError::Decode(_))));
        assert_eq!(orchestrator.state(), CompressionState::Failed);

        let result = orchestrator
            .compress(Some(png_input(8, 8)), CompressionParameters::default())
            .await;
        assert!(result.is_ok());
        assert_eq!(orchestrator.state(), CompressionState::Idle);
    }
}
