use crate::download::{DownloadLink, DownloadSlot};
use crate::error::Result;
use crate::input::InputImage;
use crate::orchestrator::CompressionOrchestrator;
use crate::preview::Preview;
use crate::processing::CompressionParameters;
use crate::size::{estimate_size, format_size};

/// Everything a front end binds to: the selected file, the two controls and
/// the current download.
///
/// The session owns no UI handles. A front end calls `select` on file drop,
/// the setters on slider moves and reads the labels back for display.
#[derive(Default)]
pub struct Session {
    orchestrator: CompressionOrchestrator,
    downloads: DownloadSlot,
    input: Option<InputImage>,
    params: CompressionParameters,
}

impl Session {
    pub fn new(orchestrator: CompressionOrchestrator, downloads: DownloadSlot) -> Self {
        Self {
            orchestrator,
            downloads,
            input: None,
            params: CompressionParameters::default(),
        }
    }

    /// Replace the current selection.
    pub fn select(&mut self, image: InputImage) {
        crate::verbose!("selected {} ({} bytes)", image.name(), image.len());
        self.input = Some(image);
    }

    pub fn input(&self) -> Option<&InputImage> {
        self.input.as_ref()
    }

    pub fn params(&self) -> CompressionParameters {
        self.params
    }

    pub fn set_quality(&mut self, quality: u8) -> Result<()> {
        self.params = CompressionParameters::new(Some(quality), Some(self.params.scale))?;
        Ok(())
    }

    pub fn set_scale(&mut self, scale: u32) -> Result<()> {
        self.params = CompressionParameters::new(Some(self.params.quality), Some(scale))?;
        Ok(())
    }

    pub fn orchestrator(&self) -> &CompressionOrchestrator {
        &self.orchestrator
    }

    pub fn downloads(&self) -> &DownloadSlot {
        &self.downloads
    }

    /// Preview of the current selection; `None` until a file is selected.
    pub fn preview(&self) -> Option<Preview> {
        self.input.as_ref().map(Preview::of)
    }

    pub fn original_size_label(&self) -> Option<String> {
        self.input.as_ref().map(|image| format_size(image.len()))
    }

    /// `None` until a file is selected.
    pub fn estimated_size(&self) -> Option<u64> {
        self.input
            .as_ref()
            .map(|image| estimate_size(image.len(), self.params.quality))
    }

    pub fn estimated_size_label(&self) -> Option<String> {
        self.estimated_size().map(format_size)
    }

    /// Compress the current selection and publish it for download.
    ///
    /// Input and parameters are captured before the first suspension point;
    /// selecting another file or moving a control afterwards does not
    /// affect this request.
    pub async fn compress(&self) -> Result<DownloadLink> {
        let image = self.input.clone();
        let params = self.params;

        let result = self.orchestrator.compress(image, params).await?;
        Ok(self.downloads.publish(result))
    }
}
