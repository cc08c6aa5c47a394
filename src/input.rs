use crate::constants::{MAX_FILE_SIZE, UNKNOWN_MIME_TYPE};
use crate::error::{SqueezeError, Result};
use crate::utils::validate_file_exists;
use std::path::Path;
use std::sync::Arc;

/// The currently selected source file.
///
/// Bytes are shared, so cloning an `InputImage` is cheap and yields a
/// snapshot that later selections cannot touch.
#[derive(Debug, Clone)]
pub struct InputImage {
    name: String,
    mime_type: &'static str,
    bytes: Arc<[u8]>,
}

impl InputImage {
    /// Wrap raw bytes, sniffing the MIME type from the magic number.
    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        let bytes = bytes.into();
        let mime_type = image::guess_format(&bytes)
            .map(|format| format.to_mime_type())
            .unwrap_or(UNKNOWN_MIME_TYPE);

        Self {
            name: name.into(),
            mime_type,
            bytes,
        }
    }

    /// Read a file into memory.
    ///
    /// # Returns
    /// * `Err(SqueezeError::FileNotFound)` if the path does not exist
    /// * `Err(SqueezeError::FileTooLarge)` if the file exceeds `MAX_FILE_SIZE`
    pub async fn load(path: &Path) -> Result<Self> {
        validate_file_exists(path)?;

        let file_size = tokio::fs::metadata(path).await?.len();
        if file_size > MAX_FILE_SIZE {
            return Err(SqueezeError::FileTooLarge(file_size, MAX_FILE_SIZE));
        }

        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self::from_bytes(name, bytes))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn shared_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }
}
