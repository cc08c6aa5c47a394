use crate::error::{SqueezeError, Result};
use crate::input::InputImage;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::ImageReader;
use std::io::Cursor;

/// What a front end shows for the selected file before compressing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub mime_type: &'static str,
    /// `None` when the header could not be read
    pub dimensions: Option<(u32, u32)>,
    pub data_url: String,
}

impl Preview {
    pub fn of(image: &InputImage) -> Self {
        let dimensions = match header_dimensions(image.bytes()) {
            Ok(dims) => Some(dims),
            Err(e) => {
                crate::verbose!("no dimensions for {}: {}", image.name(), e);
                None
            }
        };

        Self {
            mime_type: image.mime_type(),
            dimensions,
            data_url: data_url(image.mime_type(), image.bytes()),
        }
    }
}

/// `data:<mime>;base64,<payload>`
pub fn data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, BASE64.encode(bytes))
}

/// Width and height from the image header, without decoding pixels.
pub fn header_dimensions(bytes: &[u8]) -> Result<(u32, u32)> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .into_dimensions()
        .map_err(SqueezeError::Decode)
}
