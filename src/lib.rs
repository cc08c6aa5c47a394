pub mod cli;
pub mod constants;
pub mod download;
pub mod error;
pub mod input;
pub mod logger;
pub mod naming;
pub mod orchestrator;
pub mod preview;
pub mod processing;
pub mod session;
pub mod size;
pub mod utils;

pub use download::{DownloadLink, DownloadSlot};
pub use error::{Result, SqueezeError};
pub use input::InputImage;
pub use naming::generate_file_name;
pub use orchestrator::{CompressionOrchestrator, CompressionState};
pub use preview::Preview;
pub use processing::{
    target_dimensions, CompressedResult, CompressionParameters, ImageCrateCodec, RasterCodec,
};
pub use session::Session;
pub use size::{estimate_size, format_size};
