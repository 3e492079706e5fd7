//! Shrinkpix Core - image compression library
//!
//! This crate provides the pipeline behind the shrinkpix compressor:
//! decoding JPEG/PNG input, downscaling to fit a bounding box, re-encoding
//! as JPEG at a chosen quality, and reporting size savings.
//!
//! # Module Structure
//!
//! - `batch` - Input handles and batch admission
//! - `decode` - Decoding, orientation and resizing
//! - `encode` - JPEG encoding
//! - `pipeline` - Per-image compression and batch processing
//! - `settings` - Compression settings and defaults
//! - `format` - Size and savings formatting for display
//! - `download` - Download naming and payloads

pub mod batch;
pub mod decode;
pub mod download;
pub mod encode;
pub mod format;
pub mod pipeline;
pub mod settings;

pub use batch::{
    filter_dropped, is_supported_mime, select_batch, BatchError, FileHandle, ImageSource,
};
pub use decode::compute_target_size;
pub use download::DownloadArtifact;
pub use format::{format_byte_size, savings_percent};
pub use pipeline::{
    compress, compress_decoded, BatchReport, CompressError, CompressionResult, ImageFailure,
    ImageOutcome, ImagePipeline, ResultSink, SourceImage,
};
pub use settings::{
    CompressionSettings, SettingsError, DEFAULT_MAX_FILES, DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH,
    DEFAULT_QUALITY,
};
