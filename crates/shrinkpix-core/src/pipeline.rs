//! The decode -> resize -> encode pipeline and batch processing.
//!
//! Each image is an independent unit of work: it either yields a
//! [`CompressionResult`] or an [`ImageFailure`], and a failure never stops
//! the rest of the batch. Only an oversized batch is rejected as a whole.

use log::{debug, info, warn};
use thiserror::Error;

use crate::batch::{select_batch, BatchError, ImageSource};
use crate::decode::{self, DecodeError, DecodedImage, InputFormat};
use crate::download::{download_name, DownloadArtifact};
use crate::encode::{self, EncodeError, OUTPUT_MIME_TYPE};
use crate::format::{format_byte_size, savings_percent};
use crate::settings::{CompressionSettings, SettingsError, DEFAULT_MAX_FILES};

/// Per-image failure reasons.
#[derive(Debug, Error)]
pub enum CompressError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

impl CompressError {
    /// Short, stable label for the failure category.
    pub fn kind(&self) -> &'static str {
        match self {
            CompressError::Decode(_) => "decode",
            CompressError::Encode(_) => "encode",
            CompressError::Settings(_) => "settings",
        }
    }
}

/// A decoded input image.
#[derive(Debug, Clone)]
pub struct SourceImage {
    name: String,
    byte_size: u64,
    format: InputFormat,
    image: DecodedImage,
}

impl SourceImage {
    /// Decode the bytes behind an input handle.
    pub fn decode<S: ImageSource + ?Sized>(source: &S) -> Result<Self, DecodeError> {
        let (image, format) = decode::decode_image(source.bytes())?;
        debug!(
            "decoded {} ({:?}, {}x{}, {} bytes)",
            source.name(),
            format,
            image.width,
            image.height,
            source.byte_size()
        );
        Ok(Self {
            name: source.name().to_string(),
            byte_size: source.byte_size(),
            format,
            image,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn byte_size(&self) -> u64 {
        self.byte_size
    }

    pub fn format(&self) -> InputFormat {
        self.format
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.image.width, self.image.height)
    }
}

/// Outcome of compressing one image.
///
/// Sizes and savings are derived from the original size and the payload on
/// every call; nothing else is stored.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionResult {
    file_name: String,
    original_size: u64,
    original_dimensions: (u32, u32),
    output_dimensions: (u32, u32),
    bytes: Vec<u8>,
}

impl CompressionResult {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn original_size(&self) -> u64 {
        self.original_size
    }

    pub fn compressed_size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn savings_percent(&self) -> i64 {
        savings_percent(self.original_size, self.compressed_size())
    }

    pub fn original_dimensions(&self) -> (u32, u32) {
        self.original_dimensions
    }

    pub fn output_dimensions(&self) -> (u32, u32) {
        self.output_dimensions
    }

    /// Compressed JPEG payload.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime_type(&self) -> &'static str {
        OUTPUT_MIME_TYPE
    }

    pub fn download_name(&self) -> String {
        download_name(&self.file_name)
    }

    /// Give up the payload as a downloadable file.
    pub fn into_artifact(self) -> DownloadArtifact {
        DownloadArtifact {
            file_name: download_name(&self.file_name),
            mime_type: OUTPUT_MIME_TYPE,
            bytes: self.bytes,
        }
    }
}

/// A single image that could not be compressed.
#[derive(Debug, Error)]
#[error("{file_name}: {error}")]
pub struct ImageFailure {
    pub file_name: String,
    #[source]
    pub error: CompressError,
}

pub type ImageOutcome = Result<CompressionResult, ImageFailure>;

/// Receives outcomes as each image finishes.
pub trait ResultSink {
    fn on_result(&mut self, result: &CompressionResult);
    fn on_failure(&mut self, failure: &ImageFailure);
}

/// Discards everything; the returned [`BatchReport`] still has all outcomes.
impl ResultSink for () {
    fn on_result(&mut self, _result: &CompressionResult) {}
    fn on_failure(&mut self, _failure: &ImageFailure) {}
}

/// Everything that happened to one accepted batch, in processing order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<ImageOutcome>,
}

impl BatchReport {
    pub fn results(&self) -> impl Iterator<Item = &CompressionResult> {
        self.outcomes.iter().filter_map(|o| o.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &ImageFailure> {
        self.outcomes.iter().filter_map(|o| o.as_ref().err())
    }

    pub fn success_count(&self) -> usize {
        self.results().count()
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    /// Split into successful results and failures.
    pub fn into_parts(self) -> (Vec<CompressionResult>, Vec<ImageFailure>) {
        let mut results = Vec::new();
        let mut failures = Vec::new();
        for outcome in self.outcomes {
            match outcome {
                Ok(result) => results.push(result),
                Err(failure) => failures.push(failure),
            }
        }
        (results, failures)
    }
}

/// Resize and re-encode an already decoded image.
///
/// # Errors
///
/// Returns `CompressError::Settings` for unusable settings and
/// `CompressError::Encode` if the encoder fails or writes nothing.
pub fn compress_decoded(
    source: &SourceImage,
    settings: &CompressionSettings,
) -> Result<CompressionResult, CompressError> {
    settings.validate()?;

    let resized = decode::resize_to_fit(
        &source.image,
        settings.max_width,
        settings.max_height,
        settings.filter,
    );
    debug!(
        "{}: {}x{} -> {}x{}",
        source.name, source.image.width, source.image.height, resized.width, resized.height
    );

    let quality = encode::quality_from_factor(settings.quality);
    let bytes = encode::encode_jpeg(&resized.pixels, resized.width, resized.height, quality)?;
    debug!(
        "{}: encoded at quality {} to {}",
        source.name,
        quality,
        format_byte_size(bytes.len() as u64)
    );

    Ok(CompressionResult {
        file_name: source.name.clone(),
        original_size: source.byte_size,
        original_dimensions: source.dimensions(),
        output_dimensions: (resized.width, resized.height),
        bytes,
    })
}

/// Decode, resize and re-encode one input file.
pub fn compress<S: ImageSource + ?Sized>(
    source: &S,
    settings: &CompressionSettings,
) -> Result<CompressionResult, CompressError> {
    settings.validate()?;
    let decoded = SourceImage::decode(source)?;
    compress_decoded(&decoded, settings)
}

/// Batch front end: admission check plus independent per-image processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImagePipeline {
    max_files: usize,
}

impl Default for ImagePipeline {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FILES)
    }
}

impl ImagePipeline {
    pub fn new(max_files: usize) -> Self {
        Self { max_files }
    }

    pub fn max_files(&self) -> usize {
        self.max_files
    }

    /// Reject batches larger than the configured maximum.
    pub fn select_batch<S>(&self, files: Vec<S>) -> Result<Vec<S>, BatchError> {
        select_batch(files, self.max_files).inspect_err(|e| warn!("batch rejected: {e}"))
    }

    /// Compress every file of an accepted batch.
    ///
    /// `settings` is taken by value so the whole batch runs against the
    /// values current at the time of the call. The sink sees exactly one
    /// `on_result` or `on_failure` per file.
    ///
    /// # Errors
    ///
    /// Returns `BatchError::TooLarge` without touching any file or the sink
    /// when the batch exceeds `max_files`.
    pub fn process_batch<S, K>(
        &self,
        files: Vec<S>,
        settings: CompressionSettings,
        sink: &mut K,
    ) -> Result<BatchReport, BatchError>
    where
        S: ImageSource,
        K: ResultSink + ?Sized,
    {
        let files = self.select_batch(files)?;
        let mut report = BatchReport {
            outcomes: Vec::with_capacity(files.len()),
        };

        for file in &files {
            let outcome = compress(file, &settings).map_err(|error| ImageFailure {
                file_name: file.name().to_string(),
                error,
            });

            match &outcome {
                Ok(result) => sink.on_result(result),
                Err(failure) => {
                    warn!("failed to compress {failure}");
                    sink.on_failure(failure);
                }
            }
            report.outcomes.push(outcome);
        }

        info!(
            "batch done: {} compressed, {} failed",
            report.success_count(),
            report.failure_count()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::FileHandle;
    use image::codecs::jpeg::JpegEncoder;
    use image::codecs::png::PngEncoder;
    use image::{ExtendedColorType, ImageEncoder};

    fn gradient(width: u32, height: u32) -> Vec<u8> {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push((x * 255 / width) as u8);
                pixels.push((y * 255 / height) as u8);
                pixels.push(((x * y) % 256) as u8);
            }
        }
        pixels
    }

    fn jpeg_file(name: &str, width: u32, height: u32) -> FileHandle {
        let mut bytes = Vec::new();
        JpegEncoder::new_with_quality(&mut bytes, 95)
            .write_image(&gradient(width, height), width, height, ExtendedColorType::Rgb8)
            .unwrap();
        FileHandle::new(name, "image/jpeg", bytes)
    }

    fn png_file(name: &str, width: u32, height: u32) -> FileHandle {
        let mut bytes = Vec::new();
        PngEncoder::new(&mut bytes)
            .write_image(&gradient(width, height), width, height, ExtendedColorType::Rgb8)
            .unwrap();
        FileHandle::new(name, "image/png", bytes)
    }

    #[derive(Default)]
    struct RecordingSink {
        results: Vec<String>,
        failures: Vec<(String, &'static str)>,
    }

    impl ResultSink for RecordingSink {
        fn on_result(&mut self, result: &CompressionResult) {
            self.results.push(result.file_name().to_string());
        }

        fn on_failure(&mut self, failure: &ImageFailure) {
            self.failures
                .push((failure.file_name.clone(), failure.error.kind()));
        }
    }

    #[test]
    fn test_compress_small_jpeg_keeps_dimensions() {
        let file = jpeg_file("small.jpg", 64, 48);
        let result = compress(&file, &CompressionSettings::default()).unwrap();

        assert_eq!(result.file_name(), "small.jpg");
        assert_eq!(result.original_dimensions(), (64, 48));
        assert_eq!(result.output_dimensions(), (64, 48));
        assert_eq!(result.original_size(), file.bytes.len() as u64);
        assert_eq!(&result.bytes()[0..2], &[0xFF, 0xD8]);
        assert_eq!(result.mime_type(), "image/jpeg");
    }

    #[test]
    fn test_compress_downscales_to_caps() {
        let file = png_file("big.png", 300, 200);
        let settings = CompressionSettings::default().with_max_dimensions(192, 108);
        let result = compress(&file, &settings).unwrap();

        assert_eq!(result.original_dimensions(), (300, 200));
        assert_eq!(result.output_dimensions(), (162, 108));

        let decoded = image::load_from_memory(result.bytes()).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (162, 108));
    }

    #[test]
    fn test_compressed_size_and_savings_derive_from_payload() {
        let file = png_file("photo.png", 80, 60);
        let result = compress(&file, &CompressionSettings::default()).unwrap();

        assert_eq!(result.compressed_size(), result.bytes().len() as u64);
        assert_eq!(
            result.savings_percent(),
            savings_percent(result.original_size(), result.compressed_size())
        );
    }

    #[test]
    fn test_lower_quality_produces_smaller_output() {
        let file = png_file("q.png", 120, 90);
        let low = compress(&file, &CompressionSettings::default().with_slider_value(10)).unwrap();
        let high = compress(&file, &CompressionSettings::default().with_slider_value(100)).unwrap();
        assert!(low.compressed_size() < high.compressed_size());
    }

    #[test]
    fn test_compress_undecodable_is_decode_error() {
        let file = FileHandle::new("broken.jpg", "image/jpeg", vec![0xFF, 0xD8, 0xFF, 0x00]);
        let err = compress(&file, &CompressionSettings::default()).unwrap_err();
        assert!(matches!(err, CompressError::Decode(_)));
        assert_eq!(err.kind(), "decode");
    }

    #[test]
    fn test_compress_invalid_settings() {
        let file = jpeg_file("a.jpg", 8, 8);
        let mut settings = CompressionSettings::default();
        settings.quality = 3.0;
        let err = compress(&file, &settings).unwrap_err();
        assert!(matches!(err, CompressError::Settings(_)));
    }

    #[test]
    fn test_encoder_failure_is_reported() {
        // Pixel buffer that does not match the dimensions makes the encoder refuse
        let source = SourceImage {
            name: "odd.png".to_string(),
            byte_size: 10,
            format: InputFormat::Png,
            image: DecodedImage {
                width: 4,
                height: 4,
                pixels: vec![0u8; 5],
            },
        };
        let err = compress_decoded(&source, &CompressionSettings::default()).unwrap_err();
        assert!(matches!(err, CompressError::Encode(_)));
        assert_eq!(err.kind(), "encode");
    }

    #[test]
    fn test_into_artifact() {
        let file = jpeg_file("holiday.jpg", 16, 16);
        let result = compress(&file, &CompressionSettings::default()).unwrap();
        let size = result.compressed_size() as usize;

        assert_eq!(result.download_name(), "compressed_holiday.jpg");
        let artifact = result.into_artifact();
        assert_eq!(artifact.file_name, "compressed_holiday.jpg");
        assert_eq!(artifact.mime_type, "image/jpeg");
        assert_eq!(artifact.len(), size);
    }

    #[test]
    fn test_source_image_decode() {
        let file = png_file("s.png", 10, 20);
        let source = SourceImage::decode(&file).unwrap();
        assert_eq!(source.name(), "s.png");
        assert_eq!(source.format(), InputFormat::Png);
        assert_eq!(source.dimensions(), (10, 20));
        assert_eq!(source.byte_size(), file.bytes.len() as u64);
    }

    #[test]
    fn test_batch_too_large_produces_no_results() {
        let files: Vec<FileHandle> = (0..11).map(|i| jpeg_file(&format!("{i}.jpg"), 8, 8)).collect();
        let mut sink = RecordingSink::default();

        let err = ImagePipeline::default()
            .process_batch(files, CompressionSettings::default(), &mut sink)
            .unwrap_err();

        assert_eq!(err, BatchError::TooLarge { count: 11, max: 10 });
        assert!(sink.results.is_empty());
        assert!(sink.failures.is_empty());
    }

    #[test]
    fn test_batch_one_bad_file_does_not_stop_others() {
        let mut files: Vec<FileHandle> = (0..9)
            .map(|i| {
                if i % 2 == 0 {
                    jpeg_file(&format!("{i}.jpg"), 24, 16)
                } else {
                    png_file(&format!("{i}.png"), 16, 24)
                }
            })
            .collect();
        files.insert(4, FileHandle::new("corrupt.png", "image/png", b"not an image".to_vec()));
        let mut sink = RecordingSink::default();

        let report = ImagePipeline::default()
            .process_batch(files, CompressionSettings::default(), &mut sink)
            .unwrap();

        assert_eq!(report.outcomes.len(), 10);
        assert_eq!(report.success_count(), 9);
        assert_eq!(report.failure_count(), 1);

        let failure = report.failures().next().unwrap();
        assert_eq!(failure.file_name, "corrupt.png");
        assert!(matches!(failure.error, CompressError::Decode(_)));

        assert_eq!(sink.results.len(), 9);
        assert_eq!(sink.failures, vec![("corrupt.png".to_string(), "decode")]);
    }

    #[test]
    fn test_batch_report_into_parts() {
        let files = vec![
            jpeg_file("a.jpg", 8, 8),
            FileHandle::new("b.jpg", "image/jpeg", vec![]),
        ];
        let report = ImagePipeline::new(2)
            .process_batch(files, CompressionSettings::default(), &mut ())
            .unwrap();

        let (results, failures) = report.into_parts();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].file_name(), "a.jpg");
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].file_name, "b.jpg");
    }

    #[test]
    fn test_batch_uses_settings_given_at_call() {
        let files = vec![png_file("wide.png", 200, 100)];
        let settings = CompressionSettings::default().with_max_dimensions(50, 50);

        let report = ImagePipeline::default()
            .process_batch(files, settings, &mut ())
            .unwrap();

        let result = report.results().next().unwrap();
        assert_eq!(result.output_dimensions(), (50, 25));
    }

    #[test]
    fn test_image_failure_display() {
        let failure = ImageFailure {
            file_name: "x.png".to_string(),
            error: CompressError::Decode(DecodeError::UnsupportedFormat),
        };
        assert_eq!(failure.to_string(), "x.png: Invalid or unsupported image format");
    }
}
