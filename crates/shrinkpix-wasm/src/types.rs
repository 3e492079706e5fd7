//! WASM-compatible wrapper types for compression results and options.
//!
//! Sizes cross the boundary as `f64` so JavaScript sees plain numbers
//! instead of `BigInt`s.

use serde::{Deserialize, Serialize};
use shrinkpix_core::decode::FilterType;
use shrinkpix_core::{
    format_byte_size, CompressionResult, CompressionSettings, ImageFailure, DEFAULT_MAX_FILES,
    DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH, DEFAULT_QUALITY,
};
use wasm_bindgen::prelude::*;

use crate::download::trigger_download;

/// Options object accepted by the `JsImagePipeline` constructor.
///
/// Every field is optional on the JavaScript side:
///
/// ```typescript
/// new JsImagePipeline({ maxFiles: 10, quality: 0.7, maxWidth: 1920, maxHeight: 1080 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct PipelineOptions {
    pub max_files: usize,
    pub quality: f32,
    pub max_width: u32,
    pub max_height: u32,
    pub filter: FilterType,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            max_files: DEFAULT_MAX_FILES,
            quality: DEFAULT_QUALITY,
            max_width: DEFAULT_MAX_WIDTH,
            max_height: DEFAULT_MAX_HEIGHT,
            filter: FilterType::default(),
        }
    }
}

impl PipelineOptions {
    pub fn settings(&self) -> CompressionSettings {
        CompressionSettings {
            quality: self.quality,
            max_width: self.max_width,
            max_height: self.max_height,
            filter: self.filter,
        }
    }
}

/// Plain-object description of a failed image, for the results list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FailureRecord {
    pub file_name: String,
    pub kind: String,
    pub message: String,
}

impl From<&ImageFailure> for FailureRecord {
    fn from(failure: &ImageFailure) -> Self {
        Self {
            file_name: failure.file_name.clone(),
            kind: failure.error.kind().to_string(),
            message: failure.error.to_string(),
        }
    }
}

/// A compressed image as seen by the results renderer.
///
/// Holds the compressed payload in WASM memory until `download()` is called
/// or the object is freed.
#[wasm_bindgen]
pub struct JsCompressionResult {
    inner: CompressionResult,
}

#[wasm_bindgen]
impl JsCompressionResult {
    /// Original file name
    #[wasm_bindgen(getter)]
    pub fn file_name(&self) -> String {
        self.inner.file_name().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn original_size(&self) -> f64 {
        self.inner.original_size() as f64
    }

    #[wasm_bindgen(getter)]
    pub fn compressed_size(&self) -> f64 {
        self.inner.compressed_size() as f64
    }

    /// Original size formatted for display, e.g. `"2.4 MB"`
    #[wasm_bindgen(getter)]
    pub fn original_size_label(&self) -> String {
        format_byte_size(self.inner.original_size())
    }

    /// Compressed size formatted for display, e.g. `"312.5 KB"`
    #[wasm_bindgen(getter)]
    pub fn compressed_size_label(&self) -> String {
        format_byte_size(self.inner.compressed_size())
    }

    /// Percentage saved; negative if the output is larger than the input
    #[wasm_bindgen(getter)]
    pub fn savings_percent(&self) -> f64 {
        self.inner.savings_percent() as f64
    }

    #[wasm_bindgen(getter)]
    pub fn original_width(&self) -> u32 {
        self.inner.original_dimensions().0
    }

    #[wasm_bindgen(getter)]
    pub fn original_height(&self) -> u32 {
        self.inner.original_dimensions().1
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.output_dimensions().0
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.output_dimensions().1
    }

    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.inner.mime_type().to_string()
    }

    /// File name the download is saved under (`compressed_<original name>`)
    #[wasm_bindgen(getter)]
    pub fn download_name(&self) -> String {
        self.inner.download_name()
    }

    /// Returns the compressed JPEG as a Uint8Array.
    ///
    /// Note: This creates a copy of the payload.
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes().to_vec()
    }

    /// Save the compressed file through a temporary link.
    ///
    /// The object URL backing the link is revoked before this returns,
    /// whether or not the click succeeded.
    pub fn download(&self) -> Result<(), JsValue> {
        trigger_download(&self.inner.clone().into_artifact())
    }
}

impl From<CompressionResult> for JsCompressionResult {
    fn from(inner: CompressionResult) -> Self {
        Self { inner }
    }
}

#[cfg(test)]
impl JsCompressionResult {
    pub(crate) fn inner(&self) -> &CompressionResult {
        &self.inner
    }
}
