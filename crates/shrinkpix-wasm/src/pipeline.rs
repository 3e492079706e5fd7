//! Compression pipeline bindings.
//!
//! # Example
//!
//! ```typescript
//! const pipeline = new JsImagePipeline({ quality: 0.7 });
//! slider.addEventListener('input', (e) => pipeline.set_slider_value(Number(e.target.value)));
//!
//! try {
//!   const report = pipeline.process(batch);
//!   for (let i = 0; i < report.result_count; i++) renderCard(report.result(i));
//!   for (const failure of report.failures()) renderFailure(failure);
//! } catch (message) {
//!   alert(message); // "Please select a maximum of 10 files."
//! }
//! ```

use js_sys::Function;
use shrinkpix_core::{
    compress, BatchError, CompressionResult, CompressionSettings, FileHandle, ImageFailure,
    ImagePipeline, ResultSink,
};
use wasm_bindgen::prelude::*;

use crate::batch::JsImageBatch;
use crate::types::{FailureRecord, JsCompressionResult, PipelineOptions};

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Compression pipeline plus the quality and size settings the page controls.
#[wasm_bindgen]
pub struct JsImagePipeline {
    pipeline: ImagePipeline,
    settings: CompressionSettings,
}

#[wasm_bindgen]
impl JsImagePipeline {
    /// Create a pipeline from an optional options object
    /// (`{ maxFiles, quality, maxWidth, maxHeight, filter }`).
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<JsImagePipeline, JsValue> {
        let options: PipelineOptions = if options.is_undefined() || options.is_null() {
            PipelineOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options)?
        };
        Self::from_options(options).map_err(to_js_error)
    }

    /// Current quality factor (0.0 to 1.0)
    #[wasm_bindgen(getter)]
    pub fn quality(&self) -> f32 {
        self.settings.quality
    }

    /// Current quality as a 0-100 slider position
    #[wasm_bindgen(getter)]
    pub fn slider_value(&self) -> u8 {
        self.settings.slider_value()
    }

    #[wasm_bindgen(getter)]
    pub fn max_files(&self) -> usize {
        self.pipeline.max_files()
    }

    /// Update quality from the slider (`value / 100`). Values above 100 count as 100.
    pub fn set_slider_value(&mut self, value: u8) {
        self.settings = self.settings.with_slider_value(value);
    }

    /// Set the quality factor directly.
    pub fn set_quality(&mut self, quality: f32) -> Result<(), JsValue> {
        let settings = CompressionSettings {
            quality,
            ..self.settings
        };
        settings.validate().map_err(to_js_error)?;
        self.settings = settings;
        Ok(())
    }

    /// Change the output size caps.
    pub fn set_max_dimensions(&mut self, max_width: u32, max_height: u32) -> Result<(), JsValue> {
        let settings = self.settings.with_max_dimensions(max_width, max_height);
        settings.validate().map_err(to_js_error)?;
        self.settings = settings;
        Ok(())
    }

    /// Compress every file in `batch`.
    ///
    /// Throws the user-facing message if the batch has too many files; in
    /// that case nothing is compressed. Individual failures end up in
    /// `failures()` of the returned report.
    pub fn process(&self, batch: JsImageBatch) -> Result<JsBatchReport, JsValue> {
        self.run_batch(batch.into_files(), &mut ()).map_err(to_js_error)
    }

    /// Like `process`, but also calls `on_result(result)` or
    /// `on_failure({ fileName, kind, message })` as each image finishes.
    pub fn process_with(
        &self,
        batch: JsImageBatch,
        on_result: &Function,
        on_failure: &Function,
    ) -> Result<JsBatchReport, JsValue> {
        let mut sink = CallbackSink {
            on_result,
            on_failure,
            error: None,
        };
        let report = self
            .run_batch(batch.into_files(), &mut sink)
            .map_err(to_js_error)?;
        match sink.error {
            Some(err) => Err(err),
            None => Ok(report),
        }
    }

    /// Compress a single file with the current settings.
    pub fn compress_one(
        &self,
        name: String,
        mime_type: String,
        bytes: Vec<u8>,
    ) -> Result<JsCompressionResult, JsValue> {
        let file = FileHandle::new(name, mime_type, bytes);
        compress(&file, &self.settings)
            .map(JsCompressionResult::from)
            .map_err(to_js_error)
    }
}

impl JsImagePipeline {
    pub(crate) fn from_options(
        options: PipelineOptions,
    ) -> Result<Self, shrinkpix_core::SettingsError> {
        let settings = options.settings();
        settings.validate()?;
        Ok(Self {
            pipeline: ImagePipeline::new(options.max_files),
            settings,
        })
    }

    pub(crate) fn run_batch<K: ResultSink + ?Sized>(
        &self,
        files: Vec<FileHandle>,
        sink: &mut K,
    ) -> Result<JsBatchReport, BatchError> {
        let (results, failures) = self
            .pipeline
            .process_batch(files, self.settings, sink)?
            .into_parts();
        Ok(JsBatchReport {
            results,
            failures: failures.iter().map(FailureRecord::from).collect(),
        })
    }
}

/// Forwards outcomes to JavaScript callbacks. The first callback error is
/// kept and returned once the batch is done.
struct CallbackSink<'a> {
    on_result: &'a Function,
    on_failure: &'a Function,
    error: Option<JsValue>,
}

impl CallbackSink<'_> {
    fn record(&mut self, outcome: Result<JsValue, JsValue>) {
        if let Err(err) = outcome {
            self.error.get_or_insert(err);
        }
    }
}

impl ResultSink for CallbackSink<'_> {
    fn on_result(&mut self, result: &CompressionResult) {
        let value: JsValue = JsCompressionResult::from(result.clone()).into();
        let outcome = self.on_result.call1(&JsValue::NULL, &value);
        self.record(outcome);
    }

    fn on_failure(&mut self, failure: &ImageFailure) {
        let outcome = serde_wasm_bindgen::to_value(&FailureRecord::from(failure))
            .map_err(JsValue::from)
            .and_then(|value| self.on_failure.call1(&JsValue::NULL, &value));
        self.record(outcome);
    }
}

/// Outcome of one processed batch.
#[wasm_bindgen]
pub struct JsBatchReport {
    results: Vec<CompressionResult>,
    failures: Vec<FailureRecord>,
}

#[wasm_bindgen]
impl JsBatchReport {
    #[wasm_bindgen(getter)]
    pub fn result_count(&self) -> usize {
        self.results.len()
    }

    #[wasm_bindgen(getter)]
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Get the result at `index`, or `undefined` when out of range.
    pub fn result(&self, index: usize) -> Option<JsCompressionResult> {
        self.results.get(index).cloned().map(JsCompressionResult::from)
    }

    /// Failed images as `{ fileName, kind, message }` objects.
    pub fn failures(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.failures).map_err(JsValue::from)
    }
}
