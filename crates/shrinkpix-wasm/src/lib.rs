//! Shrinkpix WASM - WebAssembly bindings for the shrinkpix compressor
//!
//! This crate exposes the shrinkpix-core pipeline to the browser page that
//! hosts the upload area, quality slider and results list.
//!
//! # Module Structure
//!
//! - `batch` - Building a batch from picked or dropped files
//! - `pipeline` - Compressing batches and single files
//! - `types` - Result wrapper and options object
//! - `download` - Blob URL download trigger
//! - `sizing` - Size formatting and target-size helpers
//! - `logging` - Console backend for the `log` crate
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsImageBatch, JsImagePipeline } from '@shrinkpix/wasm';
//!
//! await init();
//!
//! const pipeline = new JsImagePipeline();
//! const batch = new JsImageBatch();
//! for (const file of input.files) {
//!   batch.add(file.name, file.type, new Uint8Array(await file.arrayBuffer()));
//! }
//! const report = pipeline.process(batch);
//! console.log(`${report.result_count} compressed, ${report.failure_count} failed`);
//! ```

use wasm_bindgen::prelude::*;

mod batch;
mod download;
mod logging;
mod pipeline;
mod sizing;
mod types;

// Re-export public types
pub use batch::JsImageBatch;
pub use logging::set_log_level;
pub use pipeline::{JsBatchReport, JsImagePipeline};
pub use sizing::{compute_target_size, format_byte_size, savings_percent};
pub use types::JsCompressionResult;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logging::install(logging::default_level());
    log::info!("shrinkpix {} ready", version());
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
