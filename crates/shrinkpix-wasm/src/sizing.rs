//! Size helpers exposed for the page's own labels and previews.

use shrinkpix_core::{decode, format};
use wasm_bindgen::prelude::*;

/// Convert a JavaScript number of bytes to `u64`, treating junk as zero.
fn byte_count(bytes: f64) -> u64 {
    if bytes.is_finite() && bytes > 0.0 {
        bytes as u64
    } else {
        0
    }
}

/// Format a byte count as `"0 Bytes"`, `"1.5 KB"`, `"3.2 MB"` and so on.
#[wasm_bindgen]
pub fn format_byte_size(bytes: f64) -> String {
    format::format_byte_size(byte_count(bytes))
}

/// Percentage saved going from `original` to `compressed` bytes.
#[wasm_bindgen]
pub fn savings_percent(original: f64, compressed: f64) -> f64 {
    format::savings_percent(byte_count(original), byte_count(compressed)) as f64
}

/// Output dimensions for an image of `width` x `height` under the caps,
/// returned as `[width, height]`.
#[wasm_bindgen]
pub fn compute_target_size(width: u32, height: u32, max_width: u32, max_height: u32) -> Vec<u32> {
    let (w, h) = decode::compute_target_size(width, height, max_width, max_height);
    vec![w, h]
}
