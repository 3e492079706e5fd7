//! Image encoding for the compression pipeline.
//!
//! Output is always JPEG; the quality factor is the only tuning knob.
//!
//! # Examples
//!
//! ```ignore
//! use shrinkpix_core::encode::{encode_jpeg, quality_from_factor};
//!
//! let pixels = vec![128u8; 100 * 100 * 3]; // Gray image
//! let jpeg_bytes = encode_jpeg(&pixels, 100, 100, quality_from_factor(0.7)).unwrap();
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

mod jpeg;

pub use jpeg::{encode_jpeg, quality_from_factor, EncodeError, OUTPUT_MIME_TYPE};
