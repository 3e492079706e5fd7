//! Image decoding for the compression pipeline.
//!
//! This module provides functionality for:
//! - Decoding JPEG and PNG images into RGB pixels
//! - Applying EXIF orientation the way a browser displays it
//! - Computing bounded output dimensions and downscaling
//!
//! All operations are synchronous and single-threaded.
//!
//! # Examples
//!
//! ```ignore
//! use shrinkpix_core::decode::{decode_image, compute_target_size};
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let (image, _format) = decode_image(&bytes).unwrap();
//! let (w, h) = compute_target_size(image.width, image.height, 1920, 1080);
//! ```

mod raster;
mod resize;
mod types;

pub use raster::{decode_image, detect_format};
pub use resize::{compute_target_size, resize_to_fit};
pub use types::{DecodeError, DecodedImage, FilterType, InputFormat, Orientation};
