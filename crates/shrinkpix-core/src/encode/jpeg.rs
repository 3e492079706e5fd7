//! JPEG encoding for compressed output.
//!
//! This module provides JPEG encoding using the `image` crate's JPEG encoder.
//! Quality is expressed either as a 1-100 integer or as a 0.0-1.0 factor, the
//! same scale a canvas `toBlob` call takes.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;
use thiserror::Error;

/// MIME type of every compressed payload.
pub const OUTPUT_MIME_TYPE: &str = "image/jpeg";

/// Errors that can occur during JPEG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// JPEG encoding failed
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),

    /// The encoder finished without producing any bytes
    #[error("JPEG encoder produced no output")]
    EmptyOutput,
}

/// Map a 0.0-1.0 quality factor onto the encoder's 1-100 scale.
///
/// Non-finite factors map to the lowest quality.
pub fn quality_from_factor(factor: f32) -> u8 {
    if !factor.is_finite() {
        return 1;
    }
    (factor.clamp(0.0, 1.0) * 100.0).round().clamp(1.0, 100.0) as u8
}

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
///
/// # Errors
///
/// Returns `EncodeError::EmptyOutput` if the encoder reports success but
/// writes nothing; callers must treat that as a failure.
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let quality = quality.clamp(1, 100);

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);

    encoder
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    let bytes = buffer.into_inner();
    if bytes.is_empty() {
        return Err(EncodeError::EmptyOutput);
    }

    Ok(bytes)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
