//! JPEG/PNG decoding with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader, RgbImage};

use super::{DecodeError, DecodedImage, InputFormat, Orientation};

/// Detect whether `bytes` hold one of the supported input formats.
///
/// Detection is by content, not by the declared MIME type or file name.
pub fn detect_format(bytes: &[u8]) -> Option<InputFormat> {
    match image::guess_format(bytes).ok()? {
        image::ImageFormat::Jpeg => Some(InputFormat::Jpeg),
        image::ImageFormat::Png => Some(InputFormat::Png),
        _ => None,
    }
}

/// Decode a JPEG or PNG image from bytes into RGB pixels.
///
/// EXIF orientation is applied so the pixels come out the way a browser
/// would display them. Transparent pixels are composited onto black, which
/// matches what a canvas does when it is exported as JPEG.
///
/// # Errors
///
/// Returns `DecodeError::UnsupportedFormat` if the bytes are neither JPEG nor PNG.
/// Returns `DecodeError::CorruptedFile` if the image data is corrupted.
/// Returns `DecodeError::EmptyImage` if the image has zero width or height.
pub fn decode_image(bytes: &[u8]) -> Result<(DecodedImage, InputFormat), DecodeError> {
    let format = detect_format(bytes).ok_or(DecodeError::UnsupportedFormat)?;
    let orientation = extract_orientation(bytes);

    let img = ImageReader::with_format(Cursor::new(bytes), format.to_image_format())
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if img.width() == 0 || img.height() == 0 {
        return Err(DecodeError::EmptyImage);
    }

    let oriented = apply_orientation(img, orientation);
    let rgb = flatten_onto_black(oriented);

    Ok((DecodedImage::from_rgb_image(rgb), format))
}

/// Extract EXIF orientation from the image container.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

fn flatten_onto_black(img: DynamicImage) -> RgbImage {
    if !img.color().has_alpha() {
        return img.into_rgb8();
    }

    let rgba = img.into_rgba8();
    let (width, height) = rgba.dimensions();
    let mut pixels = Vec::with_capacity((width as usize) * (height as usize) * 3);
    for px in rgba.pixels() {
        let [r, g, b, a] = px.0;
        let a = a as u32;
        pixels.push(((r as u32 * a + 127) / 255) as u8);
        pixels.push(((g as u32 * a + 127) / 255) as u8);
        pixels.push(((b as u32 * a + 127) / 255) as u8);
    }

    RgbImage::from_raw(width, height, pixels).unwrap_or_else(|| RgbImage::new(width, height))
}
