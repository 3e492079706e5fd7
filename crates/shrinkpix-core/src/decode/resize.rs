//! Downscaling to fit inside a bounding box.

use super::{DecodedImage, FilterType};

/// Compute output dimensions that fit within `max_width` x `max_height`.
///
/// Images already inside both caps keep their size. Larger images are
/// scaled by `min(max_width / width, max_height / height)`, which keeps the
/// aspect ratio and never upscales. Scaled dimensions are rounded to the
/// nearest pixel and never drop below 1.
pub fn compute_target_size(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width <= max_width && height <= max_height {
        return (width, height);
    }

    let ratio = (max_width as f64 / width as f64)
        .min(max_height as f64 / height as f64)
        .min(1.0);

    let scale = |dim: u32, cap: u32| -> u32 {
        let scaled = (dim as f64 * ratio).round() as u32;
        scaled.min(cap).max(1)
    };

    (scale(width, max_width), scale(height, max_height))
}

/// Resize an image so it fits within the given caps.
///
/// Returns a clone when the image already fits.
pub fn resize_to_fit(
    image: &DecodedImage,
    max_width: u32,
    max_height: u32,
    filter: FilterType,
) -> DecodedImage {
    let (width, height) = compute_target_size(image.width, image.height, max_width, max_height);

    if width == image.width && height == image.height {
        return image.clone();
    }

    match image.as_rgb_view() {
        Some(view) => DecodedImage::from_rgb_image(image::imageops::resize(
            &view,
            width,
            height,
            filter.to_image_filter(),
        )),
        None => image.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8);
                pixels.push(((y * 255) / height.max(1)) as u8);
                pixels.push(128);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_target_size_within_caps_unchanged() {
        assert_eq!(compute_target_size(800, 600, 1920, 1080), (800, 600));
        assert_eq!(compute_target_size(1920, 1080, 1920, 1080), (1920, 1080));
    }

    #[test]
    fn test_target_size_landscape_height_bound() {
        // min(1920/3000, 1080/2000) = min(0.64, 0.54) = 0.54
        assert_eq!(compute_target_size(3000, 2000, 1920, 1080), (1620, 1080));
    }

    #[test]
    fn test_target_size_wide_width_bound() {
        assert_eq!(compute_target_size(4000, 1000, 1920, 1080), (1920, 480));
    }

    #[test]
    fn test_target_size_portrait() {
        assert_eq!(compute_target_size(1000, 3000, 1920, 1080), (360, 1080));
    }

    #[test]
    fn test_target_size_one_cap_exceeded() {
        assert_eq!(compute_target_size(2000, 500, 1920, 1080), (1920, 480));
    }

    #[test]
    fn test_target_size_extreme_ratio_keeps_one_pixel() {
        assert_eq!(compute_target_size(100_000, 1, 1920, 1080), (1920, 1));
    }

    #[test]
    fn test_target_size_zero_input() {
        assert_eq!(compute_target_size(0, 0, 1920, 1080), (0, 0));
    }

    #[test]
    fn test_resize_to_fit_downscales() {
        let img = create_test_image(300, 200);
        let resized = resize_to_fit(&img, 192, 108, FilterType::Bilinear);
        assert_eq!((resized.width, resized.height), (162, 108));
        assert_eq!(resized.pixels.len(), 162 * 108 * 3);
    }

    #[test]
    fn test_resize_to_fit_small_image_untouched() {
        let img = create_test_image(100, 50);
        let resized = resize_to_fit(&img, 1920, 1080, FilterType::Lanczos3);
        assert_eq!((resized.width, resized.height), (100, 50));
        assert_eq!(resized.pixels, img.pixels);
    }

    #[test]
    fn test_all_filter_types() {
        let img = create_test_image(100, 50);
        for filter in [FilterType::Nearest, FilterType::Bilinear, FilterType::Lanczos3] {
            let resized = resize_to_fit(&img, 50, 50, filter);
            assert_eq!((resized.width, resized.height), (50, 25));
        }
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
