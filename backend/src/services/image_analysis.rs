//! Pixel colour statistics for leaf photos

use shared::ColorProfile;

/// Upper bound on pixels inspected per image
pub const MAX_SAMPLED_PIXELS: usize = 1000;

/// Decode an image and count leaf-relevant colours over evenly strided pixels
pub fn color_profile(image_bytes: &[u8]) -> Result<ColorProfile, image::ImageError> {
    let rgb = image::load_from_memory(image_bytes)?.to_rgb8();
    let (width, height) = rgb.dimensions();

    let mut profile = ColorProfile {
        width,
        height,
        ..ColorProfile::default()
    };

    let total = width as usize * height as usize;
    if total == 0 {
        return Ok(profile);
    }

    let sample_size = total.min(MAX_SAMPLED_PIXELS);
    let stride = (total / sample_size).max(1);
    for pixel in rgb.pixels().step_by(stride).take(sample_size) {
        profile.record(pixel.0);
    }

    Ok(profile)
}
