// ============================================================
// Layer 4 — Image Variants
// ============================================================
// The fixed set of deterministic transforms applied to every
// subset image. Variants are deliberately NOT random — the
// augmented dataset must be identical across runs so results
// stay comparable.
//
// Variant order is part of the output contract: records appear
// in the subset as original, rotated_90, flipped_horizontal,
// brightened — in that order, always.
//
// Reference: image crate documentation

use image::{DynamicImage, RgbImage};

/// Multiplier applied to every channel by the `Brightened` variant.
const BRIGHTNESS_FACTOR: f32 = 1.2;

/// One deterministic transform of a subset image.
///
/// The untransformed "original" is handled by the caller (it is
/// passed through without re-encoding), so it has no variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// 90° rotation, canvas swapped to fit
    Rotated90,

    /// Mirror about the vertical axis
    FlippedHorizontal,

    /// Per-channel brightness scaling, saturating at channel max
    Brightened,
}

impl Variant {
    /// All variants, in output order.
    pub const ALL: [Variant; 3] = [
        Variant::Rotated90,
        Variant::FlippedHorizontal,
        Variant::Brightened,
    ];

    /// The suffix used in derived identifiers and file names.
    pub fn label(&self) -> &'static str {
        match self {
            Variant::Rotated90         => "rotated_90",
            Variant::FlippedHorizontal => "flipped_horizontal",
            Variant::Brightened        => "brightened",
        }
    }

    /// Apply this transform to an already-decoded image.
    /// Pure and infallible — all failure modes live in decode/encode.
    pub fn apply(&self, image: &DynamicImage) -> DynamicImage {
        match self {
            Variant::Rotated90         => image.rotate90(),
            Variant::FlippedHorizontal => image.fliph(),
            Variant::Brightened        => {
                DynamicImage::ImageRgb8(scale_brightness(image.to_rgb8(), BRIGHTNESS_FACTOR))
            }
        }
    }
}

/// Multiply every channel of every pixel by `factor`, saturating at 255.
///
/// The image crate's built-in brighten() is additive; the dataset
/// convention is multiplicative scaling, so this walks the raw
/// buffer directly.
fn scale_brightness(mut image: RgbImage, factor: f32) -> RgbImage {
    for value in image.iter_mut() {
        *value = (f32::from(*value) * factor).round().min(255.0) as u8;
    }
    image
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    /// A 3x2 image with one red pixel in the top-left corner.
    fn test_image() -> DynamicImage {
        let mut img = RgbImage::new(3, 2);
        img.put_pixel(0, 0, Rgb([200, 10, 10]));
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_variant_order_and_labels() {
        let labels: Vec<_> = Variant::ALL.iter().map(Variant::label).collect();
        assert_eq!(labels, vec!["rotated_90", "flipped_horizontal", "brightened"]);
    }

    #[test]
    fn test_rotation_swaps_dimensions() {
        let rotated = Variant::Rotated90.apply(&test_image());
        assert_eq!((rotated.width(), rotated.height()), (2, 3));
    }

    #[test]
    fn test_flip_preserves_dimensions_and_mirrors() {
        let flipped = Variant::FlippedHorizontal.apply(&test_image());
        assert_eq!((flipped.width(), flipped.height()), (3, 2));
        // The red pixel moved from x=0 to x=2
        let rgb = flipped.to_rgb8();
        assert_eq!(rgb.get_pixel(2, 0), &Rgb([200, 10, 10]));
        assert_eq!(rgb.get_pixel(0, 0), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_brightness_scales_channels() {
        let bright = Variant::Brightened.apply(&test_image()).to_rgb8();
        // 200 * 1.2 = 240, 10 * 1.2 = 12
        assert_eq!(bright.get_pixel(0, 0), &Rgb([240, 12, 12]));
    }

    #[test]
    fn test_brightness_saturates_at_255() {
        let mut img = RgbImage::new(1, 1);
        img.put_pixel(0, 0, Rgb([250, 255, 128]));
        let bright = scale_brightness(img, BRIGHTNESS_FACTOR);
        assert_eq!(bright.get_pixel(0, 0), &Rgb([255, 255, 154]));
    }
}
