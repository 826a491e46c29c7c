// ============================================================
// Layer 5 — Session Image Preprocessing
// ============================================================
// Turns the session's input image into the tensor the model was
// trained on: fixed square resolution, 3-channel RGB, channels
// scaled to [-1, 1] (mean 0.5 / std 0.5 per channel).
//
// Lanczos3 is the highest-quality resampling filter the image
// crate offers — the resize must match what the model saw during
// fine-tuning, where the same filter family was used.

use anyhow::{Context, Result};
use burn::prelude::*;
use burn::tensor::{Shape, TensorData};
use image::{imageops::FilterType, RgbImage};
use std::path::Path;

/// Load the session image and resize it to `size`×`size` RGB.
/// Aspect ratio is NOT preserved — the model expects an exact square.
pub fn load_session_image(path: &Path, size: u32) -> Result<RgbImage> {
    let image = image::open(path)
        .with_context(|| format!("Cannot open image '{}'", path.display()))?;
    Ok(image.resize_exact(size, size, FilterType::Lanczos3).to_rgb8())
}

/// Convert a preprocessed RGB image into the model input tensor,
/// shape [1, 3, height, width], values in [-1, 1].
pub fn to_model_input<B: Backend>(image: RgbImage, device: &B::Device) -> Tensor<B, 4> {
    let (width, height) = image.dimensions();
    let height = height as usize;
    let width  = width as usize;

    // Raw buffer is row-major [H, W, C]; swap into channels-first [C, H, W].
    let data = TensorData::new(image.into_raw(), Shape::new([height, width, 3]))
        .convert::<B::FloatElem>();
    Tensor::<B, 3>::from_data(data, device)
        .swap_dims(0, 1)
        .swap_dims(0, 2)
        .div_scalar(255.0)    // [0, 1]
        .sub_scalar(0.5)
        .div_scalar(0.5)      // [-1, 1]
        .reshape([1, 3, height, width])
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use tempfile::TempDir;

    #[test]
    fn test_resize_is_exact_square() {
        let dir  = TempDir::new().unwrap();
        let path = dir.path().join("wide.png");
        let mut img = RgbImage::new(20, 10);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.save(&path).unwrap();

        let loaded = load_session_image(&path, 16).unwrap();
        assert_eq!(loaded.dimensions(), (16, 16));
    }

    #[test]
    fn test_missing_image_is_fatal() {
        assert!(load_session_image(Path::new("/nonexistent/img.jpg"), 16).is_err());
    }
}
