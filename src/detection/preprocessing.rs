use image::{imageops::FilterType, RgbImage};
use ndarray::{Array, Array4};

use crate::config::EngineConfig;
use crate::error::Result;

/// Turns a frame into the detector's input blob: resized to a square of
/// `input_size`, channels in BGR order, laid out NCHW, with every value
/// computed as `(pixel - mean) * scale`.
pub fn preprocess_frame(rgb_image: &RgbImage, config: &EngineConfig) -> Result<Array4<f32>> {
    let size = config.input_size;
    let resized = image::imageops::resize(rgb_image, size, size, FilterType::Triangle);
    let raw = resized.as_raw();
    let plane = (size * size) as usize;
    let mut input_data = Vec::with_capacity(plane * 3);

    // The detector was trained on BGR input.
    for c in [2usize, 1, 0] {
        for index in 0..plane {
            let pixel_value = raw[index * 3 + c] as f32;
            input_data.push((pixel_value - config.input_mean) * config.input_scale);
        }
    }

    let shape = [1, 3, size as usize, size as usize];
    Ok(Array::from_shape_vec(shape, input_data)?)
}
