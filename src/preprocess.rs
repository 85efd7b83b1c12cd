//! Turns a client-submitted image payload into the fixed-shape tensor the
//! doodle model consumes

use crate::config::IMAGE_SIZE;
use base64::{engine::general_purpose, Engine as _};
use image::imageops::{self, FilterType};
use thiserror::Error;
use tract_onnx::prelude::tract_ndarray::Array4;

/// Marker prefix of a data-URI payload, e.g. `data:image/png;base64,...`
const DATA_URI_PREFIX: &str = "data:image";

/// Any payload that cannot be turned into a model input -- malformed base64,
/// bytes that no image decoder recognizes, a comma-less data URI. Underlying
/// decoder errors never escape this module.
#[derive(Debug, Error)]
#[error("Invalid image data: {reason}")]
pub struct InvalidImageError {
    reason: String,
}

impl InvalidImageError {
    fn new(reason: impl Into<String>) -> Self {
        InvalidImageError {
            reason: reason.into(),
        }
    }
}

impl From<base64::DecodeError> for InvalidImageError {
    fn from(err: base64::DecodeError) -> Self {
        InvalidImageError::new(err.to_string())
    }
}

impl From<image::ImageError> for InvalidImageError {
    fn from(err: image::ImageError) -> Self {
        InvalidImageError::new(err.to_string())
    }
}

/// Decode a raw or data-URI-wrapped base64 payload into image bytes
pub fn decode_payload(payload: &str) -> Result<Vec<u8>, InvalidImageError> {
    let encoded = if payload.starts_with(DATA_URI_PREFIX) {
        let (_, rest) = payload
            .split_once(',')
            .ok_or_else(|| InvalidImageError::new("data URI carries no payload"))?;
        rest
    } else {
        payload
    };
    Ok(general_purpose::STANDARD.decode(encoded)?)
}

/// Convert a payload into the model's input tensor: decode, grayscale, resize
/// to 28x28 (Catmull-Rom resampling), scale intensities to [0, 1], and shape
/// as a (1, 28, 28, 1) batch
pub fn to_tensor(payload: &str) -> Result<Array4<f32>, InvalidImageError> {
    let bytes = decode_payload(payload)?;
    let gray = image::load_from_memory(&bytes)?.to_luma8();
    let resized = imageops::resize(&gray, IMAGE_SIZE, IMAGE_SIZE, FilterType::CatmullRom);

    let side = IMAGE_SIZE as usize;
    let tensor = Array4::from_shape_fn((1, side, side, 1), |(_, y, x, _)| {
        resized.get_pixel(x as u32, y as u32).0[0] as f32 / 255.0
    });
    Ok(tensor)
}
