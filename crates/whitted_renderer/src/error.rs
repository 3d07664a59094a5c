use thiserror::Error;

/// Errors that can occur while rendering or saving an image.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid image size {width}x{height}: both dimensions must be positive")]
    InvalidResolution { width: u32, height: u32 },

    #[error("Samples per pixel must be positive")]
    NoSamples,

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}
