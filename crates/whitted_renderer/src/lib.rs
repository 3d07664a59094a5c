//! Whitted Renderer - CPU ray tracing
//!
//! A Whitted-style ray tracer:
//! - Phong local illumination from point lights
//! - Recursive mirror reflection and Snell refraction up to a fixed depth
//! - Jittered multi-sampling, one parallel work item per pixel

mod error;
mod image_buffer;
mod renderer;
mod shading;
mod tracer;

pub use error::RenderError;
pub use image_buffer::ImageBuffer;
pub use renderer::{color_to_rgba, render, render_pixel, RenderConfig, RenderStats, Rendered};
pub use shading::{attenuation, compute_color};
pub use tracer::trace_ray;

/// Re-export scene types from whitted_core
pub use whitted_core::{Camera, Color, Scene};
