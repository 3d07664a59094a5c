//! Parallel per-pixel sampling renderer.
//!
//! Every pixel is an independent rayon work item that owns exactly one
//! 4-byte slot of the output buffer, so no locking is needed. Each pixel
//! draws its jitter from its own RNG seeded from the render seed and the
//! pixel index, which makes seeded renders reproducible regardless of how
//! rayon schedules the work.

use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use rayon::prelude::*;
use whitted_core::{Camera, Color, Scene};
use whitted_math::Interval;

use crate::tracer::trace_ray;
use crate::{ImageBuffer, RenderError};

/// Render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Jittered samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum number of surface interactions per primary ray
    pub max_depth: u32,
    /// Seed for the jitter; `None` draws a fresh seed per render
    pub seed: Option<u64>,
    /// Draw a progress bar on stderr while rendering
    pub show_progress: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            samples_per_pixel: 100,
            max_depth: 5,
            seed: None,
            show_progress: true,
        }
    }
}

impl RenderConfig {
    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples_per_pixel: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self.max_depth = max_depth;
        self
    }

    /// Fix the jitter seed for reproducible renders.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enable or disable the progress bar.
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Check that the parameters describe a renderable image.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidResolution {
                width: self.width,
                height: self.height,
            });
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::NoSamples);
        }
        Ok(())
    }
}

/// Counters collected during a render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Primary rays that were traced
    pub primary_rays: u64,
    /// Samples skipped because the camera could not produce a ray
    pub dropped_samples: u64,
}

impl std::ops::Add for RenderStats {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            primary_rays: self.primary_rays + other.primary_rays,
            dropped_samples: self.dropped_samples + other.dropped_samples,
        }
    }
}

/// A finished render.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub image: ImageBuffer,
    pub stats: RenderStats,
}

/// Convert a color to 8-bit RGBA.
///
/// Channels are clamped to [0, 1] and scaled by 255.999 so that 1.0 maps
/// to 255; alpha is always opaque.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let to_byte = |c: f32| (255.999 * Interval::UNIT.clamp(c)) as u8;
    [to_byte(color.x), to_byte(color.y), to_byte(color.z), 255]
}

/// Render a single pixel with multi-sampling.
///
/// Returns the averaged color and per-pixel counters. A sample whose camera
/// ray cannot be generated contributes black, and the average still divides
/// by the full sample count. With zero samples per pixel nothing is traced
/// and the pixel is black.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> (Color, RenderStats) {
    let mut pixel_color = Color::ZERO;
    let mut stats = RenderStats::default();

    if config.samples_per_pixel == 0 {
        return (pixel_color, stats);
    }

    for _ in 0..config.samples_per_pixel {
        let u = (x as f32 + rng.gen::<f32>()) / config.width as f32;
        let v = (y as f32 + rng.gen::<f32>()) / config.height as f32;

        match camera.get_ray(u, v) {
            Ok(ray) => {
                stats.primary_rays += 1;
                pixel_color += trace_ray(scene, &ray, config.max_depth, false);
            }
            Err(_) => stats.dropped_samples += 1,
        }
    }

    // Average the samples
    (pixel_color / config.samples_per_pixel as f32, stats)
}

/// Progress bar over every pixel of the image, hidden when disabled.
fn progress_bar(config: &RenderConfig) -> ProgressBar {
    if !config.show_progress {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(config.width as u64 * config.height as u64);
    if let Ok(style) = ProgressStyle::with_template(
        "Rendering {bar:40} {percent}% {pos}/{len} pixels [{elapsed_precise}] ETA: {eta}",
    ) {
        pb.set_style(style);
    }
    pb
}

/// Seed for one pixel's RNG.
fn pixel_seed(seed: u64, index: usize) -> u64 {
    seed ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Render the entire scene to an image buffer.
///
/// Pixels are traced in parallel; the call returns once every pixel is done.
pub fn render(scene: &Scene, config: &RenderConfig) -> Result<Rendered, RenderError> {
    config.validate()?;

    let camera = scene.camera().fit_to_image(config.width, config.height);
    if let Err(e) = camera.validate() {
        log::warn!("Camera cannot generate rays, every sample will be dropped: {}", e);
    }

    let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let width = config.width as usize;

    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}, {} shapes, {} lights",
        config.width,
        config.height,
        config.samples_per_pixel,
        config.max_depth,
        scene.shapes().len(),
        scene.lights().len()
    );
    log::debug!("Render seed: {}", seed);

    let start = Instant::now();
    let mut image = ImageBuffer::new(config.width, config.height);
    let pb = progress_bar(config);

    let stats = image
        .as_bytes_mut()
        .par_chunks_mut(ImageBuffer::CHANNELS)
        .enumerate()
        .map(|(index, pixel)| {
            let x = (index % width) as u32;
            let y = (index / width) as u32;

            let mut rng = StdRng::seed_from_u64(pixel_seed(seed, index));
            let (color, stats) = render_pixel(&camera, scene, x, y, config, &mut rng);

            pixel.copy_from_slice(&color_to_rgba(color));
            pb.inc(1);
            stats
        })
        .reduce(RenderStats::default, |a, b| a + b);

    pb.finish_and_clear();

    log::info!(
        "Rendered {} primary rays in {:?}",
        stats.primary_rays,
        start.elapsed()
    );
    if stats.dropped_samples > 0 {
        log::warn!(
            "Dropped {} samples; affected pixels are darkened by the missing contributions",
            stats.dropped_samples
        );
    }

    Ok(Rendered { image, stats })
}
