//! Pinhole camera for primary ray generation.

use thiserror::Error;
use whitted_math::{Ray, Vec3, EPSILON};

/// Errors from an unusable camera configuration.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum CameraError {
    #[error("Degenerate camera basis: look_from equals look_at or up is parallel to the view direction")]
    DegenerateBasis,

    #[error("Invalid vertical field of view: {0} degrees")]
    InvalidFieldOfView(f32),

    #[error("Invalid aspect ratio: {0}")]
    InvalidAspectRatio(f32),
}

/// Precomputed viewport in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Frame {
    origin: Vec3,
    upper_left: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
}

/// Camera mapping normalized screen coordinates to world-space rays.
///
/// Screen coordinate `u` runs left to right and `v` runs top to bottom, both
/// over `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    // Camera positioning
    look_from: Vec3,
    look_at: Vec3,
    up: Vec3,

    // Lens settings
    vfov: f32, // Vertical field of view in degrees
    aspect_ratio: Option<f32>,

    // Cached computed values (rebuilt by every setter)
    frame: Result<Frame, CameraError>,
}

impl Camera {
    /// Create a new camera at the origin looking down -Z with a 90 degree field of view.
    pub fn new() -> Self {
        let mut camera = Self {
            look_from: Vec3::ZERO,
            look_at: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::Y,
            vfov: 90.0,
            aspect_ratio: None,
            frame: Err(CameraError::DegenerateBasis),
        };
        camera.rebuild();
        camera
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, up: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.up = up;
        self.rebuild();
        self
    }

    /// Set the vertical field of view in degrees.
    pub fn with_fov(mut self, vfov: f32) -> Self {
        self.vfov = vfov;
        self.rebuild();
        self
    }

    /// Fix the viewport aspect ratio (width / height).
    pub fn with_aspect_ratio(mut self, aspect_ratio: f32) -> Self {
        self.aspect_ratio = Some(aspect_ratio);
        self.rebuild();
        self
    }

    /// Use the image's aspect ratio unless one was fixed explicitly.
    pub fn fit_to_image(&self, width: u32, height: u32) -> Self {
        if self.aspect_ratio.is_some() || height == 0 {
            return self.clone();
        }
        self.clone().with_aspect_ratio(width as f32 / height as f32)
    }

    pub fn look_from(&self) -> Vec3 {
        self.look_from
    }

    pub fn look_at(&self) -> Vec3 {
        self.look_at
    }

    pub fn vfov(&self) -> f32 {
        self.vfov
    }

    /// Aspect ratio in effect. Square until fixed or fitted to an image.
    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio.unwrap_or(1.0)
    }

    /// Check the configuration without generating a ray.
    pub fn validate(&self) -> Result<(), CameraError> {
        self.frame.map(|_| ())
    }

    /// Generate the ray through screen coordinate (u, v).
    ///
    /// The returned direction is normalized.
    pub fn get_ray(&self, u: f32, v: f32) -> Result<Ray, CameraError> {
        let frame = self.frame?;
        let target = frame.upper_left + u * frame.horizontal + v * frame.vertical;
        Ok(Ray::new(frame.origin, (target - frame.origin).normalize_or_zero()))
    }

    fn rebuild(&mut self) {
        self.frame = self.compute_frame();
    }

    fn compute_frame(&self) -> Result<Frame, CameraError> {
        if !self.vfov.is_finite() || self.vfov <= 0.0 || self.vfov >= 180.0 {
            return Err(CameraError::InvalidFieldOfView(self.vfov));
        }
        let aspect_ratio = self.aspect_ratio();
        if !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
            return Err(CameraError::InvalidAspectRatio(aspect_ratio));
        }

        // Calculate viewport dimensions
        let h = (self.vfov.to_radians() / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = viewport_height * aspect_ratio;

        // Calculate camera basis vectors
        let w = self.look_from - self.look_at;
        if w.length_squared() < EPSILON * EPSILON {
            return Err(CameraError::DegenerateBasis);
        }
        let w = w.normalize();

        let u = self.up.cross(w);
        if u.length_squared() < EPSILON * EPSILON {
            return Err(CameraError::DegenerateBasis);
        }
        let u = u.normalize();
        let v = w.cross(u);

        // Screen v grows downward
        let horizontal = viewport_width * u;
        let vertical = -viewport_height * v;
        let upper_left = self.look_from - w - horizontal / 2.0 - vertical / 2.0;

        Ok(Frame {
            origin: self.look_from,
            upper_left,
            horizontal,
            vertical,
        })
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
