//! Whitted Core - scene representation for the Whitted ray tracer.
//!
//! This crate provides:
//!
//! - **Shapes**: `Sphere`, `Plane`, `Triangle`, `Cylinder`, `Cube`, unified
//!   by the closed `Shape` enum
//! - **Appearance**: Phong-style `Material` shared between shapes, point `Light`s
//! - **Scene**: shape and light collections plus the `Camera`, answering
//!   nearest-hit queries
//! - **Loading**: JSON scene descriptions via `load_scene`
//!
//! # Example
//!
//! ```ignore
//! use whitted_core::load_scene;
//!
//! let scene = load_scene("scenes/showcase.json")?;
//! println!("Loaded {} shapes, {} lights", scene.shapes().len(), scene.lights().len());
//! ```

pub mod camera;
pub mod cube;
pub mod cylinder;
pub mod light;
pub mod loader;
pub mod material;
pub mod plane;
pub mod scene;
pub mod shape;
pub mod sphere;
pub mod triangle;

// Re-export commonly used types
pub use camera::{Camera, CameraError};
pub use cube::Cube;
pub use cylinder::{Axis, Cylinder};
pub use light::Light;
pub use loader::{load_scene, load_scene_from_str, LoadError, LoadResult};
pub use material::{Color, Material};
pub use plane::Plane;
pub use scene::Scene;
pub use shape::{Hit, Shape, Surface, SurfaceHit};
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export Vec3 and common math types from whitted_math
pub use whitted_math::{Interval, Ray, Vec3, EPSILON};
