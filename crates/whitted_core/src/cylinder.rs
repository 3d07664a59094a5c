//! Infinite, uncapped cylinder aligned with a principal axis.

use std::sync::Arc;

use serde::Deserialize;
use whitted_math::{Ray, Vec3};

use crate::shape::{nearest_root, Surface, SurfaceHit};
use crate::Material;

/// Principal axis of a cylinder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    #[default]
    Y,
    Z,
}

impl Axis {
    /// Drop the component along this axis.
    #[inline]
    pub fn flatten(self, v: Vec3) -> Vec3 {
        match self {
            Axis::X => Vec3::new(0.0, v.y, v.z),
            Axis::Y => Vec3::new(v.x, 0.0, v.z),
            Axis::Z => Vec3::new(v.x, v.y, 0.0),
        }
    }
}

/// A cylinder of infinite extent along `axis`, passing through `center`.
#[derive(Debug, Clone)]
pub struct Cylinder {
    center: Vec3,
    radius: f32,
    axis: Axis,
    material: Arc<Material>,
}

impl Cylinder {
    /// Create a cylinder along the Y axis.
    pub fn new(center: Vec3, radius: f32, material: Arc<Material>) -> Self {
        Self::with_axis(center, radius, Axis::Y, material)
    }

    /// Create a cylinder along an arbitrary principal axis.
    pub fn with_axis(center: Vec3, radius: f32, axis: Axis, material: Arc<Material>) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            axis,
            material,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }
}

impl Surface for Cylinder {
    fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        // Solve the circle equation in the plane perpendicular to the axis
        let oc = self.axis.flatten(ray.origin() - self.center);
        let d = self.axis.flatten(ray.direction());

        let a = d.dot(d);
        let b = 2.0 * oc.dot(d);
        let c = oc.dot(oc) - self.radius * self.radius;

        // A vanishing `a` means the ray runs parallel to the axis
        let t = nearest_root(a, b, c)?;
        Some(SurfaceHit {
            t,
            normal: self.normal_at(ray.at(t)),
        })
    }

    fn normal_at(&self, point: Vec3) -> Vec3 {
        self.axis.flatten(point - self.center).normalize_or_zero()
    }

    fn material(&self) -> &Arc<Material> {
        &self.material
    }
}
