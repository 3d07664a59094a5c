//! Infinite plane primitive.

use std::sync::Arc;

use whitted_math::{Ray, Vec3, EPSILON};

use crate::shape::{Surface, SurfaceHit};
use crate::Material;

/// An infinite plane through `point` with unit `normal`.
#[derive(Debug, Clone)]
pub struct Plane {
    point: Vec3,
    normal: Vec3,
    material: Arc<Material>,
}

impl Plane {
    /// Create a new plane. The normal is normalized on construction.
    pub fn new(point: Vec3, normal: Vec3, material: Arc<Material>) -> Self {
        Self {
            point,
            normal: normal.normalize_or_zero(),
            material,
        }
    }

    pub fn point(&self) -> Vec3 {
        self.point
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

impl Surface for Plane {
    fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        let denom = self.normal.dot(ray.direction());

        // Ray is parallel to the plane
        if denom.abs() <= EPSILON {
            return None;
        }

        let t = (self.point - ray.origin()).dot(self.normal) / denom;
        if t <= EPSILON {
            return None;
        }

        Some(SurfaceHit {
            t,
            normal: self.normal,
        })
    }

    fn normal_at(&self, _point: Vec3) -> Vec3 {
        self.normal
    }

    fn material(&self) -> &Arc<Material> {
        &self.material
    }
}
