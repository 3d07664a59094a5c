//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use std::sync::Arc;

use whitted_math::{Ray, Vec3, EPSILON};

use crate::shape::{Surface, SurfaceHit};
use crate::Material;

/// A flat-shaded triangle primitive.
#[derive(Debug, Clone)]
pub struct Triangle {
    /// Vertices
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    /// Pre-computed face normal (unit length)
    normal: Vec3,
    /// Material
    material: Arc<Material>,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    ///
    /// The face normal is `cross(v1 - v0, v2 - v0)`, so counter-clockwise
    /// winding faces the viewer.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, material: Arc<Material>) -> Self {
        let normal = (v1 - v0).cross(v2 - v0).normalize_or_zero();
        Self {
            v0,
            v1,
            v2,
            normal,
            material,
        }
    }

    pub fn vertices(&self) -> [Vec3; 3] {
        [self.v0, self.v1, self.v2]
    }

    /// Twice the triangle's area. Zero for degenerate triangles.
    pub fn double_area(&self) -> f32 {
        (self.v1 - self.v0).cross(self.v2 - self.v0).length()
    }

    /// Möller-Trumbore ray-triangle intersection.
    ///
    /// Returns `(t, u, v)` where `u` and `v` are the barycentric weights of
    /// `v1` and `v2`.
    pub fn barycentric_hit(&self, ray: &Ray) -> Option<(f32, f32, f32)> {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        let h = ray.direction().cross(edge2);
        let a = edge1.dot(h);

        // Ray is parallel to triangle
        if a.abs() < EPSILON {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin() - self.v0;
        let u = f * s.dot(h);

        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = f * ray.direction().dot(q);

        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        // Line intersection, but not a ray intersection
        let t = f * edge2.dot(q);
        if t <= EPSILON {
            return None;
        }

        Some((t, u, v))
    }
}

impl Surface for Triangle {
    fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        let (t, _, _) = self.barycentric_hit(ray)?;
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
