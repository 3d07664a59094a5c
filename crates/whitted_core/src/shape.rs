//! The `Surface` trait, the closed `Shape` enum and the `Hit` record.

use std::sync::Arc;

use whitted_math::{Ray, Vec3, EPSILON};

use crate::{Cube, Cylinder, Material, Plane, Sphere, Triangle};

/// Ray parameter and outward normal of a surface intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Parameter t where the intersection occurs (always > EPSILON)
    pub t: f32,
    /// Unit surface normal, following the shape's own orientation convention
    pub normal: Vec3,
}

/// Geometry that can be intersected by rays.
pub trait Surface: Send + Sync {
    /// Find the nearest intersection in front of the ray origin.
    ///
    /// Misses, rays parallel to the surface and roots at or behind
    /// `EPSILON` all return `None`.
    fn intersect(&self, ray: &Ray) -> Option<SurfaceHit>;

    /// Unit surface normal at a point on the surface.
    fn normal_at(&self, point: Vec3) -> Vec3;

    /// Material shared by this surface.
    fn material(&self) -> &Arc<Material>;
}

/// Record of a ray-shape intersection.
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    /// Point of intersection
    pub position: Vec3,
    /// Unit surface normal at the intersection (not flipped toward the ray)
    pub normal: Vec3,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// The shape that was hit
    pub shape: &'a Shape,
}

impl<'a> Hit<'a> {
    /// Material of the hit shape.
    pub fn material(&self) -> &'a Material {
        self.shape.material()
    }
}

/// Any shape that can appear in a scene.
#[derive(Debug, Clone)]
pub enum Shape {
    Sphere(Sphere),
    Plane(Plane),
    Triangle(Triangle),
    Cylinder(Cylinder),
    Cube(Cube),
}

impl Shape {
    fn surface(&self) -> &dyn Surface {
        match self {
            Shape::Sphere(s) => s,
            Shape::Plane(p) => p,
            Shape::Triangle(t) => t,
            Shape::Cylinder(c) => c,
            Shape::Cube(c) => c,
        }
    }

    /// Intersect a ray with this shape.
    pub fn intersect(&self, ray: &Ray) -> Option<Hit<'_>> {
        let SurfaceHit { t, normal } = self.surface().intersect(ray)?;
        Some(Hit {
            position: ray.at(t),
            normal,
            t,
            shape: self,
        })
    }

    /// Unit surface normal at a point on the shape.
    pub fn normal_at(&self, point: Vec3) -> Vec3 {
        self.surface().normal_at(point)
    }

    /// Material of this shape.
    pub fn material(&self) -> &Material {
        self.surface().material()
    }

    /// Short lowercase name of the shape kind, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Sphere(_) => "sphere",
            Shape::Plane(_) => "plane",
            Shape::Triangle(_) => "triangle",
            Shape::Cylinder(_) => "cylinder",
            Shape::Cube(_) => "cube",
        }
    }
}

impl From<Sphere> for Shape {
    fn from(sphere: Sphere) -> Self {
        Shape::Sphere(sphere)
    }
}

impl From<Plane> for Shape {
    fn from(plane: Plane) -> Self {
        Shape::Plane(plane)
    }
}

impl From<Triangle> for Shape {
    fn from(triangle: Triangle) -> Self {
        Shape::Triangle(triangle)
    }
}

impl From<Cylinder> for Shape {
    fn from(cylinder: Cylinder) -> Self {
        Shape::Cylinder(cylinder)
    }
}

impl From<Cube> for Shape {
    fn from(cube: Cube) -> Self {
        Shape::Cube(cube)
    }
}

/// Smallest root of `a*t^2 + b*t + c` greater than `EPSILON`.
///
/// Returns `None` for a vanishing quadratic coefficient, a negative
/// discriminant, or when both roots lie at or behind `EPSILON`.
pub(crate) fn nearest_root(a: f32, b: f32, c: f32) -> Option<f32> {
    if a.abs() < EPSILON * EPSILON {
        return None;
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrtd = discriminant.sqrt();
    let (near, far) = {
        let t0 = (-b - sqrtd) / (2.0 * a);
        let t1 = (-b + sqrtd) / (2.0 * a);
        if t0 <= t1 { (t0, t1) } else { (t1, t0) }
    };

    if near > EPSILON {
        Some(near)
    } else if far > EPSILON {
        Some(far)
    } else {
        None
    }
}
