//! Mirror reflection and Snell refraction of direction vectors.

use crate::Vec3;

/// Reflect a vector about a normal.
///
/// `n` must be unit length for the result to be a true mirror image.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a vector through a surface with relative index `eta` (n1 / n2).
///
/// `v` should be normalized and `n` should face against `v`. Returns `None`
/// on total internal reflection, i.e. when the discriminant is not positive.
#[inline]
pub fn refract(v: Vec3, n: Vec3, eta: f32) -> Option<Vec3> {
    let dt = v.dot(n);
    let discriminant = 1.0 - eta * eta * (1.0 - dt * dt);
    if discriminant <= 0.0 {
        return None;
    }
    Some(eta * v - n * (eta * dt + discriminant.sqrt()))
}
