//! Recursive Whitted ray tracing.

use whitted_core::{Color, Hit, Scene};
use whitted_math::{reflect, refract, Ray};

use crate::shading::compute_color;

/// Compute the color seen along a ray.
///
/// `depth` is the number of surface interactions still allowed; at zero the
/// ray contributes black. `inside` tracks whether the ray currently travels
/// through a refractive medium. Rays that leave the scene are black.
///
/// Local, reflected and refracted terms are summed without normalization,
/// so the result may exceed 1 before the final pixel clamp.
pub fn trace_ray(scene: &Scene, ray: &Ray, depth: u32, inside: bool) -> Color {
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(hit) = scene.closest_intersection(ray) else {
        return Color::ZERO;
    };

    let material = hit.material();
    let mut color = compute_color(&hit, scene, ray);

    if material.is_reflective() {
        let reflected = Ray::new(hit.position, reflect(ray.direction(), hit.normal));
        color += trace_ray(scene, &reflected, depth - 1, inside) * material.reflectivity;
    }

    if material.is_transparent() {
        let (refracted, next_inside) = refracted_ray(ray, &hit, material.refractive_index, inside);
        color += trace_ray(scene, &refracted, depth - 1, next_inside) * material.transparency;
    }

    color
}

/// Continue a ray through a refractive boundary.
///
/// Returns the transmitted ray with the inside flag flipped, or on total
/// internal reflection the internally reflected ray with the flag kept.
fn refracted_ray(ray: &Ray, hit: &Hit, refractive_index: f32, inside: bool) -> (Ray, bool) {
    let direction = ray.direction().normalize_or_zero();

    // Shape normals face outward; refraction needs one facing the ray
    let normal = if direction.dot(hit.normal) > 0.0 {
        -hit.normal
    } else {
        hit.normal
    };

    // Non-positive indices behave like vacuum
    let ior = if refractive_index > 0.0 { refractive_index } else { 1.0 };
    let eta = if inside { ior } else { 1.0 / ior };

    match refract(direction, normal, eta) {
        Some(transmitted) => (Ray::new(hit.position, transmitted), !inside),
        None => (Ray::new(hit.position, reflect(direction, normal)), inside),
    }
}
