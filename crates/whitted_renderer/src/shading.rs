//! Phong local illumination.

use whitted_core::{Color, Hit, Scene};
use whitted_math::{reflect, Ray};

/// Inverse-linear light falloff with distance.
#[inline]
pub fn attenuation(distance: f32) -> f32 {
    1.0 / (1.0 + 0.1 * distance)
}

/// Compute the locally shaded color at a hit.
///
/// Ambient term plus attenuated diffuse and specular contributions of every
/// light. Lights are never occluded: no shadow rays are traced. Each
/// component of the result is capped at 1.
pub fn compute_color(hit: &Hit, scene: &Scene, ray: &Ray) -> Color {
    let material = hit.material();
    let mut color = material.color * material.ambient;

    let view_dir = (-ray.direction()).normalize_or_zero();

    for light in scene.lights() {
        let to_light = light.position - hit.position;
        let distance = to_light.length();
        let light_dir = to_light.normalize_or_zero();

        let diffuse = material.color * material.diffuse * hit.normal.dot(light_dir).max(0.0);

        let reflect_dir = reflect(-light_dir, hit.normal);
        let specular = light.color
            * material.specular
            * view_dir.dot(reflect_dir).max(0.0).powf(material.shininess);

        color += (diffuse + specular) * attenuation(distance);
    }

    color.min(Color::ONE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use whitted_core::{Camera, Light, Material, Plane, Shape, Sphere, Vec3};

    /// A hit at the origin on an upward-facing floor.
    fn floor_hit(shape: &Shape) -> Hit<'_> {
        Hit {
            position: Vec3::ZERO,
            normal: Vec3::Y,
            t: 1.0,
            shape,
        }
    }

    fn floor(material: Material) -> Shape {
        Plane::new(Vec3::ZERO, Vec3::Y, Arc::new(material)).into()
    }

    fn straight_down() -> Ray {
        Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y)
    }

    #[test]
    fn test_attenuation() {
        assert_eq!(attenuation(0.0), 1.0);
        assert!((attenuation(10.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_ambient_only_without_lights() {
        let shape = floor(Material::new(Color::new(0.8, 0.4, 0.2)).with_phong(0.5, 1.0, 1.0, 8.0));
        let scene = Scene::new(Camera::new());

        let color = compute_color(&floor_hit(&shape), &scene, &straight_down());
        assert!((color - Color::new(0.4, 0.2, 0.1)).length() < 1e-6);
    }

    #[test]
    fn test_diffuse_with_attenuation() {
        let shape = floor(Material::new(Color::ONE).with_phong(0.0, 1.0, 0.0, 1.0));
        let mut scene = Scene::new(Camera::new());
        scene.add_light(Light::white(Vec3::new(0.0, 10.0, 0.0)));

        // n.L = 1 and the light is 10 units away
        let color = compute_color(&floor_hit(&shape), &scene, &straight_down());
        assert!((color - Color::splat(0.5)).length() < 1e-5);
    }

    #[test]
    fn test_diffuse_ignores_lights_behind_surface() {
        let shape = floor(Material::new(Color::ONE).with_phong(0.0, 1.0, 0.0, 1.0));
        let mut scene = Scene::new(Camera::new());
        scene.add_light(Light::white(Vec3::new(0.0, -10.0, 0.0)));

        let color = compute_color(&floor_hit(&shape), &scene, &straight_down());
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_specular_uses_light_color() {
        let shape = floor(Material::new(Color::ZERO).with_phong(0.0, 0.0, 0.4, 16.0));
        let mut scene = Scene::new(Camera::new());
        scene.add_light(Light::new(Vec3::new(0.0, 10.0, 0.0), Color::new(1.0, 0.5, 0.0)));

        // Looking straight down the mirror direction of the light
        let color = compute_color(&floor_hit(&shape), &scene, &straight_down());
        assert!((color - Color::new(0.2, 0.1, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_contributions_accumulate_and_clamp() {
        let shape = floor(Material::new(Color::ONE).with_phong(0.5, 1.0, 1.0, 1.0));
        let mut scene = Scene::new(Camera::new());
        for _ in 0..4 {
            scene.add_light(Light::white(Vec3::new(0.0, 1.0, 0.0)));
        }

        let color = compute_color(&floor_hit(&shape), &scene, &straight_down());
        assert_eq!(color, Color::ONE);
    }

    #[test]
    fn test_no_shadows() {
        let shape = floor(Material::new(Color::ONE).with_phong(0.1, 0.9, 0.0, 1.0));
        let mut scene = Scene::new(Camera::new());
        scene.add_light(Light::white(Vec3::new(0.0, 10.0, 0.0)));
        let unoccluded = compute_color(&floor_hit(&shape), &scene, &straight_down());

        // A blocker between the hit and the light changes nothing
        scene.add_shape(Sphere::new(
            Vec3::new(0.0, 5.0, 0.0),
            1.0,
            Arc::new(Material::default()),
        ));
        let occluded = compute_color(&floor_hit(&shape), &scene, &straight_down());

        assert_eq!(unoccluded, occluded);
    }
}
