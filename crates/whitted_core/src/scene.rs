//! Scene container: shapes, lights and the camera.

use whitted_math::Ray;

use crate::{Camera, Hit, Light, Shape};

/// A complete scene ready for rendering.
///
/// Shapes and lights are owned by the scene and are read-only while a
/// render is in flight.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    shapes: Vec<Shape>,
    lights: Vec<Light>,
    camera: Camera,
}

impl Scene {
    /// Create an empty scene viewed through `camera`.
    pub fn new(camera: Camera) -> Self {
        Self {
            shapes: Vec::new(),
            lights: Vec::new(),
            camera,
        }
    }

    /// Add a shape to the scene.
    pub fn add_shape(&mut self, shape: impl Into<Shape>) {
        self.shapes.push(shape.into());
    }

    /// Add a light to the scene.
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Replace the camera.
    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    /// Find the nearest intersection along a ray.
    ///
    /// Tests every shape; on an exact tie in `t` the shape added first wins.
    pub fn closest_intersection(&self, ray: &Ray) -> Option<Hit<'_>> {
        let mut closest: Option<Hit<'_>> = None;

        for shape in &self.shapes {
            if let Some(hit) = shape.intersect(ray) {
                if closest.map_or(true, |c| hit.t < c.t) {
                    closest = Some(hit);
                }
            }
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Material, Plane, Sphere, Vec3};
    use std::sync::Arc;

    #[test]
    fn test_empty_scene_never_hits() {
        let scene = Scene::new(Camera::new());
        assert!(scene.closest_intersection(&Ray::new(Vec3::ZERO, -Vec3::Z)).is_none());
    }

    #[test]
    fn test_closest_of_several() {
        let material = Arc::new(Material::default());
        let mut scene = Scene::new(Camera::new());
        scene.add_shape(Sphere::new(Vec3::new(0.0, 0.0, -10.0), 1.0, material.clone()));
        scene.add_shape(Sphere::new(Vec3::new(0.0, 0.0, -4.0), 1.0, material.clone()));
        scene.add_shape(Plane::new(Vec3::new(0.0, 0.0, -20.0), Vec3::Z, material));

        let hit = scene
            .closest_intersection(&Ray::new(Vec3::ZERO, -Vec3::Z))
            .expect("should hit");
        assert!((hit.t - 3.0).abs() < 1e-5);
        assert!(std::ptr::eq(hit.shape, &scene.shapes()[1]));
    }

    #[test]
    fn test_shared_material() {
        let material = Arc::new(Material::new(Vec3::new(1.0, 0.0, 0.0)));
        let mut scene = Scene::new(Camera::new());
        scene.add_shape(Sphere::new(Vec3::new(-2.0, 0.0, -5.0), 1.0, material.clone()));
        scene.add_shape(Sphere::new(Vec3::new(2.0, 0.0, -5.0), 1.0, material.clone()));

        assert_eq!(Arc::strong_count(&material), 3);
        assert!(std::ptr::eq(scene.shapes()[0].material(), scene.shapes()[1].material()));
    }
}
