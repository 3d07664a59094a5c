//! Axis-aligned cube primitive.

use std::sync::Arc;

use whitted_math::{Interval, Ray, Vec3, EPSILON};

use crate::shape::{Surface, SurfaceHit};
use crate::Material;

/// Outward face normals in the order used for nearest-face ties.
const FACE_NORMALS: [Vec3; 6] = [
    Vec3::NEG_X,
    Vec3::X,
    Vec3::NEG_Y,
    Vec3::Y,
    Vec3::NEG_Z,
    Vec3::Z,
];

/// An axis-aligned cube given by its center and edge length.
#[derive(Debug, Clone)]
pub struct Cube {
    center: Vec3,
    size: f32,
    min: Vec3,
    max: Vec3,
    material: Arc<Material>,
}

impl Cube {
    /// Create a new cube.
    pub fn new(center: Vec3, size: f32, material: Arc<Material>) -> Self {
        let size = size.max(0.0);
        let half = Vec3::splat(size / 2.0);
        Self {
            center,
            size,
            min: center - half,
            max: center + half,
            material,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    /// Minimum and maximum corners.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        (self.min, self.max)
    }

    /// Parameter range over which the ray is between one pair of slab planes.
    fn slab(origin: f32, direction: f32, min: f32, max: f32) -> Interval {
        if direction == 0.0 {
            // Parallel to the slab: inside for all t, or never
            return if Interval::new(min, max).contains(origin) {
                Interval::UNIVERSE
            } else {
                Interval::EMPTY
            };
        }

        let t0 = (min - origin) / direction;
        let t1 = (max - origin) / direction;
        if t0 <= t1 {
            Interval::new(t0, t1)
        } else {
            Interval::new(t1, t0)
        }
    }
}

impl Surface for Cube {
    fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        let o = ray.origin();
        let d = ray.direction();

        let span = Self::slab(o.x, d.x, self.min.x, self.max.x)
            .intersect(&Self::slab(o.y, d.y, self.min.y, self.max.y))
            .intersect(&Self::slab(o.z, d.z, self.min.z, self.max.z));

        if span.is_empty() {
            return None;
        }

        let t = if span.min > EPSILON {
            span.min
        } else if span.max > EPSILON {
            span.max
        } else {
            return None;
        };

        // A zero direction leaves an unbounded span
        if !t.is_finite() {
            return None;
        }

        Some(SurfaceHit {
            t,
            normal: self.normal_at(ray.at(t)),
        })
    }

    /// Normal of the face plane closest to `point`.
    fn normal_at(&self, point: Vec3) -> Vec3 {
        let distances = [
            (self.min.x - point.x).abs(),
            (self.max.x - point.x).abs(),
            (self.min.y - point.y).abs(),
            (self.max.y - point.y).abs(),
            (self.min.z - point.z).abs(),
            (self.max.z - point.z).abs(),
        ];

        let mut closest = 0;
        for (i, distance) in distances.iter().enumerate().skip(1) {
            if *distance < distances[closest] {
                closest = i;
            }
        }

        FACE_NORMALS[closest]
    }

    fn material(&self) -> &Arc<Material> {
        &self.material
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn unit_cube() -> Cube {
        Cube::new(Vec3::ZERO, 2.0, Arc::new(Material::default()))
    }

    #[test]
    fn test_cube_hit_front_face() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), -Vec3::Z);
        let hit = unit_cube().intersect(&ray).expect("should hit");

        assert!((hit.t - 4.0).abs() < 1e-5);
        assert_eq!(hit.normal, Vec3::Z);
    }

    #[test]
    fn test_cube_miss() {
        let ray = Ray::new(Vec3::new(0.0, 3.0, 5.0), -Vec3::Z);
        assert!(unit_cube().intersect(&ray).is_none());

        // Pointing away
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        assert!(unit_cube().intersect(&ray).is_none());
    }

    #[test]
    fn test_cube_axis_aligned_ray_outside_slab() {
        // d.x == 0 with the origin outside the x slab
        let ray = Ray::new(Vec3::new(3.0, 0.0, 5.0), -Vec3::Z);
        assert!(unit_cube().intersect(&ray).is_none());
    }

    #[test]
    fn test_cube_ray_along_face_plane_hits() {
        // d.x == 0 with the origin exactly on the x = max plane: slab bounds are inclusive
        let ray = Ray::new(Vec3::new(1.0, 0.0, 5.0), -Vec3::Z);
        let hit = unit_cube().intersect(&ray).expect("grazing ray along a face should hit");
        assert!((hit.t - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_cube_from_inside_uses_exit() {
        let hit = unit_cube().intersect(&Ray::new(Vec3::ZERO, Vec3::Y)).unwrap();
        assert!((hit.t - 1.0).abs() < 1e-5);
        assert_eq!(hit.normal, Vec3::Y);
    }

    #[test]
    fn test_cube_zero_direction_is_miss() {
        assert!(unit_cube().intersect(&Ray::new(Vec3::ZERO, Vec3::ZERO)).is_none());
    }

    #[test]
    fn test_cube_normals_are_axis_aligned_and_on_face() {
        let cube = Cube::new(Vec3::new(1.0, -0.5, -4.0), 1.5, Arc::new(Material::default()));
        let (min, max) = cube.bounds();
        let mut rng = StdRng::seed_from_u64(11);
        let mut hits = 0;

        for _ in 0..500 {
            let origin = Vec3::new(
                rng.gen_range(-4.0..4.0),
                rng.gen_range(-4.0..4.0),
                rng.gen_range(-4.0..4.0),
            ) + Vec3::new(0.0, 0.0, 2.0);
            let target = cube.center()
                + Vec3::new(
                    rng.gen_range(-1.0..1.0),
                    rng.gen_range(-1.0..1.0),
                    rng.gen_range(-1.0..1.0),
                );
            let ray = Ray::new(origin, target - origin);

            let Some(hit) = cube.intersect(&ray) else {
                continue;
            };
            hits += 1;

            assert!(FACE_NORMALS.contains(&hit.normal), "normal {}", hit.normal);

            // The hit lies on the plane of the reported face
            let p = ray.at(hit.t);
            let face = if hit.normal.max_element() > 0.0 { max } else { min };
            let axis = hit.normal.abs();
            assert!((p.dot(axis) - face.dot(axis)).abs() < 1e-3, "p={p} normal={}", hit.normal);
        }

        assert!(hits > 0);
    }
}
