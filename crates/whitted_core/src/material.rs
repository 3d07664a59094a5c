//! Surface appearance for Phong shading and recursive reflection/refraction.

use whitted_math::Vec3;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// A Phong material with optional mirror reflection and transparency.
///
/// Materials are shared between shapes behind an `Arc` and never change
/// once a render starts.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Base surface color (RGB, not clamped)
    pub color: Color,

    /// Fraction of the mirror-reflected radiance added on top of the local color
    pub reflectivity: f32,

    /// Fraction of the refracted radiance added on top of the local color
    pub transparency: f32,

    /// Index of refraction (1.0 = air, 1.5 = glass)
    pub refractive_index: f32,

    /// Ambient coefficient
    pub ambient: f32,

    /// Diffuse (Lambert) coefficient
    pub diffuse: f32,

    /// Specular (Phong) coefficient
    pub specular: f32,

    /// Phong exponent
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::splat(0.5), // Grey default
            reflectivity: 0.0,
            transparency: 0.0,
            refractive_index: 1.0,
            ambient: 0.1,
            diffuse: 0.9,
            specular: 0.5,
            shininess: 32.0,
        }
    }
}

impl Material {
    /// Create a matte material of the given color with default coefficients.
    pub fn new(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    /// Set the Phong coefficients.
    pub fn with_phong(mut self, ambient: f32, diffuse: f32, specular: f32, shininess: f32) -> Self {
        self.ambient = ambient;
        self.diffuse = diffuse;
        self.specular = specular;
        self.shininess = shininess;
        self
    }

    /// Set the mirror reflectivity.
    pub fn with_reflectivity(mut self, reflectivity: f32) -> Self {
        self.reflectivity = reflectivity;
        self
    }

    /// Set transparency and index of refraction.
    pub fn with_transparency(mut self, transparency: f32, refractive_index: f32) -> Self {
        self.transparency = transparency;
        self.refractive_index = refractive_index;
        self
    }

    /// Check if hits on this material spawn a reflection ray.
    pub fn is_reflective(&self) -> bool {
        self.reflectivity > 0.0
    }

    /// Check if hits on this material spawn a refraction ray.
    pub fn is_transparent(&self) -> bool {
        self.transparency > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_material_is_opaque_matte() {
        let material = Material::default();
        assert!(!material.is_reflective());
        assert!(!material.is_transparent());
        assert_eq!(material.color, Color::splat(0.5));
    }

    #[test]
    fn test_builder() {
        let glass = Material::new(Color::ONE)
            .with_phong(0.0, 0.1, 1.0, 128.0)
            .with_reflectivity(0.1)
            .with_transparency(0.9, 1.5);

        assert_eq!(glass.color, Color::ONE);
        assert_eq!(glass.shininess, 128.0);
        assert!(glass.is_reflective());
        assert!(glass.is_transparent());
        assert_eq!(glass.refractive_index, 1.5);
    }
}
