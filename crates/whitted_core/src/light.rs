use crate::Color;
use whitted_math::Vec3;

/// A point light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub position: Vec3,
    /// Color and intensity in one
    pub color: Color,
}

impl Light {
    pub fn new(position: Vec3, color: Color) -> Self {
        Self { position, color }
    }

    /// A white light at the given position.
    pub fn white(position: Vec3) -> Self {
        Self::new(position, Color::ONE)
    }
}
