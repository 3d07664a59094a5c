//! JSON scene loading.
//!
//! A scene file names its materials once and lets shapes refer to them by
//! name, so every shape using the same name shares one `Arc<Material>`:
//!
//! ```json
//! {
//!   "camera": { "look_from": [0, 1, 5], "look_at": [0, 0, 0], "fov": 60 },
//!   "materials": { "red": { "color": [0.9, 0.1, 0.1], "reflectivity": 0.2 } },
//!   "lights": [ { "position": [0, 5, 0], "color": [1, 1, 1] } ],
//!   "shapes": [ { "type": "sphere", "center": [0, 0, 0], "radius": 1, "material": "red" } ]
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;
use whitted_math::{Vec3, EPSILON};

use crate::{Axis, Camera, Color, Cube, Cylinder, Light, Material, Plane, Scene, Shape, Sphere, Triangle};

/// Errors that can occur during scene loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unknown material: {0}")]
    UnknownMaterial(String),

    #[error("Invalid {kind} #{index}: {reason}")]
    InvalidShape {
        kind: &'static str,
        index: usize,
        reason: String,
    },
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SceneDesc {
    #[serde(default)]
    camera: CameraDesc,
    #[serde(default)]
    materials: HashMap<String, MaterialDesc>,
    #[serde(default)]
    lights: Vec<LightDesc>,
    #[serde(default)]
    shapes: Vec<ShapeDesc>,
}

#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
struct CameraDesc {
    look_from: Vec3,
    look_at: Vec3,
    up: Vec3,
    fov: f32,
    aspect_ratio: Option<f32>,
}

impl Default for CameraDesc {
    fn default() -> Self {
        let camera = Camera::new();
        Self {
            look_from: camera.look_from(),
            look_at: camera.look_at(),
            up: Vec3::Y,
            fov: camera.vfov(),
            aspect_ratio: None,
        }
    }
}

#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
struct MaterialDesc {
    color: Color,
    reflectivity: f32,
    transparency: f32,
    refractive_index: f32,
    ambient: f32,
    diffuse: f32,
    specular: f32,
    shininess: f32,
}

impl Default for MaterialDesc {
    fn default() -> Self {
        let m = Material::default();
        Self {
            color: m.color,
            reflectivity: m.reflectivity,
            transparency: m.transparency,
            refractive_index: m.refractive_index,
            ambient: m.ambient,
            diffuse: m.diffuse,
            specular: m.specular,
            shininess: m.shininess,
        }
    }
}

impl From<MaterialDesc> for Material {
    fn from(desc: MaterialDesc) -> Self {
        Material {
            color: desc.color,
            reflectivity: desc.reflectivity,
            transparency: desc.transparency,
            refractive_index: desc.refractive_index,
            ambient: desc.ambient,
            diffuse: desc.diffuse,
            specular: desc.specular,
            shininess: desc.shininess,
        }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct LightDesc {
    position: Vec3,
    #[serde(default = "white")]
    color: Color,
}

fn white() -> Color {
    Color::ONE
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ShapeDesc {
    Sphere {
        center: Vec3,
        radius: f32,
        material: Option<String>,
    },
    Plane {
        point: Vec3,
        normal: Vec3,
        material: Option<String>,
    },
    Triangle {
        vertices: [Vec3; 3],
        material: Option<String>,
    },
    Cylinder {
        center: Vec3,
        radius: f32,
        #[serde(default)]
        axis: Axis,
        material: Option<String>,
    },
    Cube {
        center: Vec3,
        size: f32,
        material: Option<String>,
    },
}

impl ShapeDesc {
    fn kind(&self) -> &'static str {
        match self {
            ShapeDesc::Sphere { .. } => "sphere",
            ShapeDesc::Plane { .. } => "plane",
            ShapeDesc::Triangle { .. } => "triangle",
            ShapeDesc::Cylinder { .. } => "cylinder",
            ShapeDesc::Cube { .. } => "cube",
        }
    }

    fn material_name(&self) -> Option<&str> {
        match self {
            ShapeDesc::Sphere { material, .. }
            | ShapeDesc::Plane { material, .. }
            | ShapeDesc::Triangle { material, .. }
            | ShapeDesc::Cylinder { material, .. }
            | ShapeDesc::Cube { material, .. } => material.as_deref(),
        }
    }

    /// Problem with the shape's geometry, if any.
    fn geometry_error(&self) -> Option<String> {
        match self {
            ShapeDesc::Sphere { radius, .. } | ShapeDesc::Cylinder { radius, .. }
                if !(*radius > 0.0) =>
            {
                Some(format!("radius must be positive, got {radius}"))
            }
            ShapeDesc::Cube { size, .. } if !(*size > 0.0) => {
                Some(format!("size must be positive, got {size}"))
            }
            ShapeDesc::Plane { normal, .. } if normal.length_squared() < EPSILON * EPSILON => {
                Some("normal must be non-zero".to_string())
            }
            ShapeDesc::Triangle { vertices: [a, b, c], .. }
                if (*b - *a).cross(*c - *a).length_squared() < EPSILON * EPSILON =>
            {
                Some("vertices span no area".to_string())
            }
            _ => None,
        }
    }

    fn build(self, material: Arc<Material>) -> Shape {
        match self {
            ShapeDesc::Sphere { center, radius, .. } => Sphere::new(center, radius, material).into(),
            ShapeDesc::Plane { point, normal, .. } => Plane::new(point, normal, material).into(),
            ShapeDesc::Triangle { vertices: [a, b, c], .. } => Triangle::new(a, b, c, material).into(),
            ShapeDesc::Cylinder {
                center, radius, axis, ..
            } => Cylinder::with_axis(center, radius, axis, material).into(),
            ShapeDesc::Cube { center, size, .. } => Cube::new(center, size, material).into(),
        }
    }
}

/// Load a scene from a JSON file.
pub fn load_scene(path: impl AsRef<Path>) -> LoadResult<Scene> {
    let path = path.as_ref();
    log::debug!("Reading scene file {}", path.display());
    let contents = std::fs::read_to_string(path)?;
    load_scene_from_str(&contents)
}

/// Load a scene from a JSON string.
pub fn load_scene_from_str(json: &str) -> LoadResult<Scene> {
    let desc: SceneDesc = serde_json::from_str(json)?;

    let mut camera = Camera::new()
        .with_position(desc.camera.look_from, desc.camera.look_at, desc.camera.up)
        .with_fov(desc.camera.fov);
    if let Some(aspect_ratio) = desc.camera.aspect_ratio {
        camera = camera.with_aspect_ratio(aspect_ratio);
    }
    if let Err(e) = camera.validate() {
        // Rendering skips every sample of a broken camera rather than failing
        log::warn!("Scene camera is unusable: {}", e);
    }

    let materials: HashMap<String, Arc<Material>> = desc
        .materials
        .into_iter()
        .map(|(name, m)| (name, Arc::new(Material::from(m))))
        .collect();
    let default_material = Arc::new(Material::default());

    let mut scene = Scene::new(camera);

    for (index, shape) in desc.shapes.into_iter().enumerate() {
        if let Some(reason) = shape.geometry_error() {
            return Err(LoadError::InvalidShape {
                kind: shape.kind(),
                index,
                reason,
            });
        }

        let material = match shape.material_name() {
            Some(name) => materials
                .get(name)
                .cloned()
                .ok_or_else(|| LoadError::UnknownMaterial(name.to_string()))?,
            None => default_material.clone(),
        };

        scene.add_shape(shape.build(material));
    }

    for light in desc.lights {
        scene.add_light(Light::new(light.position, light.color));
    }

    log::info!(
        "Loaded scene: {} shapes, {} lights, {} materials",
        scene.shapes().len(),
        scene.lights().len(),
        materials.len()
    );

    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE: &str = r#"{
        "camera": { "look_from": [0, 1, 5], "look_at": [0, 0, 0], "up": [0, 1, 0], "fov": 60 },
        "materials": {
            "red": { "color": [0.9, 0.1, 0.1], "reflectivity": 0.25 },
            "glass": { "color": [1, 1, 1], "transparency": 0.9, "refractive_index": 1.5 }
        },
        "lights": [
            { "position": [0, 5, 0], "color": [1, 1, 1] },
            { "position": [-3, 3, 3] }
        ],
        "shapes": [
            { "type": "sphere", "center": [0, 0, 0], "radius": 1, "material": "red" },
            { "type": "plane", "point": [0, -1, 0], "normal": [0, 1, 0] },
            { "type": "triangle", "vertices": [[-1, 0, -2], [1, 0, -2], [0, 2, -2]], "material": "red" },
            { "type": "cylinder", "center": [3, 0, 0], "radius": 0.5, "axis": "z", "material": "glass" },
            { "type": "cube", "center": [-3, 0, 0], "size": 1.5, "material": "glass" }
        ]
    }"#;

    #[test]
    fn test_load_full_scene() {
        let scene = load_scene_from_str(SCENE).unwrap();

        assert_eq!(scene.shapes().len(), 5);
        assert_eq!(scene.lights().len(), 2);
        assert_eq!(scene.lights()[1].color, Color::ONE);
        assert_eq!(scene.camera().vfov(), 60.0);
        assert!(scene.camera().validate().is_ok());

        let kinds: Vec<_> = scene.shapes().iter().map(Shape::kind).collect();
        assert_eq!(kinds, ["sphere", "plane", "triangle", "cylinder", "cube"]);

        match &scene.shapes()[3] {
            Shape::Cylinder(c) => assert_eq!(c.axis(), Axis::Z),
            other => panic!("expected cylinder, got {}", other.kind()),
        }
    }

    #[test]
    fn test_materials_are_shared_and_defaulted() {
        let scene = load_scene_from_str(SCENE).unwrap();
        let shapes = scene.shapes();

        // Same name, same allocation
        assert!(std::ptr::eq(shapes[0].material(), shapes[2].material()));
        assert!(std::ptr::eq(shapes[3].material(), shapes[4].material()));

        let red = shapes[0].material();
        assert_eq!(red.reflectivity, 0.25);
        assert_eq!(red.shininess, Material::default().shininess);

        // No material named
        assert_eq!(shapes[1].material(), &Material::default());
    }

    #[test]
    fn test_unknown_material() {
        let json = r#"{ "shapes": [ { "type": "sphere", "center": [0, 0, 0], "radius": 1, "material": "gold" } ] }"#;
        match load_scene_from_str(json) {
            Err(LoadError::UnknownMaterial(name)) => assert_eq!(name, "gold"),
            other => panic!("expected UnknownMaterial, got {:?}", other.map(|s| s.shapes().len())),
        }
    }

    #[test]
    fn test_invalid_geometry() {
        let json = r#"{ "shapes": [
            { "type": "cube", "center": [0, 0, 0], "size": 1 },
            { "type": "sphere", "center": [0, 0, 0], "radius": -2 }
        ] }"#;
        match load_scene_from_str(json) {
            Err(LoadError::InvalidShape { kind, index, .. }) => {
                assert_eq!(kind, "sphere");
                assert_eq!(index, 1);
            }
            other => panic!("expected InvalidShape, got {:?}", other.map(|s| s.shapes().len())),
        }

        let json = r#"{ "shapes": [ { "type": "triangle", "vertices": [[0, 0, 0], [1, 1, 1], [2, 2, 2]] } ] }"#;
        assert!(matches!(load_scene_from_str(json), Err(LoadError::InvalidShape { kind: "triangle", .. })));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(load_scene_from_str("{ not json"), Err(LoadError::Parse(_))));

        let json = r#"{ "shapes": [ { "type": "torus", "center": [0, 0, 0] } ] }"#;
        assert!(matches!(load_scene_from_str(json), Err(LoadError::Parse(_))));
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let scene = load_scene_from_str("{}").unwrap();
        assert!(scene.shapes().is_empty());
        assert!(scene.lights().is_empty());
        assert_eq!(scene.camera(), &Camera::new());
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_scene("/definitely/not/a/scene.json"),
            Err(LoadError::Io(_))
        ));
    }
}
