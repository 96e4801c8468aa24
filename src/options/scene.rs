use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::color::Color;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Scene", inline)]
#[serde(default)]
/// Geometry and surface parameters for the sphere and the ground plane.
pub struct SceneOptions {
    /// Sphere radius. The plane sits at `-sphere_radius`.
    #[schemars(title = "Sphere Radius", range(min = 0.5, max = 6.0), extend("step" = 0.1))]
    pub sphere_radius: f32,
    /// Segments around the sphere's equator.
    #[schemars(skip)]
    pub sphere_width_segments: u32,
    /// Segments from pole to pole.
    #[schemars(skip)]
    pub sphere_height_segments: u32,
    /// Sphere surface color.
    #[schemars(title = "Sphere Color")]
    pub sphere_color: Color,
    /// Plane extent along X.
    #[schemars(skip)]
    pub plane_width: f32,
    /// Plane extent along Z (after rotation).
    #[schemars(skip)]
    pub plane_height: f32,
    /// Plane surface color.
    #[schemars(title = "Plane Color")]
    pub plane_color: Color,
    /// Render the plane from below as well as above.
    #[schemars(title = "Double-Sided Plane")]
    pub plane_double_sided: bool,
    /// Surface roughness shared by both meshes (1.0 = fully matte).
    #[schemars(title = "Roughness", range(min = 0.05, max = 1.0), extend("step" = 0.01))]
    pub roughness: f32,
    /// Surface metalness shared by both meshes.
    #[schemars(title = "Metalness", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub metalness: f32,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            sphere_radius: 3.0,
            sphere_width_segments: 64,
            sphere_height_segments: 64,
            sphere_color: Color::from_rgb_u32(0x0000_ff83),
            plane_width: 10.0,
            plane_height: 10.0,
            plane_color: Color::from_rgb_u32(0x0000_fff0),
            plane_double_sided: true,
            roughness: 1.0,
            metalness: 0.0,
        }
    }
}
