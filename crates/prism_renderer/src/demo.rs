//! Built-in scene rendered when no scene file is given.

use prism_core::{SceneDescription, SceneResult};
use serde_json::json;

/// A box of five inward-facing walls holding a diffuse, a glass and a
/// mirror sphere, lit by two marked point lights.
pub fn demo_scene_description() -> SceneResult<SceneDescription> {
    let scene = json!({
        "settings": { "width": 640, "height": 480, "samples_per_pixel": 1, "max_bounces": 5 },
        "camera": { "eye": [0.01, 0.01, 5.0], "look_at": [0.01, 0.01, 0.01], "up": [0.0, 1.0, 0.0], "fov": 60.0 },
        "materials": {
            "wall": { "type": "diffuse", "color": [0.5, 0.5, 0.5] },
            "floor": { "type": "grid", "line_color": [0.1, 0.1, 0.1], "tile_color": [0.8, 0.8, 0.8],
                       "thickness": 0.02, "scale": 0.5 },
            "blue": { "type": "diffuse", "color": [0.0, 0.0, 1.0] }
        },
        "objects": [
            { "type": "plane", "normal": [1.0, 0.0, 0.0], "distance": 3.0, "material": "wall" },
            { "type": "plane", "normal": [-1.0, 0.0, 0.0], "distance": 3.0, "material": "wall" },
            { "type": "plane", "normal": [0.0, 1.0, 0.0], "distance": 3.0, "material": "floor" },
            { "type": "plane", "normal": [0.0, -1.0, 0.0], "distance": 3.0, "material": "wall" },
            { "type": "plane", "normal": [0.0, 0.0, 1.0], "distance": 3.0, "material": "wall" },
            { "type": "sphere", "center": [0.0, 0.0, 0.0], "radius": 0.4, "material": "blue" },
            { "type": "sphere", "center": [-1.1, -0.6, 0.9], "radius": 0.5,
              "material": { "type": "glass", "ior": 1.5 } },
            { "type": "sphere", "center": [1.3, -0.4, -1.2], "radius": 0.8,
              "material": { "type": "mirror", "ks": [0.9, 0.9, 0.9] } }
        ],
        "lights": [
            { "type": "point", "position": [0.4, 0.6, 2.8], "emission": [10.0, 10.0, 10.0], "marker_radius": 0.03 },
            { "type": "point", "position": [0.4, 0.7, 0.4], "emission": [0.0, 10.0, 10.0], "marker_radius": 0.03 }
        ]
    });

    let description: SceneDescription = serde_json::from_value(scene)?;
    description.validate()?;
    Ok(description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SceneBuilder;

    #[test]
    fn test_demo_scene_builds() {
        let description = demo_scene_description().unwrap();
        assert_eq!(description.objects.len(), 8);
        assert_eq!(description.lights.len(), 2);

        let scene = SceneBuilder::new().build(&description).unwrap();
        // Eight objects plus one marker per light
        assert_eq!(scene.world.len(), 10);
        assert_eq!(scene.lights.len(), 2);
    }
}
