use bevy::math::Vec3;
use serde::Deserialize;

/// Default light values restored by reset-lighting.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LightSettings {
    pub position: [f32; 3],
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub shininess: f32,
}

impl Default for LightSettings {
    fn default() -> Self {
        Self {
            position: [2.0, 4.0, 5.0],
            ambient: [0.3, 0.3, 0.3],
            diffuse: [1.0, 1.0, 1.0],
            specular: [1.0, 1.0, 1.0],
            shininess: 50.0,
        }
    }
}

/// Per-draw lighting state handed to the graphics device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightUniforms {
    pub enabled: bool,
    /// World-space light position.
    pub position: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
}

impl LightUniforms {
    pub fn from_settings(settings: &LightSettings, enabled: bool) -> Self {
        Self {
            enabled,
            position: Vec3::from_array(settings.position),
            ambient: Vec3::from_array(settings.ambient),
            diffuse: Vec3::from_array(settings.diffuse),
            specular: Vec3::from_array(settings.specular),
            shininess: settings.shininess,
        }
    }
}
