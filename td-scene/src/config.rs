use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::ConfigError;
use crate::lighting::LightSettings;

/// Door dimensions in world units. Defaults are the built-in door.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DoorLayout {
    pub frame_thickness: f32,
    pub total_width: f32,
    /// Height of the door section, not counting the transom above it.
    pub total_height: f32,
    pub frame_depth: f32,
    pub inner_frame_thickness: f32,
    pub inner_frame_depth: f32,
    pub door_thickness: f32,
    /// Distance from the opening edge to the hinge line. The panels overlap
    /// by this much at the center.
    pub door_offset: f32,
    pub handle_width: f32,
    pub handle_height: f32,
    pub handle_depth: f32,
    pub handle_offset_from_edge: f32,
    /// Gap between the door surface and the handle.
    pub handle_offset_z: f32,
    /// Mounting point above the handle's own center.
    pub handle_pivot_offset_y: f32,
    pub strip_count: u32,
    pub strip_height: f32,
    pub strip_margin: f32,
    pub window_height: f32,
    pub fanlight_height: f32,
    pub glass_thickness: f32,
    pub sash_thickness: f32,
    pub wall_width: f32,
    pub wall_thickness: f32,
}

impl Default for DoorLayout {
    fn default() -> Self {
        Self {
            frame_thickness: 0.15,
            total_width: 4.0,
            total_height: 4.0,
            frame_depth: 0.3,
            inner_frame_thickness: 0.05,
            inner_frame_depth: 0.06,
            door_thickness: 0.1,
            door_offset: 0.05,
            handle_width: 0.08,
            handle_height: 0.4,
            handle_depth: 0.1,
            handle_offset_from_edge: 0.3,
            handle_offset_z: 0.15,
            handle_pivot_offset_y: 0.15,
            strip_count: 5,
            strip_height: 0.05,
            strip_margin: 0.1,
            window_height: 0.9,
            fanlight_height: 0.2,
            glass_thickness: 0.02,
            sash_thickness: 0.04,
            wall_width: 3.0,
            wall_thickness: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Door angle reached by a completed push-open, in degrees.
    pub push_target_angle: f32,
    /// Progress added per tick (progress runs 0..100).
    pub push_speed: f32,
    pub glass_target_angle: f32,
    pub glass_speed: f32,
    /// Degrees added to camera rotation Y per tick while auto-rotating.
    pub auto_rotate_speed: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            push_target_angle: 75.0,
            push_speed: 1.0,
            glass_target_angle: 30.0,
            glass_speed: 2.0,
            auto_rotate_speed: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub default_zoom: f32,
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            default_zoom: 10.0,
            fov_deg: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub layout: DoorLayout,
    pub animation: AnimationConfig,
    pub camera: CameraConfig,
    pub lighting: LightSettings,
}

impl SceneConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        info!("loaded scene config from {}", path.display());
        Ok(config)
    }
}
