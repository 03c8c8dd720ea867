use bevy::math::Vec3;
use bevy::prelude::Resource;
use tracing::debug;

use crate::animation::TransitionPair;
use crate::camera::{Camera, CameraPreset, wrap_degrees};
use crate::config::SceneConfig;
use crate::lighting::{LightSettings, LightUniforms};
use crate::params::{ParamId, ParamTable};
use crate::texture::{TextureMode, TextureSlots};

/// A trigger from a button, a key, or the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneAction {
    StartPushOpen,
    StopPushOpen,
    StartClose,
    StopClose,
    /// Stops whichever door transition is running.
    StopDoor,
    StartGlassOpen,
    StopGlassOpen,
    StartGlassClose,
    StopGlassClose,
    ToggleAutoRotate,
    ToggleLighting,
    ToggleTexture,
    SetTextureMode(TextureMode),
    ResetView,
    ResetLighting,
    CameraPreset(CameraPreset),
}

/// Everything the frame loop mutates: parameter values, flags and the two
/// transition pairs.
#[derive(Resource, Debug, Clone)]
pub struct SceneState {
    params: ParamTable,
    pub lighting_enabled: bool,
    pub texture_enabled: bool,
    pub texture_mode: TextureMode,
    pub auto_rotate: bool,
    pub door: TransitionPair,
    pub glass: TransitionPair,
    pub textures: TextureSlots,
    config: SceneConfig,
}

impl SceneState {
    pub fn new(config: &SceneConfig) -> Self {
        let anim = &config.animation;
        Self {
            params: ParamTable::from_config(config),
            lighting_enabled: true,
            texture_enabled: false,
            texture_mode: TextureMode::Checkerboard,
            auto_rotate: false,
            door: TransitionPair::new("door", anim.push_target_angle, anim.push_speed),
            glass: TransitionPair::new("glass", anim.glass_target_angle, anim.glass_speed),
            textures: TextureSlots::default(),
            config: config.clone(),
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn get(&self, id: ParamId) -> f32 {
        self.params.get(id)
    }

    pub fn set(&mut self, id: ParamId, value: f32) {
        self.params.set(id, value);
    }

    pub fn param_mut(&mut self, id: ParamId) -> &mut f32 {
        self.params.get_mut(id)
    }

    pub fn camera(&self) -> Camera {
        Camera {
            rotation: Vec3::new(
                self.get(ParamId::CameraRotationX),
                self.get(ParamId::CameraRotationY),
                self.get(ParamId::CameraRotationZ),
            ),
            zoom: self.get(ParamId::Zoom),
        }
    }

    pub fn light_settings(&self) -> LightSettings {
        use ParamId::*;
        let rgb = |r, g, b| [self.get(r), self.get(g), self.get(b)];
        LightSettings {
            position: rgb(LightPositionX, LightPositionY, LightPositionZ),
            ambient: rgb(AmbientR, AmbientG, AmbientB),
            diffuse: rgb(DiffuseR, DiffuseG, DiffuseB),
            specular: rgb(SpecularR, SpecularG, SpecularB),
            shininess: self.get(Shininess),
        }
    }

    pub fn light_uniforms(&self) -> LightUniforms {
        LightUniforms::from_settings(&self.light_settings(), self.lighting_enabled)
    }

    pub fn apply(&mut self, action: SceneAction) {
        debug!(?action, "scene action");
        let door = [
            self.get(ParamId::DoorAngleLeft),
            self.get(ParamId::DoorAngleRight),
        ];
        let glass = [
            self.get(ParamId::GlassAngleLeft),
            self.get(ParamId::GlassAngleRight),
        ];
        match action {
            SceneAction::StartPushOpen => self.door.start_open(door),
            SceneAction::StopPushOpen => self.door.stop_open(),
            SceneAction::StartClose => self.door.start_close(door),
            SceneAction::StopClose => self.door.stop_close(),
            SceneAction::StopDoor => {
                self.door.stop_open();
                self.door.stop_close();
            }
            SceneAction::StartGlassOpen => self.glass.start_open(glass),
            SceneAction::StopGlassOpen => self.glass.stop_open(),
            SceneAction::StartGlassClose => self.glass.start_close(glass),
            SceneAction::StopGlassClose => self.glass.stop_close(),
            SceneAction::ToggleAutoRotate => self.auto_rotate = !self.auto_rotate,
            SceneAction::ToggleLighting => self.lighting_enabled = !self.lighting_enabled,
            SceneAction::ToggleTexture => self.texture_enabled = !self.texture_enabled,
            SceneAction::SetTextureMode(mode) => self.texture_mode = mode,
            SceneAction::ResetView => {
                self.auto_rotate = false;
                self.params.reset(&ParamId::CAMERA, &self.config);
            }
            SceneAction::ResetLighting => {
                self.params.reset(&ParamId::LIGHTING, &self.config);
            }
            SceneAction::CameraPreset(preset) => {
                let rotation = preset.rotation();
                self.auto_rotate = false;
                self.set(ParamId::CameraRotationX, rotation.x);
                self.set(ParamId::CameraRotationY, rotation.y);
                self.set(ParamId::CameraRotationZ, rotation.z);
            }
        }
    }

    /// Advances animations by one displayed frame.
    pub fn tick(&mut self) {
        if let Some([left, right]) = self.door.tick() {
            self.set(ParamId::DoorAngleLeft, left);
            self.set(ParamId::DoorAngleRight, right);
        }
        if let Some([left, right]) = self.glass.tick() {
            self.set(ParamId::GlassAngleLeft, left);
            self.set(ParamId::GlassAngleRight, right);
        }
        if self.auto_rotate {
            let y = self.get(ParamId::CameraRotationY) + self.config.animation.auto_rotate_speed;
            self.set(ParamId::CameraRotationY, wrap_degrees(y));
        }
    }

    /// The texture slot a draw should sample, if any.
    pub fn active_texture(&self) -> Option<TextureMode> {
        if !self.texture_enabled {
            return None;
        }
        self.textures
            .get(self.texture_mode)
            .map(|_| self.texture_mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> SceneState {
        SceneState::new(&SceneConfig::default())
    }

    #[test]
    fn starts_closed_with_default_view() {
        let s = state();
        assert_eq!(s.get(ParamId::DoorAngleLeft), 0.0);
        assert_eq!(s.get(ParamId::Zoom), 10.0);
        assert!(!s.door.is_running());
        assert!(s.lighting_enabled);
    }

    #[test]
    fn reset_view_restores_camera_only() {
        let mut s = state();
        s.set(ParamId::CameraRotationX, 40.0);
        s.set(ParamId::Zoom, 20.0);
        s.set(ParamId::DoorAngleLeft, 30.0);
        s.apply(SceneAction::ToggleAutoRotate);
        s.apply(SceneAction::ResetView);
        assert_eq!(s.get(ParamId::CameraRotationX), 0.0);
        assert_eq!(s.get(ParamId::Zoom), 10.0);
        assert_eq!(s.get(ParamId::DoorAngleLeft), 30.0);
        assert!(!s.auto_rotate);
    }

    #[test]
    fn reset_lighting_restores_defaults() {
        let mut s = state();
        s.set(ParamId::AmbientG, 0.9);
        s.set(ParamId::Shininess, 3.0);
        s.apply(SceneAction::ResetLighting);
        assert_eq!(s.light_settings(), LightSettings::default());
    }

    #[test]
    fn auto_rotate_advances_yaw_each_tick() {
        let mut s = state();
        s.apply(SceneAction::ToggleAutoRotate);
        s.tick();
        s.tick();
        assert!((s.get(ParamId::CameraRotationY) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn auto_rotate_wraps() {
        let mut s = state();
        s.set(ParamId::CameraRotationY, 179.8);
        s.apply(SceneAction::ToggleAutoRotate);
        s.tick();
        assert!((s.get(ParamId::CameraRotationY) - -179.7).abs() < 1e-3);
    }

    #[test]
    fn preset_sets_rotation_and_stops_auto_rotate() {
        let mut s = state();
        s.apply(SceneAction::ToggleAutoRotate);
        s.apply(SceneAction::CameraPreset(CameraPreset::Isometric));
        assert_eq!(s.camera().rotation, CameraPreset::Isometric.rotation());
        assert!(!s.auto_rotate);
    }

    #[test]
    fn glass_pair_drives_both_panes() {
        let mut s = state();
        s.apply(SceneAction::StartGlassOpen);
        s.tick();
        let left = s.get(ParamId::GlassAngleLeft);
        assert!(left > 0.0);
        assert_eq!(left, s.get(ParamId::GlassAngleRight));
        assert_eq!(s.get(ParamId::DoorAngleLeft), 0.0);
    }

    #[test]
    fn active_texture_needs_enabled_flag_and_filled_slot() {
        let mut s = state();
        assert_eq!(s.active_texture(), None);
        s.apply(SceneAction::ToggleTexture);
        assert_eq!(s.active_texture(), Some(TextureMode::Checkerboard));
        s.apply(SceneAction::SetTextureMode(TextureMode::Image));
        assert_eq!(s.active_texture(), None);
    }
}
