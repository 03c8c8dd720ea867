use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use td_scene::camera::wrap_degrees;
use td_scene::{CameraPreset, ParamId, SceneAction, SceneState};
use td_utils::UiState;

#[derive(Resource)]
pub struct OrbitSettings {
    pub degrees_per_pixel: f32,
    /// Zoom change per scroll line.
    pub zoom_per_line: f32,
    pub pixels_per_line: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            degrees_per_pixel: 0.4,
            zoom_per_line: 0.5,
            pixels_per_line: 40.0,
        }
    }
}

pub fn action_for_key(key: KeyCode) -> Option<SceneAction> {
    let action = match key {
        KeyCode::KeyO => SceneAction::StartPushOpen,
        KeyCode::KeyC => SceneAction::StartClose,
        KeyCode::KeyP => SceneAction::StopDoor,
        KeyCode::KeyG => SceneAction::StartGlassOpen,
        KeyCode::KeyH => SceneAction::StartGlassClose,
        KeyCode::Space => SceneAction::ToggleAutoRotate,
        KeyCode::KeyR => SceneAction::ResetView,
        KeyCode::KeyL => SceneAction::ResetLighting,
        KeyCode::KeyT => SceneAction::ToggleTexture,
        KeyCode::Digit1 => SceneAction::CameraPreset(CameraPreset::Front),
        KeyCode::Digit2 => SceneAction::CameraPreset(CameraPreset::Back),
        KeyCode::Digit3 => SceneAction::CameraPreset(CameraPreset::Left),
        KeyCode::Digit4 => SceneAction::CameraPreset(CameraPreset::Right),
        KeyCode::Digit5 => SceneAction::CameraPreset(CameraPreset::Top),
        KeyCode::Digit6 => SceneAction::CameraPreset(CameraPreset::Isometric),
        _ => return None,
    };
    Some(action)
}

pub fn keyboard_actions(
    keys: Res<ButtonInput<KeyCode>>,
    mut ui_state: ResMut<UiState>,
    mut state: ResMut<SceneState>,
) {
    if keys.just_pressed(KeyCode::Tab) {
        ui_state.panel_open = !ui_state.panel_open;
    }
    if ui_state.keyboard_captured {
        return;
    }
    for key in keys.get_just_pressed() {
        if let Some(action) = action_for_key(*key) {
            state.apply(action);
        }
    }
}

/// New (rotation X, rotation Y) after a drag of `delta` pixels.
fn orbit(rotation: Vec2, delta: Vec2, settings: &OrbitSettings) -> Vec2 {
    Vec2::new(
        wrap_degrees(rotation.x + delta.y * settings.degrees_per_pixel),
        wrap_degrees(rotation.y + delta.x * settings.degrees_per_pixel),
    )
}

fn zoom_after_scroll(zoom: f32, lines: f32, settings: &OrbitSettings) -> f32 {
    let next = zoom - lines * settings.zoom_per_line;
    match ParamId::Zoom.spec().range {
        Some(range) => next.clamp(*range.start(), *range.end()),
        None => next,
    }
}

pub fn mouse_orbit(
    buttons: Res<ButtonInput<MouseButton>>,
    mut motion_events: EventReader<MouseMotion>,
    mut wheel_events: EventReader<MouseWheel>,
    ui_state: Res<UiState>,
    settings: Res<OrbitSettings>,
    mut state: ResMut<SceneState>,
) {
    if ui_state.pointer_over_ui {
        motion_events.clear();
        wheel_events.clear();
        return;
    }

    if buttons.pressed(MouseButton::Left) {
        let mut delta = Vec2::ZERO;
        for ev in motion_events.read() {
            delta += ev.delta;
        }
        if delta != Vec2::ZERO {
            let rotation = Vec2::new(
                state.get(ParamId::CameraRotationX),
                state.get(ParamId::CameraRotationY),
            );
            let next = orbit(rotation, delta, &settings);
            state.set(ParamId::CameraRotationX, next.x);
            state.set(ParamId::CameraRotationY, next.y);
        }
    } else {
        motion_events.clear();
    }

    let mut lines = 0.0;
    for ev in wheel_events.read() {
        lines += match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y / settings.pixels_per_line,
        };
    }
    if lines != 0.0 {
        let zoom = zoom_after_scroll(state.get(ParamId::Zoom), lines, &settings);
        state.set(ParamId::Zoom, zoom);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_shortcut_maps_to_an_action() {
        assert_eq!(action_for_key(KeyCode::KeyO), Some(SceneAction::StartPushOpen));
        assert_eq!(action_for_key(KeyCode::KeyC), Some(SceneAction::StartClose));
        assert_eq!(
            action_for_key(KeyCode::Digit6),
            Some(SceneAction::CameraPreset(CameraPreset::Isometric))
        );
        assert_eq!(action_for_key(KeyCode::KeyW), None);
        assert_eq!(action_for_key(KeyCode::Tab), None);
    }

    #[test]
    fn drag_right_yaws_and_drag_down_pitches() {
        let settings = OrbitSettings::default();
        let next = orbit(Vec2::ZERO, Vec2::new(10.0, 5.0), &settings);
        assert!((next.y - 4.0).abs() < 1e-5);
        assert!((next.x - 2.0).abs() < 1e-5);
    }

    #[test]
    fn scrolling_clamps_zoom() {
        let settings = OrbitSettings::default();
        assert_eq!(zoom_after_scroll(10.0, 2.0, &settings), 9.0);
        assert_eq!(zoom_after_scroll(4.0, 100.0, &settings), 3.0);
        assert_eq!(zoom_after_scroll(29.0, -100.0, &settings), 30.0);
    }
}
