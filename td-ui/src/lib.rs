use std::ops::RangeInclusive;

use bevy::app::Plugin;
use bevy::prelude::*;
use bevy_egui::{
    EguiContexts, EguiPlugin, EguiPrimaryContextPass,
    egui::{self},
};
use td_scene::{CameraPreset, ParamId, SceneAction, SceneState, TextureMode};
use td_utils::{PerfTimings, UiState};
use tracing::debug;

const PANEL_WIDTH: f32 = 280.0;
const UNBOUNDED: RangeInclusive<f32> = -1000.0..=1000.0;

const DOOR_PARAMS: [ParamId; 6] = [
    ParamId::DoorAngleLeft,
    ParamId::DoorAngleRight,
    ParamId::HandleAngleLeft,
    ParamId::HandleAngleRight,
    ParamId::GlassAngleLeft,
    ParamId::GlassAngleRight,
];

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut bevy::app::App) {
        app.add_plugins(EguiPlugin::default())
            .add_systems(EguiPrimaryContextPass, control_panel);
    }
}

fn slider_range(id: ParamId) -> RangeInclusive<f32> {
    id.spec().range.unwrap_or(UNBOUNDED)
}

fn param_slider(ui: &mut egui::Ui, state: &mut SceneState, id: ParamId) {
    let spec = id.spec();
    let format = spec.format;
    ui.add(
        egui::Slider::new(state.param_mut(id), slider_range(id))
            .text(spec.label)
            .custom_formatter(move |v, _| format.format(v as f32)),
    );
}

fn action_button(ui: &mut egui::Ui, state: &mut SceneState, label: &str, action: SceneAction) {
    if ui.button(label).clicked() {
        debug!(button = label, ?action, "panel action");
        state.apply(action);
    }
}

fn action_buttons(ui: &mut egui::Ui, state: &mut SceneState, buttons: &[(&str, SceneAction)]) {
    ui.horizontal_wrapped(|ui| {
        for &(label, action) in buttons {
            action_button(ui, state, label, action);
        }
    });
}

fn control_panel(
    mut contexts: EguiContexts,
    mut ui_state: ResMut<UiState>,
    mut state: ResMut<SceneState>,
    mut timings: ResMut<PerfTimings>,
) {
    let start = std::time::Instant::now();
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    if !ui_state.panel_open {
        ui_state.pointer_over_ui = false;
        ui_state.keyboard_captured = false;
        return;
    }

    let state = &mut *state;
    egui::SidePanel::left("door_controls")
        .default_width(PANEL_WIDTH)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Twin Door");
                ui.label(format!("{:.1} ms/frame", timings.frame_delta_ms));

                ui.collapsing("Doors", |ui| {
                    for id in DOOR_PARAMS {
                        param_slider(ui, state, id);
                    }
                    action_buttons(
                        ui,
                        state,
                        &[
                            ("Push open", SceneAction::StartPushOpen),
                            ("Stop open", SceneAction::StopPushOpen),
                            ("Close", SceneAction::StartClose),
                            ("Stop close", SceneAction::StopClose),
                        ],
                    );
                    action_buttons(
                        ui,
                        state,
                        &[
                            ("Open glass", SceneAction::StartGlassOpen),
                            ("Stop glass open", SceneAction::StopGlassOpen),
                            ("Close glass", SceneAction::StartGlassClose),
                            ("Stop glass close", SceneAction::StopGlassClose),
                        ],
                    );
                });

                ui.collapsing("Camera", |ui| {
                    for id in ParamId::CAMERA {
                        param_slider(ui, state, id);
                    }
                    ui.checkbox(&mut state.auto_rotate, "Auto rotate");
                    ui.horizontal_wrapped(|ui| {
                        for preset in CameraPreset::ALL {
                            action_button(
                                ui,
                                state,
                                preset.label(),
                                SceneAction::CameraPreset(preset),
                            );
                        }
                    });
                    action_button(ui, state, "Reset view", SceneAction::ResetView);
                });

                ui.collapsing("Lighting", |ui| {
                    ui.checkbox(&mut state.lighting_enabled, "Enabled");
                    for id in ParamId::LIGHTING {
                        param_slider(ui, state, id);
                    }
                    action_button(ui, state, "Reset lighting", SceneAction::ResetLighting);
                });

                ui.collapsing("Texture", |ui| {
                    ui.checkbox(&mut state.texture_enabled, "Enabled");
                    for mode in TextureMode::ALL {
                        let available = state.textures.get(mode).is_some();
                        ui.add_enabled_ui(available, |ui| {
                            ui.radio_value(&mut state.texture_mode, mode, mode.label());
                        });
                    }
                    if !state.textures.has_image() {
                        ui.label("No image loaded (--texture <path>)");
                    }
                });
            });
        });

    ui_state.pointer_over_ui = ctx.is_pointer_over_area() || ctx.wants_pointer_input();
    ui_state.keyboard_captured = ctx.wants_keyboard_input();
    timings.ui_ms = start.elapsed().as_secs_f32() * 1000.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_covers_every_parameter_once() {
        let mut shown: Vec<ParamId> = DOOR_PARAMS
            .iter()
            .chain(ParamId::CAMERA.iter())
            .chain(ParamId::LIGHTING.iter())
            .copied()
            .collect();
        shown.sort_by_key(|id| id.index());
        assert_eq!(shown, ParamId::ALL.to_vec());
    }

    #[test]
    fn sliders_use_declared_ranges() {
        assert_eq!(slider_range(ParamId::Zoom), 3.0..=30.0);
        assert_eq!(slider_range(ParamId::Shininess), 1.0..=200.0);
    }
}
