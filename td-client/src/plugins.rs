use bevy::prelude::*;
use td_render::SceneSet;
use td_scene::{SceneConfig, SceneGraph, SceneState};
use td_utils::{PerfTimings, UiState};

#[cfg(feature = "perf_timing")]
use crate::timing;

pub struct ClientCorePlugin {
    config: SceneConfig,
}

impl ClientCorePlugin {
    pub fn new(config: SceneConfig) -> Self {
        Self { config }
    }
}

impl Plugin for ClientCorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SceneGraph::build(&self.config.layout))
            .insert_resource(SceneState::new(&self.config))
            .insert_resource(UiState::default())
            .insert_resource(PerfTimings::default())
            .add_systems(Update, advance_animation.in_set(SceneSet::Animate));
    }
}

/// One animation step per displayed frame.
fn advance_animation(mut state: ResMut<SceneState>) {
    state.tick();
}

pub struct ClientTimingPlugin;

#[cfg(feature = "perf_timing")]
impl Plugin for ClientTimingPlugin {
    fn build(&self, app: &mut App) {
        use bevy::diagnostic::FrameTimeDiagnosticsPlugin;

        app.add_plugins(FrameTimeDiagnosticsPlugin::default())
            .init_resource::<timing::FrameTimingState>()
            .add_systems(First, timing::frame_timing_start)
            .add_systems(Update, timing::update_timing_start.before(SceneSet::Input))
            .add_systems(Update, timing::update_timing_end.after(SceneSet::Sync))
            .add_systems(Last, timing::frame_timing_end);
    }
}

#[cfg(not(feature = "perf_timing"))]
impl Plugin for ClientTimingPlugin {
    fn build(&self, _app: &mut App) {}
}
