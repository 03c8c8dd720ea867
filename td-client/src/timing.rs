//! Wall-clock spans of the frame and of the scene update systems.

use std::time::Instant;

use bevy::prelude::*;
use td_utils::PerfTimings;

/// Start instants of the spans currently open.
#[derive(Resource, Default)]
pub struct FrameTimingState {
    frame: Option<Instant>,
    update: Option<Instant>,
}

fn elapsed_ms(start: Instant) -> f32 {
    start.elapsed().as_secs_f32() * 1000.0
}

pub fn frame_timing_start(
    time: Res<Time>,
    mut state: ResMut<FrameTimingState>,
    mut timings: ResMut<PerfTimings>,
) {
    state.frame = Some(Instant::now());
    timings.frame_delta_ms = time.delta_secs() * 1000.0;
}

pub fn frame_timing_end(mut state: ResMut<FrameTimingState>, mut timings: ResMut<PerfTimings>) {
    if let Some(start) = state.frame.take() {
        timings.main_thread_ms = elapsed_ms(start);
    }
}

pub fn update_timing_start(mut state: ResMut<FrameTimingState>) {
    state.update = Some(Instant::now());
}

pub fn update_timing_end(mut state: ResMut<FrameTimingState>, mut timings: ResMut<PerfTimings>) {
    if let Some(start) = state.update.take() {
        timings.update_ms = elapsed_ms(start);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::ecs::system::RunSystemOnce;

    use super::*;

    #[test]
    fn update_span_is_recorded_and_closed() {
        let mut world = World::new();
        world.init_resource::<FrameTimingState>();
        world.init_resource::<PerfTimings>();
        world.run_system_once(update_timing_start).unwrap();
        std::thread::sleep(Duration::from_millis(2));
        world.run_system_once(update_timing_end).unwrap();
        assert!(world.resource::<PerfTimings>().update_ms >= 2.0);
        assert!(world.resource::<FrameTimingState>().update.is_none());
    }

    #[test]
    fn ending_without_a_start_leaves_timings_alone() {
        let mut world = World::new();
        world.init_resource::<FrameTimingState>();
        world.init_resource::<PerfTimings>();
        world.run_system_once(frame_timing_end).unwrap();
        assert_eq!(world.resource::<PerfTimings>().main_thread_ms, 0.0);
    }
}
