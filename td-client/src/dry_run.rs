//! Headless frames against a device that only logs what it is asked to do.

use bevy::app::AppExit;
use td_scene::{
    DeviceCapabilities, DrawUniforms, GraphicsDevice, MeshData, ParamId, RenderError, RenderPass,
    Renderer, SceneAction, SceneConfig, SceneGraph, SceneState,
};
use tracing::{debug, error, info, trace};

const ASPECT: f32 = 16.0 / 9.0;
const LOG_EVERY: u32 = 30;

#[derive(Debug, Clone, Copy)]
pub struct TraceBuffers {
    id: usize,
    indices: usize,
}

#[derive(Debug, Default)]
pub struct TraceDevice {
    uploads: usize,
    draws: u64,
    transparent_draws: u64,
    pass: Option<RenderPass>,
}

impl GraphicsDevice for TraceDevice {
    type Buffers = TraceBuffers;

    fn capabilities(&self) -> DeviceCapabilities {
        DeviceCapabilities {
            depth_test: true,
            blending: true,
        }
    }

    fn upload(&mut self, mesh: &MeshData) -> TraceBuffers {
        let id = self.uploads;
        self.uploads += 1;
        trace!(id, vertices = mesh.vertex_count(), textured = mesh.is_textured(), "upload");
        TraceBuffers {
            id,
            indices: mesh.index_count(),
        }
    }

    fn begin_pass(&mut self, pass: RenderPass) {
        self.pass = Some(pass);
    }

    fn draw(&mut self, buffers: &TraceBuffers, uniforms: &DrawUniforms) {
        self.draws += 1;
        if self.pass == Some(RenderPass::Transparent) {
            self.transparent_draws += 1;
        }
        trace!(
            buffer = buffers.id,
            indices = buffers.indices,
            lit = uniforms.lighting.enabled,
            texture = ?uniforms.texture,
            "draw"
        );
    }
}

#[derive(Debug)]
pub struct DryRunReport {
    pub uploads: usize,
    pub draws: u64,
    pub transparent_draws: u64,
    pub door_angle: f32,
    pub glass_angle: f32,
}

pub fn simulate(
    config: &SceneConfig,
    frames: u32,
    actions: &[SceneAction],
) -> Result<DryRunReport, RenderError> {
    let graph = SceneGraph::build(&config.layout);
    let mut state = SceneState::new(config);
    let mut renderer = Renderer::new(TraceDevice::default(), &graph)?;

    for &action in actions {
        state.apply(action);
    }
    for frame in 0..frames {
        state.tick();
        renderer.render_frame(&graph, &state, ASPECT);
        if frame % LOG_EVERY == 0 {
            debug!(
                frame,
                door = state.get(ParamId::DoorAngleLeft),
                glass = state.get(ParamId::GlassAngleLeft),
                "dry run"
            );
        }
    }

    let device = renderer.into_device();
    Ok(DryRunReport {
        uploads: device.uploads,
        draws: device.draws,
        transparent_draws: device.transparent_draws,
        door_angle: state.get(ParamId::DoorAngleLeft),
        glass_angle: state.get(ParamId::GlassAngleLeft),
    })
}

pub fn run(config: &SceneConfig, frames: u32, actions: &[SceneAction]) -> AppExit {
    match simulate(config, frames, actions) {
        Ok(report) => {
            info!(
                frames,
                uploads = report.uploads,
                draws = report.draws,
                transparent_draws = report.transparent_draws,
                door_angle = report.door_angle,
                glass_angle = report.glass_angle,
                "dry run finished"
            );
            AppExit::Success
        }
        Err(err) => {
            error!("{err}");
            AppExit::error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use td_scene::PartId;

    #[test]
    fn opening_for_a_full_run_reaches_the_target() {
        let config = SceneConfig::default();
        let report = simulate(&config, 120, &[SceneAction::StartPushOpen]).unwrap();
        assert_eq!(report.door_angle, config.animation.push_target_angle);
        assert_eq!(report.glass_angle, 0.0);
    }

    #[test]
    fn uploads_once_and_draws_every_frame() {
        let config = SceneConfig::default();
        let graph = SceneGraph::build(&config.layout);
        let report = simulate(&config, 10, &[]).unwrap();
        assert_eq!(report.uploads, graph.piece_count());
        assert_eq!(report.draws, 10 * graph.piece_count() as u64);

        let transparent_pieces: usize = PartId::TRANSPARENT_ORDER
            .iter()
            .map(|&id| graph.part(id).pieces.len())
            .sum();
        assert_eq!(report.transparent_draws, 10 * transparent_pieces as u64);
    }
}
