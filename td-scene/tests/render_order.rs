use std::collections::HashMap;

use td_scene::mesh::MeshData;
use td_scene::{
    DeviceCapabilities, DrawUniforms, GraphicsDevice, ParamId, PartId, RenderPass, Renderer,
    SceneAction, SceneConfig, SceneGraph, SceneState, TextureImage, TextureMode, plan_frame,
};

/// Records uploads and the sequence of draws by buffer id.
#[derive(Default)]
struct RecordingDevice {
    uploads: usize,
    draws: Vec<(usize, DrawUniforms)>,
    passes: Vec<RenderPass>,
}

impl GraphicsDevice for RecordingDevice {
    type Buffers = usize;

    fn capabilities(&self) -> DeviceCapabilities {
        DeviceCapabilities {
            depth_test: true,
            blending: true,
        }
    }

    fn upload(&mut self, _mesh: &MeshData) -> usize {
        self.uploads += 1;
        self.uploads
    }

    fn begin_pass(&mut self, pass: RenderPass) {
        self.passes.push(pass);
    }

    fn draw(&mut self, buffers: &usize, uniforms: &DrawUniforms) {
        self.draws.push((*buffers, *uniforms));
    }
}

fn scene() -> (SceneGraph, SceneState) {
    let config = SceneConfig::default();
    (SceneGraph::build(&config.layout), SceneState::new(&config))
}

#[test]
fn transparent_parts_follow_opaque_in_declared_order() {
    let (graph, state) = scene();
    let plan = plan_frame(&graph, &state, 16.0 / 9.0);

    let expected: Vec<PartId> = PartId::OPAQUE
        .iter()
        .chain(PartId::TRANSPARENT_ORDER.iter())
        .copied()
        .collect();
    assert_eq!(plan.parts(), expected);

    let first_transparent = plan
        .draws
        .iter()
        .position(|d| d.pass == RenderPass::Transparent)
        .unwrap();
    assert!(plan.draws[..first_transparent].iter().all(|d| d.pass == RenderPass::Opaque));
    assert!(plan.draws[first_transparent..].iter().all(|d| d.pass == RenderPass::Transparent));
}

#[test]
fn geometry_is_uploaded_once_across_frames() {
    let (graph, mut state) = scene();
    let mut renderer = Renderer::new(RecordingDevice::default(), &graph).unwrap();
    state.apply(SceneAction::StartPushOpen);
    for _ in 0..25 {
        state.tick();
        renderer.render_frame(&graph, &state, 1.0);
    }
    let device = renderer.into_device();
    assert_eq!(device.uploads, graph.piece_count());
    assert_eq!(device.draws.len(), 25 * graph.piece_count());

    let mut per_buffer: HashMap<usize, usize> = HashMap::new();
    for (id, _) in &device.draws {
        *per_buffer.entry(*id).or_default() += 1;
    }
    assert_eq!(per_buffer.len(), graph.piece_count());
    assert!(per_buffer.values().all(|&n| n == 25));
}

#[test]
fn draw_uniforms_reflect_current_parameters() {
    let (graph, mut state) = scene();
    let door_draw = |state: &SceneState| {
        plan_frame(&graph, state, 1.0)
            .draws
            .into_iter()
            .find(|d| d.part == PartId::LeftDoor)
            .unwrap()
    };
    let closed = door_draw(&state);
    state.set(ParamId::DoorAngleLeft, 50.0);
    let open = door_draw(&state);
    assert_ne!(closed.uniforms.mvp, open.uniforms.mvp);
    assert_eq!(closed.uniforms.model_view.w_axis.w, 1.0);

    state.apply(SceneAction::ToggleLighting);
    assert!(!door_draw(&state).uniforms.lighting.enabled);
}

#[test]
fn missing_image_draws_untextured() {
    let (graph, mut state) = scene();
    state.apply(SceneAction::ToggleTexture);
    state.apply(SceneAction::SetTextureMode(TextureMode::Image));

    let mut renderer = Renderer::new(RecordingDevice::default(), &graph).unwrap();
    renderer.render_frame(&graph, &state, 1.0);
    assert!(renderer.device().draws.iter().all(|(_, u)| u.texture.is_none()));

    state.textures.bind_image(TextureImage {
        width: 2,
        height: 2,
        rgba: vec![128; 16],
    });
    let plan = plan_frame(&graph, &state, 1.0);
    let door = plan.draws.iter().find(|d| d.part == PartId::LeftDoor).unwrap();
    assert_eq!(door.uniforms.texture, Some(TextureMode::Image));
}
