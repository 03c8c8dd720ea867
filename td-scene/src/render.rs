//! Draw ordering and the graphics device boundary.

use std::collections::HashMap;

use bevy::math::{Mat3, Mat4};
use tracing::{error, info, trace};

use crate::error::RenderError;
use crate::lighting::LightUniforms;
use crate::mesh::MeshData;
use crate::scene::{PartId, SceneGraph};
use crate::state::SceneState;
use crate::texture::TextureMode;
use crate::transform::{FrameTransforms, normal_matrix};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPass {
    Opaque,
    /// Alpha-blended, drawn after every opaque part.
    Transparent,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawUniforms {
    pub mvp: Mat4,
    pub model_view: Mat4,
    pub normal_matrix: Mat3,
    pub lighting: LightUniforms,
    /// Slot to sample; `None` draws vertex colors only.
    pub texture: Option<TextureMode>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawItem {
    pub part: PartId,
    pub piece: usize,
    pub pass: RenderPass,
    pub uniforms: DrawUniforms,
}

/// Every draw of one frame, in submission order.
#[derive(Debug, Clone, Default)]
pub struct FramePlan {
    pub draws: Vec<DrawItem>,
}

impl FramePlan {
    pub fn parts(&self) -> Vec<PartId> {
        let mut parts: Vec<PartId> = Vec::new();
        for draw in &self.draws {
            if parts.last() != Some(&draw.part) {
                parts.push(draw.part);
            }
        }
        parts
    }
}

/// Opaque parts first, then transparent parts in their fixed painter's order.
///
/// TODO: painter's order by declaration breaks when the camera looks through
/// one transparent part at another drawn earlier; depth-sort the transparent
/// bundles per frame or move to weighted blended OIT.
pub fn plan_frame(graph: &SceneGraph, state: &SceneState, aspect: f32) -> FramePlan {
    let frame = FrameTransforms::compose(graph.geometry(), state, aspect);
    let lighting = state.light_uniforms();
    let texture = state.active_texture();

    let order = PartId::OPAQUE
        .iter()
        .map(|&id| (id, RenderPass::Opaque))
        .chain(
            PartId::TRANSPARENT_ORDER
                .iter()
                .map(|&id| (id, RenderPass::Transparent)),
        );

    let mut draws = Vec::with_capacity(graph.piece_count());
    for (id, pass) in order {
        for (index, piece) in graph.part(id).pieces.iter().enumerate() {
            let world = frame.world(id, piece.local);
            let model_view = frame.model_view(world);
            draws.push(DrawItem {
                part: id,
                piece: index,
                pass,
                uniforms: DrawUniforms {
                    mvp: frame.mvp(world),
                    model_view,
                    normal_matrix: normal_matrix(model_view),
                    lighting,
                    texture: texture.filter(|_| piece.mesh.is_textured()),
                },
            });
        }
    }
    FramePlan { draws }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceCapabilities {
    pub depth_test: bool,
    pub blending: bool,
}

/// The drawing surface. Implementations own their buffer representation.
pub trait GraphicsDevice {
    type Buffers;

    fn capabilities(&self) -> DeviceCapabilities;
    fn upload(&mut self, mesh: &MeshData) -> Self::Buffers;
    fn begin_pass(&mut self, _pass: RenderPass) {}
    fn draw(&mut self, buffers: &Self::Buffers, uniforms: &DrawUniforms);
}

pub struct Renderer<D: GraphicsDevice> {
    device: D,
    buffers: HashMap<(PartId, usize), D::Buffers>,
}

impl<D: GraphicsDevice> Renderer<D> {
    /// Uploads every piece of `graph` once.
    pub fn new(mut device: D, graph: &SceneGraph) -> Result<Self, RenderError> {
        let caps = device.capabilities();
        let missing = if !caps.depth_test {
            Some("depth test")
        } else if !caps.blending {
            Some("blending")
        } else {
            None
        };
        if let Some(name) = missing {
            error!("graphics device lacks {name}; not rendering");
            return Err(RenderError::MissingCapability(name));
        }

        let mut buffers = HashMap::with_capacity(graph.piece_count());
        for part in graph.parts() {
            for (index, piece) in part.pieces.iter().enumerate() {
                buffers.insert((part.id, index), device.upload(&piece.mesh));
            }
        }
        info!(buffers = buffers.len(), "uploaded scene geometry");
        Ok(Self { device, buffers })
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn into_device(self) -> D {
        self.device
    }

    /// Draws one frame and returns how many draws were issued.
    pub fn render_frame(&mut self, graph: &SceneGraph, state: &SceneState, aspect: f32) -> usize {
        let plan = plan_frame(graph, state, aspect);
        let mut pass = None;
        let mut issued = 0;
        for item in &plan.draws {
            if pass != Some(item.pass) {
                self.device.begin_pass(item.pass);
                pass = Some(item.pass);
            }
            // Pieces are uploaded at construction; a miss means a different graph.
            let Some(buffers) = self.buffers.get(&(item.part, item.piece)) else {
                trace!(part = item.part.label(), piece = item.piece, "no buffers, skipped");
                continue;
            };
            self.device.draw(buffers, &item.uniforms);
            issued += 1;
        }
        issued
    }
}
