use bevy::prelude::*;
use td_scene::{FrameTransforms, PartId};

#[derive(Component)]
pub struct SceneRoot;

/// One box of a part. `local` is the fixed offset inside the part.
#[derive(Component, Debug, Clone, Copy)]
pub struct ScenePiece {
    pub part: PartId,
    pub index: usize,
    pub local: Mat4,
}

#[derive(Component)]
pub struct SceneLight;

/// Matrices composed this frame, read by every sync system.
#[derive(Resource, Default)]
pub struct CurrentFrame(pub Option<FrameTransforms>);
