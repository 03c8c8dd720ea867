//! Per-frame matrix composition.
//!
//! Everything composes left to right in world order: `parent * local`.
//! Angles arrive in degrees from [`SceneState`] and are converted here.

use bevy::math::{Mat3, Mat4, Vec3};

use crate::camera::projection_matrix;
use crate::params::ParamId;
use crate::scene::{DoorGeometry, PartId};
use crate::state::SceneState;

/// Rotation `rotation` about the point `pivot`: `T(p) * R * T(-p)`.
pub fn pivot_rotation(pivot: Vec3, rotation: Mat4) -> Mat4 {
    Mat4::from_translation(pivot) * rotation * Mat4::from_translation(-pivot)
}

/// Places a door panel centered on its hinge line, swung by `angle_deg`
/// around Y. `side` is `1.0` for the left door and `-1.0` for the right.
pub fn hinge_transform(geometry: &DoorGeometry, side: f32, angle_deg: f32) -> Mat4 {
    let hinge_x = if side > 0.0 {
        geometry.hinge_x_left
    } else {
        geometry.hinge_x_right
    };
    Mat4::from_translation(Vec3::new(hinge_x, 0.0, 0.0))
        * Mat4::from_rotation_y((side * angle_deg).to_radians())
        * Mat4::from_translation(Vec3::new(
            side * geometry.door_width / 2.0,
            geometry.door_center_y,
            0.0,
        ))
}

fn handle_transform(geometry: &DoorGeometry, side: f32, door_deg: f32, handle_deg: f32) -> Mat4 {
    let hinge_x = if side > 0.0 {
        geometry.hinge_x_left
    } else {
        geometry.hinge_x_right
    };
    let pivot = Vec3::new(0.0, geometry.handle_pivot_y, 0.0);
    Mat4::from_translation(Vec3::new(hinge_x, 0.0, 0.0))
        * Mat4::from_rotation_y((side * door_deg).to_radians())
        * Mat4::from_translation(Vec3::new(
            side * geometry.handle_pos_x,
            geometry.door_center_y,
            geometry.handle_pos_z,
        ))
        * pivot_rotation(pivot, Mat4::from_rotation_z((side * handle_deg).to_radians()))
}

fn pane_transform(geometry: &DoorGeometry, hinge_x: f32, tilt_deg: f32) -> Mat4 {
    pivot_rotation(
        Vec3::new(hinge_x, geometry.pane_hinge_y, 0.0),
        Mat4::from_rotation_x(tilt_deg.to_radians()),
    )
}

/// Matrices for one frame: camera plus the animated transform of each part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTransforms {
    pub view: Mat4,
    pub projection: Mat4,
    parts: [Mat4; PartId::ALL.len()],
}

impl FrameTransforms {
    pub fn compose(geometry: &DoorGeometry, state: &SceneState, aspect: f32) -> Self {
        let door_l = state.get(ParamId::DoorAngleLeft);
        let door_r = state.get(ParamId::DoorAngleRight);
        let left_door = hinge_transform(geometry, 1.0, door_l);
        let right_door = hinge_transform(geometry, -1.0, door_r);

        let mut parts = [Mat4::IDENTITY; PartId::ALL.len()];
        for id in PartId::ALL {
            parts[id.index()] = match id {
                PartId::OuterFrame
                | PartId::InnerFrame
                | PartId::Walls
                | PartId::GlassFrameTrim
                | PartId::OuterGlass => Mat4::IDENTITY,
                PartId::LeftDoor | PartId::LeftDoorStrips => left_door,
                PartId::RightDoor | PartId::RightDoorStrips => right_door,
                PartId::LeftHandle => {
                    handle_transform(geometry, 1.0, door_l, state.get(ParamId::HandleAngleLeft))
                }
                PartId::RightHandle => {
                    handle_transform(geometry, -1.0, door_r, state.get(ParamId::HandleAngleRight))
                }
                PartId::LeftGlassPane => pane_transform(
                    geometry,
                    -geometry.pane_center_x,
                    state.get(ParamId::GlassAngleLeft),
                ),
                PartId::RightGlassPane => pane_transform(
                    geometry,
                    geometry.pane_center_x,
                    state.get(ParamId::GlassAngleRight),
                ),
            };
        }

        Self {
            view: state.camera().view_matrix(),
            projection: projection_matrix(&state.config().camera, aspect),
            parts,
        }
    }

    /// The animated transform shared by every piece of `id`.
    pub fn part_transform(&self, id: PartId) -> Mat4 {
        self.parts[id.index()]
    }

    /// World matrix of one piece.
    pub fn world(&self, id: PartId, local: Mat4) -> Mat4 {
        self.part_transform(id) * local
    }

    pub fn model_view(&self, world: Mat4) -> Mat4 {
        self.view * world
    }

    pub fn mvp(&self, world: Mat4) -> Mat4 {
        self.projection * self.view * world
    }
}

/// Inverse-transpose of the upper 3x3 of a model-view matrix.
pub fn normal_matrix(model_view: Mat4) -> Mat3 {
    Mat3::from_mat4(model_view).inverse().transpose()
}
