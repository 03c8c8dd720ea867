use bevy::prelude::*;
use bevy::render::camera::{PerspectiveProjection, Projection};
use td_scene::SceneState;

use crate::components::CurrentFrame;

#[derive(Component)]
pub struct SceneCamera;

pub fn spawn_camera(mut commands: Commands, state: Res<SceneState>) {
    let config = &state.config().camera;
    let view = state.camera().view_matrix();
    commands.spawn((
        Name::new("SceneCamera"),
        Camera3d::default(),
        SceneCamera,
        Projection::Perspective(PerspectiveProjection {
            fov: config.fov_deg.to_radians(),
            near: config.near,
            far: config.far,
            ..default()
        }),
        Transform::from_matrix(view.inverse()),
    ));
}

/// The orbit rotations live in the view matrix; the camera entity takes its
/// inverse as a world transform.
pub fn sync_camera(
    frame: Res<CurrentFrame>,
    mut cameras: Query<&mut Transform, With<SceneCamera>>,
) {
    let Some(frame) = frame.0.as_ref() else {
        return;
    };
    let world_from_view = Transform::from_matrix(frame.view.inverse());
    for mut transform in &mut cameras {
        *transform = world_from_view;
    }
}
