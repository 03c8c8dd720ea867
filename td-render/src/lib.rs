use std::path::PathBuf;

use bevy::prelude::*;

mod camera;
mod components;
mod input;
mod lighting;
mod parts;
mod textures;

pub use camera::SceneCamera;
pub use components::{CurrentFrame, SceneLight, ScenePiece, SceneRoot};
pub use input::{OrbitSettings, action_for_key};
pub use lighting::{reflectance_from_specular, roughness_from_shininess};
pub use parts::{mesh_from_data, painter_bias};
pub use textures::{SceneTextures, TextureLoader, decode_texture};

/// Ordering of the per-frame work inside `Update`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneSet {
    Input,
    Animate,
    Compose,
    Sync,
}

/// Draws the door scene held in the `SceneGraph` and `SceneState` resources.
#[derive(Default)]
pub struct RenderPlugin {
    /// Image decoded in the background and bound to the image texture slot.
    pub texture_path: Option<PathBuf>,
}

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::srgb(0.12, 0.12, 0.14)))
            .insert_resource(textures::TextureRequest(self.texture_path.clone()))
            .init_resource::<input::OrbitSettings>()
            .init_resource::<components::CurrentFrame>()
            .init_resource::<parts::PartMaterials>()
            .init_resource::<textures::SceneTextures>()
            .init_resource::<textures::TextureLoader>()
            .configure_sets(
                Update,
                (
                    SceneSet::Input,
                    SceneSet::Animate,
                    SceneSet::Compose,
                    SceneSet::Sync,
                )
                    .chain(),
            )
            .add_systems(
                Startup,
                (
                    textures::setup_checkerboard,
                    parts::spawn_scene_parts.after(textures::setup_checkerboard),
                    camera::spawn_camera,
                    lighting::spawn_light,
                    textures::request_initial_texture,
                ),
            )
            .add_systems(
                Update,
                (
                    (input::keyboard_actions, input::mouse_orbit).in_set(SceneSet::Input),
                    textures::texture_loader_tick.in_set(SceneSet::Animate),
                    compose_frame.in_set(SceneSet::Compose),
                    (
                        parts::sync_piece_transforms,
                        parts::sync_materials,
                        camera::sync_camera,
                        lighting::sync_lighting,
                    )
                        .in_set(SceneSet::Sync),
                ),
            );
    }
}

fn compose_frame(
    graph: Res<td_scene::SceneGraph>,
    state: Res<td_scene::SceneState>,
    windows: Query<&Window, With<bevy::window::PrimaryWindow>>,
    mut frame: ResMut<CurrentFrame>,
) {
    let aspect = windows
        .iter()
        .next()
        .map(|w| w.width() / w.height().max(1.0))
        .filter(|a| a.is_finite() && *a > 0.0)
        .unwrap_or(1.0);
    frame.0 = Some(td_scene::FrameTransforms::compose(
        graph.geometry(),
        &state,
        aspect,
    ));
}
