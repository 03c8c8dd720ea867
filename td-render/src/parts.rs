use std::collections::HashMap;

use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;
use td_scene::{MeshData, PartId, SceneGraph, SceneState, TextureMode};
use tracing::{debug, info};

use crate::components::{CurrentFrame, ScenePiece, SceneRoot};
use crate::lighting::{reflectance_from_specular, roughness_from_shininess};
use crate::textures::SceneTextures;

/// Sort-distance step between consecutive transparent parts. Larger than
/// any depth inside the scene so the declared order always wins.
const PAINTER_BIAS_STEP: f32 = 200.0;

struct PartMaterial {
    handle: Handle<StandardMaterial>,
    textured: bool,
}

#[derive(Resource, Default)]
pub struct PartMaterials {
    by_part: HashMap<PartId, PartMaterial>,
}

pub fn mesh_from_data(data: &MeshData) -> Mesh {
    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, data.positions.clone());
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, data.normals.clone());
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, data.colors.clone());
    if let Some(uvs) = &data.uvs {
        mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs.clone());
    }
    mesh.insert_indices(Indices::U32(data.indices.clone()));
    mesh
}

/// Transparent parts sort by view depth plus this bias; opaque parts get 0.
pub fn painter_bias(id: PartId) -> f32 {
    PartId::TRANSPARENT_ORDER
        .iter()
        .position(|&p| p == id)
        .map(|i| (i + 1) as f32 * PAINTER_BIAS_STEP)
        .unwrap_or(0.0)
}

fn part_material(id: PartId) -> StandardMaterial {
    let transparent = id.is_transparent();
    StandardMaterial {
        base_color: Color::WHITE,
        alpha_mode: if transparent {
            AlphaMode::Blend
        } else {
            AlphaMode::Opaque
        },
        // Glass shows its back faces through the front.
        cull_mode: if transparent {
            None
        } else {
            Some(bevy::render::render_resource::Face::Back)
        },
        double_sided: transparent,
        depth_bias: painter_bias(id),
        ..default()
    }
}

/// Uploads every piece once. Animation only ever touches transforms.
pub fn spawn_scene_parts(
    mut commands: Commands,
    graph: Res<SceneGraph>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut part_materials: ResMut<PartMaterials>,
) {
    let root = commands
        .spawn((
            Name::new("DoorScene"),
            SceneRoot,
            Transform::default(),
            Visibility::Visible,
        ))
        .id();

    for part in graph.parts() {
        let handle = materials.add(part_material(part.id));
        part_materials.by_part.insert(
            part.id,
            PartMaterial {
                handle: handle.clone(),
                textured: part.pieces.iter().all(|p| p.mesh.is_textured()),
            },
        );

        for (index, piece) in part.pieces.iter().enumerate() {
            let mesh = meshes.add(mesh_from_data(&piece.mesh));
            commands.entity(root).with_children(|parent| {
                parent.spawn((
                    Name::new(format!("{}[{index}]", part.id.label())),
                    ScenePiece {
                        part: part.id,
                        index,
                        local: piece.local,
                    },
                    Mesh3d(mesh),
                    MeshMaterial3d(handle.clone()),
                    Transform::from_matrix(piece.local),
                ));
            });
        }
    }
    info!(pieces = graph.piece_count(), "spawned door scene");
}

pub fn sync_piece_transforms(
    frame: Res<CurrentFrame>,
    mut pieces: Query<(&ScenePiece, &mut Transform)>,
) {
    let Some(frame) = frame.0.as_ref() else {
        return;
    };
    for (piece, mut transform) in &mut pieces {
        let next = Transform::from_matrix(frame.world(piece.part, piece.local));
        if *transform != next {
            *transform = next;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialSync {
    lit: bool,
    texture: Option<TextureMode>,
    texture_revision: u32,
    roughness: f32,
    reflectance: f32,
}

/// Pushes lighting and texture state into the part materials when it changes.
pub fn sync_materials(
    state: Res<SceneState>,
    textures: Res<SceneTextures>,
    part_materials: Res<PartMaterials>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut last: Local<Option<MaterialSync>>,
) {
    let light = state.light_settings();
    let key = MaterialSync {
        lit: state.lighting_enabled,
        texture: state.active_texture(),
        texture_revision: textures.revision(),
        roughness: roughness_from_shininess(light.shininess),
        reflectance: reflectance_from_specular(Vec3::from_array(light.specular)),
    };
    if last.as_ref() == Some(&key) {
        return;
    }

    for entry in part_materials.by_part.values() {
        let Some(material) = materials.get_mut(&entry.handle) else {
            continue;
        };
        material.unlit = !key.lit;
        material.perceptual_roughness = key.roughness;
        material.reflectance = key.reflectance;
        material.base_color_texture = if entry.textured {
            key.texture.and_then(|mode| textures.handle(mode))
        } else {
            None
        };
    }
    debug!(?key, "materials updated");
    *last = Some(key);
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::render::mesh::VertexAttributeValues;
    use td_scene::mesh::{box_mesh, textured_box_mesh};

    #[test]
    fn mesh_conversion_keeps_every_stream() {
        let data = textured_box_mesh([1.0, 2.0, 3.0], [0.5, 0.5, 0.5, 1.0]);
        let mesh = mesh_from_data(&data);
        assert_eq!(mesh.count_vertices(), data.vertex_count());
        assert!(mesh.attribute(Mesh::ATTRIBUTE_UV_0).is_some());
        match mesh.attribute(Mesh::ATTRIBUTE_COLOR) {
            Some(VertexAttributeValues::Float32x4(colors)) => assert_eq!(colors, &data.colors),
            other => panic!("unexpected color attribute {other:?}"),
        }
        assert_eq!(mesh.indices().map(|i| i.len()), Some(data.index_count()));
    }

    #[test]
    fn untextured_mesh_has_no_uvs() {
        let mesh = mesh_from_data(&box_mesh([1.0, 1.0, 1.0], [1.0; 4]));
        assert!(mesh.attribute(Mesh::ATTRIBUTE_UV_0).is_none());
    }

    #[test]
    fn painter_bias_grows_along_declared_order() {
        let biases: Vec<f32> = PartId::TRANSPARENT_ORDER
            .iter()
            .map(|&id| painter_bias(id))
            .collect();
        assert!(biases.windows(2).all(|w| w[0] < w[1]));
        for id in PartId::OPAQUE {
            assert_eq!(painter_bias(id), 0.0);
        }
    }
}
