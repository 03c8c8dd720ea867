use bevy::prelude::*;
use td_scene::SceneState;

use crate::components::SceneLight;

const POINT_LIGHT_LUMENS: f32 = 1_000_000.0;
const AMBIENT_BRIGHTNESS: f32 = 500.0;
const MIN_ROUGHNESS: f32 = 0.089;

/// Maps a Phong exponent onto perceptual roughness.
pub fn roughness_from_shininess(shininess: f32) -> f32 {
    let alpha = (2.0 / (shininess.max(0.0) + 2.0)).sqrt();
    alpha.sqrt().clamp(MIN_ROUGHNESS, 1.0)
}

/// Mean specular strength scaled onto the 0..1 reflectance range, where 0.5
/// is the usual dielectric default.
pub fn reflectance_from_specular(specular: Vec3) -> f32 {
    (specular.element_sum() / 3.0 * 0.5).clamp(0.0, 1.0)
}

fn rgb(c: [f32; 3]) -> Color {
    Color::linear_rgb(c[0], c[1], c[2])
}

pub fn spawn_light(mut commands: Commands, state: Res<SceneState>) {
    let settings = state.light_settings();
    commands.spawn((
        Name::new("SceneLight"),
        SceneLight,
        PointLight {
            color: rgb(settings.diffuse),
            intensity: POINT_LIGHT_LUMENS,
            range: state.config().camera.far,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_translation(Vec3::from_array(settings.position)),
    ));

    commands.insert_resource(AmbientLight {
        color: rgb(settings.ambient),
        brightness: AMBIENT_BRIGHTNESS,
        affects_lightmapped_meshes: true,
    });
}

pub fn sync_lighting(
    state: Res<SceneState>,
    mut lights: Query<(&mut PointLight, &mut Transform), With<SceneLight>>,
    mut ambient: ResMut<AmbientLight>,
) {
    let uniforms = state.light_uniforms();
    for (mut light, mut transform) in &mut lights {
        let color = rgb(uniforms.diffuse.to_array());
        if light.color != color {
            light.color = color;
        }
        if transform.translation != uniforms.position {
            transform.translation = uniforms.position;
        }
    }

    let ambient_color = rgb(uniforms.ambient.to_array());
    if ambient.color != ambient_color {
        ambient.color = ambient_color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn higher_shininess_is_smoother() {
        assert!(roughness_from_shininess(200.0) < roughness_from_shininess(50.0));
        assert!(roughness_from_shininess(50.0) < roughness_from_shininess(1.0));
        assert!(roughness_from_shininess(1.0) <= 1.0);
        assert!(roughness_from_shininess(1e9) >= MIN_ROUGHNESS);
    }

    #[test]
    fn full_specular_maps_to_default_reflectance() {
        assert_eq!(reflectance_from_specular(Vec3::ONE), 0.5);
        assert_eq!(reflectance_from_specular(Vec3::ZERO), 0.0);
    }
}
