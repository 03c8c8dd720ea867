use bevy::math::{Mat4, Vec3};

use crate::config::CameraConfig;

/// Direction from the target to the eye before zoom is applied.
pub const EYE_FORWARD: Vec3 = Vec3::Z;
pub const LOOK_TARGET: Vec3 = Vec3::ZERO;
pub const LOOK_UP: Vec3 = Vec3::Y;

/// Orbit camera: a fixed look-at followed by X, Y, Z rotations of the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Degrees around X, Y and Z.
    pub rotation: Vec3,
    pub zoom: f32,
}

impl Camera {
    pub fn eye(&self) -> Vec3 {
        EYE_FORWARD * self.zoom
    }

    /// `lookAt(eye, target, up) ∘ Rx ∘ Ry ∘ Rz`; the order matters.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), LOOK_TARGET, LOOK_UP)
            * Mat4::from_rotation_x(self.rotation.x.to_radians())
            * Mat4::from_rotation_y(self.rotation.y.to_radians())
            * Mat4::from_rotation_z(self.rotation.z.to_radians())
    }
}

pub fn projection_matrix(config: &CameraConfig, aspect: f32) -> Mat4 {
    Mat4::perspective_rh_gl(config.fov_deg.to_radians(), aspect, config.near, config.far)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraPreset {
    Front,
    Back,
    Left,
    Right,
    Top,
    Isometric,
}

impl CameraPreset {
    pub const ALL: [Self; 6] = [
        Self::Front,
        Self::Back,
        Self::Left,
        Self::Right,
        Self::Top,
        Self::Isometric,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Front => "Front",
            Self::Back => "Back",
            Self::Left => "Left",
            Self::Right => "Right",
            Self::Top => "Top",
            Self::Isometric => "Isometric",
        }
    }

    /// Rotation in degrees around X, Y, Z.
    pub fn rotation(self) -> Vec3 {
        match self {
            Self::Front => Vec3::ZERO,
            Self::Back => Vec3::new(0.0, 180.0, 0.0),
            Self::Left => Vec3::new(0.0, 90.0, 0.0),
            Self::Right => Vec3::new(0.0, -90.0, 0.0),
            Self::Top => Vec3::new(90.0, 0.0, 0.0),
            Self::Isometric => Vec3::new(30.0, -45.0, 0.0),
        }
    }
}

/// Wraps degrees into (-180, 180].
pub fn wrap_degrees(deg: f32) -> f32 {
    let wrapped = (deg + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 { 180.0 } else { wrapped }
}
