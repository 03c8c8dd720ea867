mod animation;
pub mod camera;
mod config;
mod error;
mod lighting;
pub mod mesh;
mod params;
pub mod render;
pub mod scene;
mod state;
pub mod texture;
pub mod transform;

pub use animation::{Direction, EasedTransition, PROGRESS_COMPLETE, TransitionPair, ease};
pub use camera::{Camera, CameraPreset};
pub use config::{AnimationConfig, CameraConfig, DoorLayout, SceneConfig};
pub use error::{ConfigError, RenderError};
pub use lighting::{LightSettings, LightUniforms};
pub use mesh::MeshData;
pub use params::{DisplayFormat, ParamId, ParamSpec, ParamTable};
pub use render::{
    DeviceCapabilities, DrawItem, DrawUniforms, FramePlan, GraphicsDevice, RenderPass, Renderer,
    plan_frame,
};
pub use scene::{DoorGeometry, Part, PartId, PartPiece, SceneGraph};
pub use state::{SceneAction, SceneState};
pub use texture::{TextureImage, TextureMode, TextureSlots};
pub use transform::{FrameTransforms, pivot_rotation};
