use std::path::{Path, PathBuf};
use std::thread;

use bevy::image::{ImageAddressMode, ImageSampler, ImageSamplerDescriptor};
use bevy::prelude::*;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use crossbeam::channel::{Receiver, Sender, unbounded};
use td_scene::{SceneState, TextureImage, TextureMode};
use td_utils::resolve_asset_path;
use tracing::{info, warn};

/// Path from the command line, sent to the loader at startup.
#[derive(Resource, Default)]
pub struct TextureRequest(pub Option<PathBuf>);

/// Decodes image files on a worker thread.
#[derive(Resource)]
pub struct TextureLoader {
    request_tx: Sender<PathBuf>,
    result_rx: Receiver<TextureImage>,
}

impl Default for TextureLoader {
    fn default() -> Self {
        let (request_tx, request_rx) = unbounded::<PathBuf>();
        let (result_tx, result_rx) = unbounded::<TextureImage>();
        thread::spawn(move || texture_worker(request_rx, result_tx));
        Self {
            request_tx,
            result_rx,
        }
    }
}

impl TextureLoader {
    pub fn request(&self, path: PathBuf) {
        let _ = self.request_tx.send(path);
    }
}

/// GPU images for the two texture slots.
#[derive(Resource, Default)]
pub struct SceneTextures {
    checkerboard: Option<Handle<Image>>,
    image: Option<Handle<Image>>,
    revision: u32,
}

impl SceneTextures {
    pub fn handle(&self, mode: TextureMode) -> Option<Handle<Image>> {
        match mode {
            TextureMode::Checkerboard => self.checkerboard.clone(),
            TextureMode::Image => self.image.clone(),
        }
    }

    pub fn revision(&self) -> u32 {
        self.revision
    }
}

fn image_from_texture(texture: &TextureImage) -> Image {
    let mut image = Image::new_fill(
        Extent3d {
            width: texture.width,
            height: texture.height,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        &[0, 0, 0, 0],
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::default(),
    );
    image.data = Some(texture.rgba.clone());

    let mut sampler = ImageSamplerDescriptor::linear();
    sampler.address_mode_u = ImageAddressMode::Repeat;
    sampler.address_mode_v = ImageAddressMode::Repeat;
    image.sampler = ImageSampler::Descriptor(sampler);
    image
}

pub fn setup_checkerboard(
    state: Res<SceneState>,
    mut images: ResMut<Assets<Image>>,
    mut textures: ResMut<SceneTextures>,
) {
    if let Some(checker) = state.textures.get(TextureMode::Checkerboard) {
        textures.checkerboard = Some(images.add(image_from_texture(checker)));
        textures.revision = textures.revision.wrapping_add(1);
    }
}

pub fn request_initial_texture(request: Res<TextureRequest>, loader: Res<TextureLoader>) {
    if let Some(path) = &request.0 {
        let resolved = resolve_asset_path(path);
        info!("loading texture {}", resolved.display());
        loader.request(resolved);
    }
}

pub fn texture_loader_tick(
    loader: Res<TextureLoader>,
    mut state: ResMut<SceneState>,
    mut images: ResMut<Assets<Image>>,
    mut textures: ResMut<SceneTextures>,
) {
    while let Ok(decoded) = loader.result_rx.try_recv() {
        textures.image = Some(images.add(image_from_texture(&decoded)));
        textures.revision = textures.revision.wrapping_add(1);
        state.textures.bind_image(decoded);
    }
}

/// Reads and decodes an image file into RGBA8. Failures are logged.
pub fn decode_texture(path: &Path) -> Option<TextureImage> {
    let decoded = match std::fs::read(path)
        .map_err(|e| e.to_string())
        .and_then(|bytes| image::load_from_memory(&bytes).map_err(|e| e.to_string()))
    {
        Ok(decoded) => decoded,
        Err(err) => {
            warn!("failed to load texture {:?}: {err}", path);
            return None;
        }
    };
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    Some(TextureImage {
        width,
        height,
        rgba: rgba.into_raw(),
    })
}

fn texture_worker(request_rx: Receiver<PathBuf>, result_tx: Sender<TextureImage>) {
    while let Ok(path) = request_rx.recv() {
        let Some(texture) = decode_texture(&path) else {
            continue;
        };
        let _ = result_tx.send(texture);
    }
}
