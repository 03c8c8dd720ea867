use std::path::{Path, PathBuf};

use bevy::ecs::resource::Resource;
use tracing::debug;

pub const TWINDOOR_ASSETS_ROOT_ENV: &str = "TWINDOOR_ASSETS_ROOT";

pub fn twindoor_assets_root() -> PathBuf {
    if let Ok(explicit) = std::env::var(TWINDOOR_ASSETS_ROOT_ENV) {
        let path = PathBuf::from(explicit);
        if path.exists() {
            return path;
        }
        debug!("{TWINDOOR_ASSETS_ROOT_ENV} points at missing {}", path.display());
    }

    if let Ok(exe) = std::env::current_exe()
        && let Some(exe_dir) = exe.parent()
    {
        let sibling_assets = exe_dir.join("assets");
        if sibling_assets.exists() {
            return sibling_assets;
        }
    }

    let repo_assets = Path::new(env!("CARGO_MANIFEST_DIR")).join("../td-client/assets");
    if repo_assets.exists() {
        return repo_assets;
    }

    PathBuf::from("assets")
}

/// Resolves `path` against the assets root unless it is absolute or exists
/// relative to the working directory.
pub fn resolve_asset_path(path: &Path) -> PathBuf {
    if path.is_absolute() || path.exists() {
        return path.to_path_buf();
    }
    twindoor_assets_root().join(path)
}

#[derive(Resource, Debug)]
pub struct UiState {
    pub panel_open: bool,
    /// Set by the panel while egui owns the pointer; orbit input backs off.
    pub pointer_over_ui: bool,
    pub keyboard_captured: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            panel_open: true,
            pointer_over_ui: false,
            keyboard_captured: false,
        }
    }
}

#[derive(Resource, Default, Debug)]
pub struct PerfTimings {
    pub frame_delta_ms: f32,
    pub main_thread_ms: f32,
    pub update_ms: f32,
    pub ui_ms: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_paths_are_left_alone() {
        let abs = std::env::temp_dir().join("door.png");
        assert_eq!(resolve_asset_path(&abs), abs);
    }

    #[test]
    fn relative_missing_paths_land_under_assets_root() {
        let rel = Path::new("textures/definitely-not-here.png");
        assert_eq!(resolve_asset_path(rel), twindoor_assets_root().join(rel));
    }
}
