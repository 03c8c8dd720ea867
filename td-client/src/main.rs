use std::path::PathBuf;

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::window::PresentMode;
use clap::{Parser, ValueEnum};
use td_render::RenderPlugin;
use td_scene::{SceneAction, SceneConfig};
use td_ui::UiPlugin;
use td_utils::resolve_asset_path;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod dry_run;
mod plugins;
#[cfg(feature = "perf_timing")]
mod timing;

use plugins::{ClientCorePlugin, ClientTimingPlugin};

const DEFAULT_LOG_FILTER: &str = "info,wgpu=warn,naga=warn";

#[derive(Parser, Debug)]
#[command(name = "twindoor", about = "Interactive double door scene")]
struct Args {
    /// Scene config (TOML). Relative paths also resolve against the assets root.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Image bound to the second texture slot.
    #[arg(long)]
    texture: Option<PathBuf>,
    #[arg(long, default_value_t = 1280)]
    width: u32,
    #[arg(long, default_value_t = 720)]
    height: u32,
    #[arg(long)]
    no_vsync: bool,
    /// Run headless for this many frames against a logging device, then exit.
    #[arg(long, value_name = "FRAMES")]
    dry_run: Option<u32>,
    /// Triggers applied before the first dry-run frame.
    #[arg(long = "action", value_enum)]
    actions: Vec<ScriptedAction>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum ScriptedAction {
    Open,
    Close,
    GlassOpen,
    GlassClose,
    AutoRotate,
}

impl From<ScriptedAction> for SceneAction {
    fn from(action: ScriptedAction) -> Self {
        match action {
            ScriptedAction::Open => SceneAction::StartPushOpen,
            ScriptedAction::Close => SceneAction::StartClose,
            ScriptedAction::GlassOpen => SceneAction::StartGlassOpen,
            ScriptedAction::GlassClose => SceneAction::StartGlassClose,
            ScriptedAction::AutoRotate => SceneAction::ToggleAutoRotate,
        }
    }
}

fn main() -> AppExit {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .without_time()
        .compact()
        .init();

    let args = Args::parse();
    info!("Starting twindoor");

    let config = match args
        .config
        .as_deref()
        .map(|path| SceneConfig::load(&resolve_asset_path(path)))
        .transpose()
    {
        Ok(config) => config.unwrap_or_default(),
        Err(err) => {
            error!("{err}");
            return AppExit::error();
        }
    };

    if let Some(frames) = args.dry_run {
        let actions: Vec<SceneAction> = args.actions.iter().map(|&a| a.into()).collect();
        return dry_run::run(&config, frames, &actions);
    }

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Twin Door".into(),
                        resolution: (args.width as f32, args.height as f32).into(),
                        present_mode: if args.no_vsync {
                            PresentMode::AutoNoVsync
                        } else {
                            PresentMode::AutoVsync
                        },
                        ..default()
                    }),
                    ..default()
                })
                .disable::<LogPlugin>(),
        )
        .add_plugins((
            ClientCorePlugin::new(config),
            RenderPlugin {
                texture_path: args.texture,
            },
            UiPlugin,
            ClientTimingPlugin,
        ))
        .run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dry_run_with_actions() {
        let args = Args::try_parse_from([
            "twindoor",
            "--dry-run",
            "120",
            "--action",
            "open",
            "--action",
            "glass-open",
        ])
        .unwrap();
        assert_eq!(args.dry_run, Some(120));
        assert_eq!(
            args.actions,
            vec![ScriptedAction::Open, ScriptedAction::GlassOpen]
        );
        assert_eq!((args.width, args.height), (1280, 720));
    }

    #[test]
    fn bundled_config_matches_builtin_defaults() {
        let text = include_str!("../assets/scene.toml");
        assert_eq!(SceneConfig::from_toml_str(text).unwrap(), SceneConfig::default());
    }
}
