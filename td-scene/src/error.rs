use std::path::PathBuf;

/// Errors raised while loading a [`crate::SceneConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Fatal renderer initialization failures.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The device cannot provide something every frame relies on.
    #[error("graphics device is missing required capability: {0}")]
    MissingCapability(&'static str),
}
