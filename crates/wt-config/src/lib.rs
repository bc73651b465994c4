//! wt-config: tunnel configuration file format and validation.

pub mod runtime;
pub mod schema;
pub mod validate;

pub use runtime::{
    aero_model, ambient_generator, build_tunnel, noise_source, poll_cadence, reading_log,
};
pub use schema::*;
pub use validate::{ValidationError, validate_config};

/// Newest config schema version understood by this crate.
pub const LATEST_VERSION: u32 = 1;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Simulation setup error: {0}")]
    Sim(#[from] wt_sim::SimError),

    #[error("Unsupported config format: {path}")]
    UnsupportedFormat { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn from_yaml_str(content: &str) -> ConfigResult<TunnelConfig> {
    let config: TunnelConfig = serde_yaml::from_str(content)?;
    validate_config(&config)?;
    Ok(config)
}

pub fn load_yaml(path: &std::path::Path) -> ConfigResult<TunnelConfig> {
    let content = std::fs::read_to_string(path)?;
    from_yaml_str(&content)
}

pub fn save_yaml(path: &std::path::Path, config: &TunnelConfig) -> ConfigResult<()> {
    validate_config(config)?;
    let content = serde_yaml::to_string(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ConfigResult<TunnelConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: TunnelConfig = serde_json::from_str(&content)?;
    validate_config(&config)?;
    Ok(config)
}

pub fn save_json(path: &std::path::Path, config: &TunnelConfig) -> ConfigResult<()> {
    validate_config(config)?;
    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load by extension: `.json` as JSON, `.yaml`/`.yml` as YAML.
pub fn load(path: &std::path::Path) -> ConfigResult<TunnelConfig> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => load_json(path),
        Some("yaml") | Some("yml") => load_yaml(path),
        _ => Err(ConfigError::UnsupportedFormat {
            path: path.display().to_string(),
        }),
    }
}

/// Save by extension, same rules as [`load`].
pub fn save(path: &std::path::Path, config: &TunnelConfig) -> ConfigResult<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => save_json(path, config),
        Some("yaml") | Some("yml") => save_yaml(path, config),
        _ => Err(ConfigError::UnsupportedFormat {
            path: path.display().to_string(),
        }),
    }
}
