use wt_config::ConfigError;
use wt_sim::SimError;

pub type CliResult<T> = Result<T, CliError>;

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Core(#[from] wt_core::WtError),

    #[error("Simulation error: {0}")]
    Sim(#[from] SimError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid argument: {0}")]
    InvalidArg(String),
}
