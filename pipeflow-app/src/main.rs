mod config;

use std::path::Path;

use thiserror::Error;

use crate::config::{CONFIG_FILE, Config, ConfigError};

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("dashboard failed: {0}")]
    Dashboard(#[from] eframe::Error),
}

fn main() -> Result<(), AppError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::load(Path::new(CONFIG_FILE))?;
    log::debug!("{config:?}");

    pipeflow_plot::run(config.into_options())?;
    Ok(())
}
