//! Peppered GUI Entry Point
//!
//! Run with: `cargo run --features gui --bin peppered-gui`

use peppered::config::Config;
use peppered::gui::run_gui;

fn main() -> eframe::Result<()> {
    // Load config or use default
    let config = load_config();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.log_level.as_str()),
    )
    .init();

    log::info!("Starting Peppered GUI");
    log::info!("Population size: {}", config.population.size);
    log::info!("Initial backdrop: {}", config.environment.initial.name());

    run_gui(config)
}

/// Load configuration from file or use default
fn load_config() -> Config {
    // Try to load from common locations
    let paths = ["config.yaml", "peppered.yaml", "../config.yaml"];

    for path in paths {
        match Config::from_file(path) {
            Ok(config) => {
                eprintln!("Loaded config from: {}", path);
                return config;
            }
            Err(peppered::config::ConfigError::Io(_)) => {}
            Err(e) => eprintln!("Ignoring {}: {}", path, e),
        }
    }

    eprintln!("Using default configuration");
    Config::default()
}
